use axum::body::to_bytes;
use axum::Router;
use todo_web::application::todo_service::TodoServiceImpl;
use todo_web::domain::repository::TodoRepository;
use todo_web::http::routing::{self, todos};
use todo_web::infrastructure::sqlite_repo::SqliteTodoRepository;

#[tokio::test]
async fn acceptance_create_edit_toggle_delete_flow() {
    let app = app().await;

    // empty list view
    let res = get(&app, "/todos/").await;
    assert_eq!(res.status(), 200);
    assert!(body_text(res).await.contains("No todos yet"));

    // blank create form
    let res = get(&app, "/todos/new").await;
    assert_eq!(res.status(), 200);
    assert!(body_text(res).await.contains("<form"));

    // create
    let res = post_form(&app, "/todos/new", "title=New+TODO&description=First+item&due_date=").await;
    assert_redirects_to_list(&res);
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("New TODO"));
    assert!(list.contains("First item"));
    let id = first_todo_id(&list);

    // edit form is pre-filled
    let res = get(&app, &format!("/todos/{id}/edit")).await;
    assert_eq!(res.status(), 200);
    assert!(body_text(res).await.contains("New TODO"));

    // edit
    let res = post_form(
        &app,
        &format!("/todos/{id}/edit"),
        "title=Updated+TODO&description=Changed&due_date=2026-09-01",
    )
    .await;
    assert_redirects_to_list(&res);
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("Updated TODO"));
    assert!(list.contains("Changed"));
    assert!(list.contains("2026-09-01"));

    // toggle marks completed, a second toggle restores it
    let res = get(&app, &format!("/todos/{id}/toggle")).await;
    assert_redirects_to_list(&res);
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("<s>Updated TODO</s>"));
    let res = get(&app, &format!("/todos/{id}/toggle")).await;
    assert_redirects_to_list(&res);
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(!list.contains("<s>Updated TODO</s>"));

    // delete
    let res = get(&app, &format!("/todos/{id}/delete")).await;
    assert_redirects_to_list(&res);
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("No todos yet"));
}

#[tokio::test]
async fn acceptance_list_is_newest_first() {
    let app = app().await;
    for title in ["first", "second", "third"] {
        let res = post_form(&app, "/todos/new", &format!("title={title}&description=&due_date=")).await;
        assert_redirects_to_list(&res);
    }
    let list = body_text(get(&app, "/todos/").await).await;
    let first = list.find("first").unwrap();
    let second = list.find("second").unwrap();
    let third = list.find("third").unwrap();
    assert!(third < second);
    assert!(second < first);
}

#[tokio::test]
async fn acceptance_create_requires_title() {
    let app = app().await;
    let res = post_form(&app, "/todos/new", "title=&description=orphan&due_date=").await;
    assert_eq!(res.status(), 400);
    assert!(body_text(res).await.contains("title must not be empty"));
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("No todos yet"));
}

#[tokio::test]
async fn acceptance_rejects_unparsable_due_date() {
    let app = app().await;
    let res = post_form(&app, "/todos/new", "title=Dated&description=&due_date=not-a-date").await;
    assert_eq!(res.status(), 400);
    assert!(body_text(res).await.contains("invalid due date"));
    let list = body_text(get(&app, "/todos/").await).await;
    assert!(list.contains("No todos yet"));
}

#[tokio::test]
async fn acceptance_unknown_id_is_404() {
    let app = app().await;
    let id = uuid::Uuid::new_v4();
    assert_eq!(get(&app, &format!("/todos/{id}/edit")).await.status(), 404);
    assert_eq!(get(&app, &format!("/todos/{id}/delete")).await.status(), 404);
    assert_eq!(get(&app, &format!("/todos/{id}/toggle")).await.status(), 404);
    let res = post_form(&app, &format!("/todos/{id}/edit"), "title=x&description=&due_date=").await;
    assert_eq!(res.status(), 404);

    // a malformed id cannot name a record either
    assert_eq!(get(&app, "/todos/not-a-uuid/edit").await.status(), 404);
}

#[tokio::test]
async fn acceptance_root_and_health() {
    let app = app().await;
    let res = get(&app, "/health").await;
    assert_eq!(res.status(), 200);
    let res = get(&app, "/").await;
    assert_redirects_to_list(&res);
}

async fn app() -> Router {
    // in-memory sqlite for tests
    let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
    repo.init().await.unwrap();
    let service = TodoServiceImpl::new(repo);
    routing::app(todos::router(todos::AppState::new(service)))
}

async fn get(app: &Router, path: &str) -> hyper::Response<axum::body::Body> {
    request(app, "GET", path, None).await
}

async fn post_form(app: &Router, path: &str, body: &str) -> hyper::Response<axum::body::Body> {
    request(app, "POST", path, Some(body.to_string())).await
}

async fn request(
    app: &Router,
    method: &str,
    path: &str,
    form_body: Option<String>,
) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match form_body {
        Some(body) => req
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn body_text(res: hyper::Response<axum::body::Body>) -> String {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirects_to_list(res: &hyper::Response<axum::body::Body>) {
    assert_eq!(res.status(), 302);
    assert_eq!(res.headers().get("location").unwrap(), "/todos/");
}

// item links look like /todos/<uuid>/toggle; the 36 chars before the action are the id
fn first_todo_id(list_html: &str) -> String {
    let end = list_html.find("/toggle").unwrap();
    list_html[end - 36..end].to_string()
}
