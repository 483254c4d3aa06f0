use axum::extract::{Form, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tera::Tera;

use crate::application::todo_service::TodoService;
use crate::domain::error::StoreError;
use crate::domain::todo::{CreateTodo, TodoId, UpdateTodo};
use crate::http::types::AppError;
use crate::http::views;

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
    pub templates: Arc<Tera>,
}

impl<S: TodoService> AppState<S> {
    pub fn new(service: S) -> Self {
        Self { service, templates: views::engine() }
    }
}

pub fn router<S: TodoService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos/", get(list_todos::<S>))
        .route("/todos/new", get(new_todo::<S>).post(create_todo::<S>))
        .route("/todos/:id/edit", get(edit_todo::<S>).post(update_todo::<S>))
        .route("/todos/:id/delete", get(delete_todo::<S>))
        .route("/todos/:id/toggle", get(toggle_todo::<S>))
        .with_state(state)
}

// every mutation answers 302 back to the list view
pub fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/todos/")]).into_response()
}

// every field defaulted: presence is checked here, not by the extractor
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    due_date: String,
}

async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, AppError> {
    let todos = state.service.list().await?;
    views::list_page(&state.templates, &todos)
}

async fn new_todo<S: TodoService>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, AppError> {
    views::form_page(&state.templates, None, None)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    match submit_create(&state.service, form).await {
        Ok(()) => Ok(redirect_to_list()),
        Err(StoreError::Validation(msg)) => {
            let page = views::form_page(&state.templates, None, Some(&msg))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn edit_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let todo = state.service.get(id).await?;
    views::form_page(&state.templates, Some(&todo), None)
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let todo = state.service.get(id).await?;
    match submit_update(&state.service, id, form).await {
        Ok(()) => Ok(redirect_to_list()),
        Err(StoreError::Validation(msg)) => {
            let page = views::form_page(&state.templates, Some(&todo), Some(&msg))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(redirect_to_list())
}

async fn toggle_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    state.service.toggle(id).await?;
    Ok(redirect_to_list())
}

async fn submit_create<S: TodoService>(service: &S, form: TodoForm) -> Result<(), StoreError> {
    let due_date = parse_due_date(&form.due_date)?;
    service
        .create(CreateTodo { title: form.title, description: form.description, due_date })
        .await?;
    Ok(())
}

async fn submit_update<S: TodoService>(
    service: &S,
    id: TodoId,
    form: TodoForm,
) -> Result<(), StoreError> {
    let due_date = parse_due_date(&form.due_date)?;
    service
        .update(
            id,
            UpdateTodo {
                title: Some(form.title),
                description: Some(form.description),
                due_date: Some(due_date),
                is_completed: None,
            },
        )
        .await?;
    Ok(())
}

fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| StoreError::Validation(format!("invalid due date: {raw}")))
}

// a non-UUID segment can never name a record, so it reads as unknown
fn parse_id(raw: &str) -> Result<TodoId, StoreError> {
    uuid::Uuid::parse_str(raw).map(TodoId).map_err(|_| StoreError::NotFound)
}
