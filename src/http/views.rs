use std::sync::Arc;

use axum::response::Html;
use tera::{Context, Tera};

use crate::domain::todo::Todo;
use crate::http::types::AppError;

pub fn engine() -> Arc<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates([
        ("todo_list.html", include_str!("../../templates/todo_list.html")),
        ("todo_form.html", include_str!("../../templates/todo_form.html")),
    ])
    .expect("embedded templates parse");
    Arc::new(tera)
}

pub fn list_page(tera: &Tera, todos: &[Todo]) -> Result<Html<String>, AppError> {
    let mut ctx = Context::new();
    ctx.insert("todos", todos);
    Ok(Html(tera.render("todo_list.html", &ctx)?))
}

// `todo` pre-fills the form when editing; `error` is shown after a rejected submission
pub fn form_page(
    tera: &Tera,
    todo: Option<&Todo>,
    error: Option<&str>,
) -> Result<Html<String>, AppError> {
    let mut ctx = Context::new();
    ctx.insert("todo", &todo);
    ctx.insert("error", &error);
    Ok(Html(tera.render("todo_form.html", &ctx)?))
}
