use async_trait::async_trait;

use crate::domain::error::{StoreError, StoreResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> StoreResult<Todo>;
    async fn get(&self, id: TodoId) -> StoreResult<Todo>;
    async fn list(&self) -> StoreResult<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> StoreResult<Todo>;
    async fn delete(&self, id: TodoId) -> StoreResult<()>;
    async fn toggle(&self, id: TodoId) -> StoreResult<Todo>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> StoreResult<Todo> {
        validate_title(&input.title)?;
        self.repo.create(input).await
    }

    async fn get(&self, id: TodoId) -> StoreResult<Todo> { self.repo.get(id).await }

    async fn list(&self) -> StoreResult<Vec<Todo>> { self.repo.list().await }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> StoreResult<Todo> {
        if let Some(title) = &input.title {
            validate_title(title)?;
        }
        self.repo.update(id, input).await
    }

    async fn delete(&self, id: TodoId) -> StoreResult<()> { self.repo.delete(id).await }

    async fn toggle(&self, id: TodoId) -> StoreResult<Todo> {
        let todo = self.repo.get(id).await?;
        let input = UpdateTodo { is_completed: Some(!todo.is_completed), ..UpdateTodo::default() };
        self.repo.update(id, input).await
    }
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("title must not be empty".into()));
    }
    Ok(())
}
