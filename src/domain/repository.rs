use async_trait::async_trait;

use super::error::StoreResult;
use super::todo::{CreateTodo, Todo, TodoId, UpdateTodo};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> StoreResult<()>;
    async fn create(&self, input: CreateTodo) -> StoreResult<Todo>;
    async fn get(&self, id: TodoId) -> StoreResult<Todo>;
    async fn list(&self) -> StoreResult<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> StoreResult<Todo>;
    async fn delete(&self, id: TodoId) -> StoreResult<()>;
}
