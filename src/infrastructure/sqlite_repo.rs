use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    error::{StoreError, StoreResult},
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self { StoreError::Other(err.into()) }
}

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due_date TEXT,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn create(&self, input: CreateTodo) -> StoreResult<Todo> {
        let todo = Todo {
            id: TodoId::new(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            is_completed: false,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO todos (id, title, description, due_date, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(todo.id.to_string())
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.due_date.map(|d| d.to_string()))
        .bind(todo.is_completed)
        .bind(todo.created_at.to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> StoreResult<Todo> {
        let row = sqlx::query("SELECT id, title, description, due_date, is_completed, created_at FROM todos WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).ok_or(StoreError::NotFound)
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, title, description, due_date, is_completed, created_at FROM todos ORDER BY created_at DESC")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_todo).collect())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> StoreResult<Todo> {
        // read-merge-write; same-id races are last write wins
        let mut todo = self.get(id).await?;

        if let Some(t) = input.title { todo.title = t; }
        if let Some(d) = input.description { todo.description = d; }
        if let Some(d) = input.due_date { todo.due_date = d; }
        if let Some(c) = input.is_completed { todo.is_completed = c; }

        sqlx::query("UPDATE todos SET title = ?2, description = ?3, due_date = ?4, is_completed = ?5 WHERE id = ?1")
            .bind(todo.id.to_string())
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.due_date.map(|d| d.to_string()))
            .bind(todo.is_completed)
            .execute(&*self.pool)
            .await?;

        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.to_string())
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn row_to_todo(row: SqliteRow) -> Todo {
    let id_str: String = row.get("id");
    let due_date_str: Option<String> = row.get("due_date");
    let created_at_str: String = row.get("created_at");

    Todo {
        id: TodoId(Uuid::parse_str(&id_str).unwrap()),
        title: row.get("title"),
        description: row.get("description"),
        due_date: due_date_str.map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").unwrap()),
        is_completed: row.get("is_completed"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str).unwrap().with_timezone(&Utc),
    }
}
