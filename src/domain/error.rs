use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
