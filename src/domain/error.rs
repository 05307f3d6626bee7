// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Flashcard with ID {0} not found.")]
    NotFound(i64),
    #[error("{0}")]
    BadRequest(String),
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

