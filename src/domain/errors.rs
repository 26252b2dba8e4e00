use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid {0}")]
    InvalidReference(String),
    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i32, body: i32 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
