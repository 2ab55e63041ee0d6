use thiserror::Error;

/// Error for student list operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StudentError {
    #[error("Student already exists with id: {0}")]
    DuplicateId(i32),

    #[error("Invalid student field: {0}")]
    InvalidField(String),
}
