use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed or uses unsupported parameters.
    #[error("Stored password hash is corrupt: {0}")]
    CorruptHash(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
