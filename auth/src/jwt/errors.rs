use thiserror::Error;

/// Error type for JWT operations.
///
/// `InvalidSignature` and `Expired` stay distinct so callers can log forged
/// and stale tokens differently; both mean "unauthenticated" to a client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature check failed, or the token could not be parsed at all.
    #[error("Token signature is invalid: {0}")]
    InvalidSignature(String),

    #[error("Token is expired")]
    Expired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
