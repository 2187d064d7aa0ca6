//! # Error Types Module
//!
//! Domain error types for room lookup. User-facing wording lives in the
//! localization bundles; these carry internal detail for the logs only.

/// Errors produced while normalizing a user-supplied room number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomNumberError {
    /// Input does not match "digits plus optional single a/b/v letter"
    InvalidFormat,
}

impl std::fmt::Display for RoomNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomNumberError::InvalidFormat => write!(f, "invalid room number format"),
        }
    }
}

impl std::error::Error for RoomNumberError {}

/// Errors produced by the room repository
#[derive(Debug, Clone)]
pub enum RepositoryError {
    /// The backing store is unreachable or the query failed
    Unavailable(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::Unavailable(msg) => write!(f, "room store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::Unavailable(err.to_string())
    }
}
