// Fri Jan 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern is empty")]
    Empty,
    #[error("Invalid token {token:?} at index {index}: expected two hex digits or ??")]
    InvalidToken { token: String, index: usize },
}
