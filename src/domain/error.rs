//! Domain errors
//!
//! The calculations themselves never fail. These errors come from the
//! edges: the calculator form's presence check.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
