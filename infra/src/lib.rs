//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the DriverApp backend.
//! It provides concrete implementations of the repository traits declared
//! in `da_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx, with embedded migrations
//! - **Search**: Elasticsearch-compatible driver index and the bounded
//!   reindex queue feeding it
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use da_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Search module - Best-effort driver index mirror
pub mod search;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_error_becomes_internal() {
        let error: DomainError = InfrastructureError::Config("bad url".to_string()).into();
        match error {
            DomainError::Internal { message } => assert!(message.contains("bad url")),
            other => panic!("Expected internal error, got {:?}", other),
        }
    }
}
