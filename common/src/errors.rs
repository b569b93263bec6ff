//! Error types shared across the workspace.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Every way a provisioning operation can fail.
///
/// `Display` yields the caller-facing message only. Driver diagnostics are
/// kept in `detail` and reach the operation log through [`AppError::detail`].
#[derive(Debug, Error)]
pub enum AppError {
    /// A required admin property is missing or malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The tenant identity cannot be turned into safe SQL identifiers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Opening the admin connection failed.
    #[error("failed to connect to PostgreSQL: {message}")]
    DatabaseConnection { message: String, detail: String },

    /// A single administrative statement failed.
    #[error("{statement} failed: {message}")]
    SqlExecution {
        statement: &'static str,
        message: String,
        detail: String,
    },
}

impl AppError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DatabaseConnection { .. } => "CONNECTION_ERROR",
            AppError::SqlExecution { .. } => "SQL_EXECUTION_ERROR",
        }
    }

    /// Full diagnostic text for the operation log.
    pub fn detail(&self) -> String {
        match self {
            AppError::DatabaseConnection { detail, .. }
            | AppError::SqlExecution { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}
