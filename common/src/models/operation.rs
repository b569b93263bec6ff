//! Outbound operation results.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The three entry points exposed to the hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Provision,
    Deprovision,
    Test,
}

impl OperationKind {
    /// Fixed caller-facing message on success.
    pub fn success_message(&self) -> &'static str {
        match self {
            OperationKind::Provision => "Successfully created a PostgreSQL database.",
            OperationKind::Deprovision => "Successfully removed a PostgreSQL database.",
            OperationKind::Test => "Successfully created and removed a PostgreSQL database.",
        }
    }

    /// Present-participle phrase used in log lines.
    pub fn activity(&self) -> &'static str {
        match self {
            OperationKind::Provision => "creating",
            OperationKind::Deprovision => "removing",
            OperationKind::Test => "creating and removing",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Provision => write!(f, "provision"),
            OperationKind::Deprovision => write!(f, "deprovision"),
            OperationKind::Test => write!(f, "test"),
        }
    }
}

/// Result record returned for every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub is_success: bool,
    /// Fixed success text, or the underlying error's message on failure.
    pub message: String,
    /// Connection string for the new tenant database (provision only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_data: Option<String>,
}

impl OperationResult {
    pub fn success(kind: OperationKind, connection_data: Option<String>) -> Self {
        Self {
            is_success: true,
            message: kind.success_message().to_string(),
            connection_data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            connection_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serializes_without_connection_data() {
        let json = serde_json::to_value(OperationResult::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "isSuccess": false, "message": "boom" }));
    }

    #[test]
    fn test_success_uses_fixed_message() {
        let result = OperationResult::success(OperationKind::Deprovision, None);
        assert!(result.is_success);
        assert_eq!(result.message, "Successfully removed a PostgreSQL database.");
    }
}
