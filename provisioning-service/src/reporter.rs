//! Maps workflow outcomes to caller-facing results.

use common::errors::AppResult;
use common::models::{OperationKind, OperationResult};

use crate::oplog::OperationLog;

/// Converts `outcome` into an [`OperationResult`] and logs it.
///
/// On success `outcome` holds the tenant connection string, if any. On
/// failure only the error's message reaches the result; the diagnostic
/// detail goes to `log`.
pub fn report(
    kind: OperationKind,
    database: &str,
    outcome: AppResult<Option<String>>,
    log: &dyn OperationLog,
) -> OperationResult {
    match outcome {
        Ok(connection_data) => {
            log.info(&format!(
                "Successfully {} PostgreSQL database: {database}",
                completed(kind)
            ));
            OperationResult::success(kind, connection_data)
        }
        Err(err) => {
            log.error(
                &format!(
                    "Failed to {} PostgreSQL database '{database}' [{}]: {err}",
                    attempted(kind),
                    err.code()
                ),
                &err.detail(),
            );
            OperationResult::failure(err.to_string())
        }
    }
}

fn completed(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Provision => "created",
        OperationKind::Deprovision => "removed",
        OperationKind::Test => "created and removed",
    }
}

fn attempted(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Provision => "create",
        OperationKind::Deprovision => "remove",
        OperationKind::Test => "create or remove",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oplog::testing::{Line, MemoryLog};
    use common::errors::AppError;

    #[test]
    fn test_success_keeps_connection_data() {
        let log = MemoryLog::default();
        let result = report(
            OperationKind::Provision,
            "a__b",
            Ok(Some("Server=h;".into())),
            &log,
        );
        assert!(result.is_success);
        assert_eq!(result.connection_data.as_deref(), Some("Server=h;"));
        assert_eq!(
            log.lines(),
            vec![Line::Info("Successfully created PostgreSQL database: a__b".into())]
        );
    }

    #[test]
    fn test_failure_sends_detail_to_log_only() {
        let log = MemoryLog::default();
        let result = report(
            OperationKind::Deprovision,
            "a__b",
            Err(AppError::SqlExecution {
                statement: "DROP DATABASE",
                message: "database is being accessed by other users".into(),
                detail: "PgDatabaseError { code: \"55006\" }".into(),
            }),
            &log,
        );
        assert!(!result.is_success);
        assert_eq!(
            result.message,
            "DROP DATABASE failed: database is being accessed by other users"
        );
        assert!(result.connection_data.is_none());
        assert!(!result.message.contains("55006"));
        assert!(log.contains("55006"));
        assert!(log.contains("Failed to remove PostgreSQL database 'a__b'"));
    }
}
