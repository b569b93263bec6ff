//! Operation log capability handed to the provisioning workflow.

/// Sink for operational messages about provisioning runs.
pub trait OperationLog: Send + Sync {
    fn debug(&self, message: &str);

    fn info(&self, message: &str);

    /// A problem that did not change the operation's outcome.
    fn warn(&self, message: &str, detail: &str);

    /// `detail` carries full diagnostics that must not reach the caller.
    fn error(&self, message: &str, detail: &str);
}

/// Forwards to the process-wide `tracing` subscriber installed by `main`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl OperationLog for TracingLog {
    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str, detail: &str) {
        tracing::warn!(detail = %detail, "{message}");
    }

    fn error(&self, message: &str, detail: &str) {
        tracing::error!(detail = %detail, "{message}");
    }
}
