//! Application state for provisioning service.

use std::sync::Arc;
use std::time::Duration;

use common::config::AppConfig;

use crate::oplog::TracingLog;
use crate::postgres::PgAdminConnector;
use crate::service::{ProvisioningService, ProvisioningServiceTrait};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub service: Arc<dyn ProvisioningServiceTrait>,
}

impl AppState {
    /// Creates a new application state backed by PostgreSQL.
    pub fn new(config: AppConfig) -> Self {
        let connector = PgAdminConnector::new(Duration::from_secs(config.connect_timeout_secs));
        Self::with_service(config, Arc::new(ProvisioningService::new(connector, TracingLog)))
    }

    /// Creates a state around an existing service implementation.
    pub fn with_service(config: AppConfig, service: Arc<dyn ProvisioningServiceTrait>) -> Self {
        Self { config, service }
    }
}
