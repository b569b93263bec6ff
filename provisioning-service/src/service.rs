//! 租户数据库开通服务模块

use async_trait::async_trait;
use common::config::AdminConfig;
use common::errors::AppResult;
use common::models::{
    AddonManifest, AddonProperty, OperationKind, OperationResult, TenantIdentity,
};

use crate::oplog::OperationLog;
use crate::reporter;
use crate::workflow::{run_statements, AdminConnector, AdminSession, AdminStatement, TenantPlan};

/// Stands in for the database name when the tenant identity is rejected.
const INVALID_TENANT_LABEL: &str = "<invalid tenant>";

/// 开通服务 Trait
#[async_trait]
pub trait ProvisioningServiceTrait: Send + Sync {
    /// 创建租户用户与数据库
    async fn provision(&self, manifest: &AddonManifest) -> OperationResult;

    /// 删除租户数据库与用户
    async fn deprovision(&self, manifest: &AddonManifest) -> OperationResult;

    /// 创建后立即删除，用于验证管理员凭据
    async fn test(&self, manifest: &AddonManifest) -> OperationResult;
}

/// 租户数据库开通服务
///
/// Holds no per-tenant state: every call derives names, opens its own admin
/// session and releases it before returning.
pub struct ProvisioningService<C, L> {
    connector: C,
    log: L,
}

impl<C: AdminConnector, L: OperationLog> ProvisioningService<C, L> {
    /// 创建新的开通服务实例
    pub fn new(connector: C, log: L) -> Self {
        Self { connector, log }
    }

    async fn run(&self, kind: OperationKind, manifest: &AddonManifest) -> OperationResult {
        // Raw aliases never reach the log; they may carry control characters.
        let identity = match TenantIdentity::from_manifest(manifest) {
            Ok(identity) => identity,
            Err(err) => return reporter::report(kind, INVALID_TENANT_LABEL, Err(err), &self.log),
        };
        let database = identity.database_name();
        self.log.info(&format!(
            "{} PostgreSQL database: {database}",
            capitalize(kind.activity())
        ));

        let outcome = self.execute(kind, &identity, &manifest.properties).await;
        reporter::report(kind, &database, outcome, &self.log)
    }

    async fn execute(
        &self,
        kind: OperationKind,
        identity: &TenantIdentity,
        properties: &[AddonProperty],
    ) -> AppResult<Option<String>> {
        let admin = AdminConfig::from_properties(properties)?;
        let plan = TenantPlan::new(identity);

        let statements: Vec<AdminStatement> = match kind {
            OperationKind::Provision => plan.provision_statements(),
            OperationKind::Deprovision => plan.deprovision_statements(),
            OperationKind::Test => {
                let mut all = plan.provision_statements();
                all.extend(plan.deprovision_statements());
                all
            }
        };

        let mut session = self.connector.connect(&admin).await?;
        let outcome = run_statements(&mut session, &statements, &self.log).await;
        if let Err(err) = session.close().await {
            self.log.warn(
                &format!("Failed to close admin connection: {err}"),
                &err.detail(),
            );
        }
        outcome?;

        Ok(match kind {
            OperationKind::Provision => Some(admin.tenant_connection_string(
                &plan.login,
                plan.credential(),
                &plan.database,
            )),
            OperationKind::Deprovision | OperationKind::Test => None,
        })
    }
}

#[async_trait]
impl<C: AdminConnector, L: OperationLog> ProvisioningServiceTrait for ProvisioningService<C, L> {
    async fn provision(&self, manifest: &AddonManifest) -> OperationResult {
        self.run(OperationKind::Provision, manifest).await
    }

    async fn deprovision(&self, manifest: &AddonManifest) -> OperationResult {
        self.run(OperationKind::Deprovision, manifest).await
    }

    async fn test(&self, manifest: &AddonManifest) -> OperationResult {
        self.run(OperationKind::Test, manifest).await
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
