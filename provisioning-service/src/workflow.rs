//! Administrative statement sequences and the connection seam they run over.
//!
//! A [`TenantPlan`] turns a tenant identity into the ordered statements for
//! provisioning and deprovisioning. [`run_statements`] executes them on one
//! [`AdminSession`] and stops at the first failure. Nothing is rolled back.

use std::fmt;

use async_trait::async_trait;
use common::config::AdminConfig;
use common::errors::AppResult;
use common::models::TenantIdentity;
use common::utils::{generate_credential, quote_identifier, quote_literal};

use crate::oplog::OperationLog;

/// Opens admin sessions against a PostgreSQL server.
#[async_trait]
pub trait AdminConnector: Send + Sync {
    type Session: AdminSession;

    /// Opens a new session authenticated as the admin user.
    async fn connect(&self, config: &AdminConfig) -> AppResult<Self::Session>;
}

/// One open admin connection.
#[async_trait]
pub trait AdminSession: Send {
    /// Executes a single statement.
    async fn execute(&mut self, statement: &AdminStatement) -> AppResult<()>;

    /// Releases the connection. Called exactly once per opened session.
    async fn close(&mut self) -> AppResult<()>;
}

/// A single administrative statement with its operands.
#[derive(Clone, PartialEq, Eq)]
pub enum AdminStatement {
    CreateUser { login: String, credential: String },
    CreateDatabase { database: String, owner: String },
    GrantAllPrivileges { database: String, login: String },
    DropDatabase { database: String },
    DropUser { login: String },
}

impl AdminStatement {
    /// Short statement name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            AdminStatement::CreateUser { .. } => "CREATE USER",
            AdminStatement::CreateDatabase { .. } => "CREATE DATABASE",
            AdminStatement::GrantAllPrivileges { .. } => "GRANT",
            AdminStatement::DropDatabase { .. } => "DROP DATABASE",
            AdminStatement::DropUser { .. } => "DROP USER",
        }
    }

    /// Renders the statement with every identifier and literal quoted.
    pub fn to_sql(&self) -> String {
        match self {
            AdminStatement::CreateUser { login, credential } => format!(
                "CREATE USER {} WITH LOGIN PASSWORD {}",
                quote_identifier(login),
                quote_literal(credential)
            ),
            AdminStatement::CreateDatabase { database, owner } => format!(
                "CREATE DATABASE {} WITH OWNER {}",
                quote_identifier(database),
                quote_identifier(owner)
            ),
            AdminStatement::GrantAllPrivileges { database, login } => format!(
                "GRANT ALL PRIVILEGES ON DATABASE {} TO {}",
                quote_identifier(database),
                quote_identifier(login)
            ),
            AdminStatement::DropDatabase { database } => {
                format!("DROP DATABASE IF EXISTS {}", quote_identifier(database))
            }
            AdminStatement::DropUser { login } => {
                format!("DROP USER IF EXISTS {}", quote_identifier(login))
            }
        }
    }
}

// Never print the credential.
impl fmt::Debug for AdminStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminStatement::CreateUser { login, .. } => f
                .debug_struct("CreateUser")
                .field("login", login)
                .field("credential", &"<redacted>")
                .finish(),
            AdminStatement::CreateDatabase { database, owner } => f
                .debug_struct("CreateDatabase")
                .field("database", database)
                .field("owner", owner)
                .finish(),
            AdminStatement::GrantAllPrivileges { database, login } => f
                .debug_struct("GrantAllPrivileges")
                .field("database", database)
                .field("login", login)
                .finish(),
            AdminStatement::DropDatabase { database } => f
                .debug_struct("DropDatabase")
                .field("database", database)
                .finish(),
            AdminStatement::DropUser { login } => {
                f.debug_struct("DropUser").field("login", login).finish()
            }
        }
    }
}

/// Names and credential for one tenant, fixed for the whole invocation.
pub struct TenantPlan {
    pub database: String,
    pub login: String,
    credential: String,
}

impl TenantPlan {
    /// Derives names and generates a fresh credential.
    pub fn new(identity: &TenantIdentity) -> Self {
        Self::with_credential(identity, generate_credential())
    }

    pub fn with_credential(identity: &TenantIdentity, credential: String) -> Self {
        Self {
            database: identity.database_name(),
            login: identity.login_name(),
            credential,
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Create user, create database, grant.
    pub fn provision_statements(&self) -> Vec<AdminStatement> {
        vec![
            AdminStatement::CreateUser {
                login: self.login.clone(),
                credential: self.credential.clone(),
            },
            AdminStatement::CreateDatabase {
                database: self.database.clone(),
                owner: self.login.clone(),
            },
            AdminStatement::GrantAllPrivileges {
                database: self.database.clone(),
                login: self.login.clone(),
            },
        ]
    }

    /// Drop database, drop user.
    pub fn deprovision_statements(&self) -> Vec<AdminStatement> {
        vec![
            AdminStatement::DropDatabase {
                database: self.database.clone(),
            },
            AdminStatement::DropUser {
                login: self.login.clone(),
            },
        ]
    }
}

/// Executes `statements` in order, stopping at the first error.
pub async fn run_statements<S: AdminSession>(
    session: &mut S,
    statements: &[AdminStatement],
    log: &dyn OperationLog,
) -> AppResult<()> {
    for statement in statements {
        log.debug(&format!("Executing {}", statement.name()));
        session.execute(statement).await?;
    }
    Ok(())
}
