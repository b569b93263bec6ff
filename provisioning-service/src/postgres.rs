//! PostgreSQL admin connections backed by `sqlx`.

use std::time::Duration;

use async_trait::async_trait;
use common::config::AdminConfig;
use common::errors::{AppError, AppResult};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, Executor, PgConnection};

use crate::workflow::{AdminConnector, AdminSession, AdminStatement};

/// Opens one dedicated `PgConnection` per invocation. No pooling.
#[derive(Debug, Clone)]
pub struct PgAdminConnector {
    connect_timeout: Duration,
}

impl PgAdminConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

#[async_trait]
impl AdminConnector for PgAdminConnector {
    type Session = PgAdminSession;

    async fn connect(&self, config: &AdminConfig) -> AppResult<PgAdminSession> {
        tracing::debug!(
            server = %config.server,
            port = config.port,
            database = %config.admin_database,
            user = %config.admin_user,
            "opening admin connection"
        );

        let options = PgConnectOptions::new()
            .host(&config.server)
            .port(config.port)
            .username(&config.admin_user)
            .password(&config.admin_password)
            .database(&config.admin_database);

        let conn = tokio::time::timeout(self.connect_timeout, PgConnection::connect_with(&options))
            .await
            .map_err(|_| AppError::DatabaseConnection {
                message: format!(
                    "timed out after {}s connecting to {}:{}",
                    self.connect_timeout.as_secs(),
                    config.server,
                    config.port
                ),
                detail: format!("connect timeout {:?} elapsed", self.connect_timeout),
            })?
            .map_err(|e| AppError::DatabaseConnection {
                message: driver_message(&e),
                detail: format!("{e:?}"),
            })?;

        Ok(PgAdminSession { conn: Some(conn) })
    }
}

/// An open admin connection. Dropping it without [`AdminSession::close`]
/// still releases the socket, just without a graceful terminate message.
pub struct PgAdminSession {
    conn: Option<PgConnection>,
}

#[async_trait]
impl AdminSession for PgAdminSession {
    async fn execute(&mut self, statement: &AdminStatement) -> AppResult<()> {
        let conn = self.conn.as_mut().ok_or_else(|| AppError::SqlExecution {
            statement: statement.name(),
            message: "admin connection already closed".into(),
            detail: String::new(),
        })?;

        // Simple-query protocol: CREATE/DROP DATABASE refuse to run inside
        // the implicit transaction of an extended-protocol statement.
        let sql = statement.to_sql();
        (&mut *conn)
            .execute(sqlx::raw_sql(&sql))
            .await
            .map_err(|e| AppError::SqlExecution {
                statement: statement.name(),
                message: driver_message(&e),
                detail: format!("{e:?}"),
            })?;
        Ok(())
    }

    async fn close(&mut self) -> AppResult<()> {
        match self.conn.take() {
            Some(conn) => conn.close().await.map_err(|e| AppError::DatabaseConnection {
                message: driver_message(&e),
                detail: format!("{e:?}"),
            }),
            None => Ok(()),
        }
    }
}

/// Server-reported message for database errors, `Display` otherwise.
fn driver_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}
