//! Service configuration and admin connection parameters.
//!
//! [`AppConfig`] is process-wide and read once at startup from the
//! environment. [`AdminConfig`] arrives with every request as a property
//! list and is never cached.

use std::fmt;

use crate::errors::{AppError, AppResult};
use crate::models::AddonProperty;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Settings for the HTTP service itself.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service_name: String,
    pub host: String,
    pub port: u16,
    /// Upper bound for opening an admin connection.
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and then reads `SERVER_HOST`, `SERVER_PORT`
    /// and `CONNECT_TIMEOUT_SECS`. Unset or unparseable values keep defaults.
    pub fn load_with_service(service_name: &str) -> Self {
        load_dotenv();

        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_parse("SERVER_PORT").unwrap_or(defaults.port),
            connect_timeout_secs: env_parse("CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Best-effort `.env` loader. Variables already present in the environment win.
fn load_dotenv() {
    let Ok(content) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if std::env::var_os(key).is_none() {
                std::env::set_var(key, value.trim());
            }
        }
    }
}

/// Recognized admin property keys, each with its legacy `pgsql`-prefixed alias.
pub mod keys {
    pub const SERVER: [&str; 2] = ["server", "pgsqlServer"];
    pub const SERVER_PORT: [&str; 2] = ["serverPort", "pgsqlServerPort"];
    pub const ADMIN_DATABASE: [&str; 2] = ["adminDatabase", "pgsqlAdminDatabase"];
    pub const ADMIN_USER: [&str; 2] = ["adminUser", "pgsqlAdminUser"];
    pub const ADMIN_PASSWORD: [&str; 2] = ["adminPassword", "pgsqlAdminPassword"];
}

/// Parameters for the admin connection of a single invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub server: String,
    pub port: u16,
    pub admin_database: String,
    pub admin_user: String,
    pub admin_password: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("admin_database", &self.admin_database)
            .field("admin_user", &self.admin_user)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    /// Parses the admin property list.
    ///
    /// # Errors
    /// Returns [`AppError::Configuration`] when a key is missing or empty, or
    /// when `serverPort` is not a valid TCP port.
    pub fn from_properties(properties: &[AddonProperty]) -> AppResult<Self> {
        let port_text = required(properties, keys::SERVER_PORT)?;
        let port = port_text.trim().parse::<u16>().map_err(|e| {
            AppError::Configuration(format!(
                "property '{}' must be a port number, got '{}': {}",
                keys::SERVER_PORT[0],
                port_text,
                e
            ))
        })?;

        Ok(Self {
            server: required(properties, keys::SERVER)?.to_string(),
            port,
            admin_database: required(properties, keys::ADMIN_DATABASE)?.to_string(),
            admin_user: required(properties, keys::ADMIN_USER)?.to_string(),
            admin_password: required(properties, keys::ADMIN_PASSWORD)?.to_string(),
        })
    }

    /// Connection string handed back to the platform for a provisioned tenant.
    pub fn tenant_connection_string(&self, login: &str, credential: &str, database: &str) -> String {
        format!(
            "Server={};Port={};User Id={};Password={};Database={};",
            self.server, self.port, login, credential, database
        )
    }
}

fn required<'a>(properties: &'a [AddonProperty], names: [&str; 2]) -> AppResult<&'a str> {
    names
        .iter()
        .find_map(|name| {
            properties
                .iter()
                .find(|p| p.key == *name && !p.value.is_empty())
                .map(|p| p.value.as_str())
        })
        .ok_or_else(|| {
            AppError::Configuration(format!("missing required property '{}'", names[0]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Vec<AddonProperty> {
        pairs
            .iter()
            .map(|(k, v)| AddonProperty::new(*k, *v))
            .collect()
    }

    fn full() -> Vec<AddonProperty> {
        props(&[
            ("server", "db.internal"),
            ("serverPort", "5432"),
            ("adminDatabase", "postgres"),
            ("adminUser", "admin"),
            ("adminPassword", "s3cret"),
        ])
    }

    #[test]
    fn test_parses_all_keys() {
        let config = AdminConfig::from_properties(&full()).unwrap();
        assert_eq!(config.server, "db.internal");
        assert_eq!(config.port, 5432);
        assert_eq!(config.admin_database, "postgres");
        assert_eq!(config.admin_user, "admin");
        assert_eq!(config.admin_password, "s3cret");
    }

    #[test]
    fn test_accepts_legacy_keys() {
        let config = AdminConfig::from_properties(&props(&[
            ("pgsqlServer", "h"),
            ("pgsqlServerPort", "6543"),
            ("pgsqlAdminDatabase", "postgres"),
            ("pgsqlAdminUser", "root"),
            ("pgsqlAdminPassword", "pw"),
        ]))
        .unwrap();
        assert_eq!(config.port, 6543);
        assert_eq!(config.admin_user, "root");
    }

    #[test]
    fn test_empty_value_falls_through_to_legacy_key() {
        let mut properties = full();
        for p in properties.iter_mut().filter(|p| p.key == "server") {
            p.value = String::new();
        }
        properties.push(AddonProperty::new("pgsqlServer", "legacy.internal"));
        let config = AdminConfig::from_properties(&properties).unwrap();
        assert_eq!(config.server, "legacy.internal");
    }

    #[test]
    fn test_empty_value_without_alias_is_missing() {
        let mut properties = full();
        for p in properties.iter_mut().filter(|p| p.key == "adminUser") {
            p.value = String::new();
        }
        let err = AdminConfig::from_properties(&properties).unwrap_err();
        assert!(err.to_string().contains("missing required property 'adminUser'"));
    }

    #[test]
    fn test_missing_password_is_configuration_error() {
        let mut properties = full();
        properties.retain(|p| p.key != "adminPassword");
        let err = AdminConfig::from_properties(&properties).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("adminPassword"));
    }

    #[test]
    fn test_non_numeric_port_is_configuration_error() {
        let mut properties = full();
        for p in properties.iter_mut().filter(|p| p.key == "serverPort") {
            p.value = "fifty".into();
        }
        let err = AdminConfig::from_properties(&properties).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("serverPort"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = AdminConfig::from_properties(&full()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_tenant_connection_string_format() {
        let config = AdminConfig::from_properties(&full()).unwrap();
        assert_eq!(
            config.tenant_connection_string("DB_teamA__inst1", "abc123", "teamA__inst1"),
            "Server=db.internal;Port=5432;User Id=DB_teamA__inst1;Password=abc123;Database=teamA__inst1;"
        );
    }
}
