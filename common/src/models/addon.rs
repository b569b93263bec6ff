//! Inbound add-on models.
//!
//! The hosting platform sends a manifest naming the tenant and carrying the
//! admin property list for every Provision, Deprovision and Test call.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::utils::identifier::{validate_alias, validate_derived_names};
use crate::utils::naming;

/// A single key/value configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddonProperty {
    pub key: String,
    pub value: String,
}

impl AddonProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Manifest describing which tenant is being served and how to reach the
/// admin database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_derived_names"))]
pub struct AddonManifest {
    /// Development team / owner alias.
    #[validate(custom(function = "validate_alias"))]
    pub calling_developer_alias: String,
    /// Application instance alias.
    #[validate(custom(function = "validate_alias"))]
    pub instance_alias: String,
    /// Admin connection properties (`server`, `serverPort`, `adminDatabase`,
    /// `adminUser`, `adminPassword`).
    #[serde(default)]
    pub properties: Vec<AddonProperty>,
}

/// Request body shared by all three operations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddonRequest {
    pub manifest: AddonManifest,
}

/// The validated `(owner, instance)` pair a tenant database belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantIdentity {
    owner: String,
    instance: String,
}

impl TenantIdentity {
    /// Validates the manifest aliases and extracts the identity.
    ///
    /// # Errors
    /// Returns [`AppError::Validation`] when an alias is empty, contains
    /// characters outside `[A-Za-z0-9_-]`, or would not produce a safe
    /// PostgreSQL identifier.
    pub fn from_manifest(manifest: &AddonManifest) -> AppResult<Self> {
        manifest
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(Self {
            owner: manifest.calling_developer_alias.clone(),
            instance: manifest.instance_alias.clone(),
        })
    }

    pub fn database_name(&self) -> String {
        naming::derive_database_name(&self.owner, &self.instance)
    }

    pub fn login_name(&self) -> String {
        naming::derive_login_name(&self.owner, &self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(owner: &str, instance: &str) -> AddonManifest {
        AddonManifest {
            calling_developer_alias: owner.into(),
            instance_alias: instance.into(),
            properties: vec![],
        }
    }

    #[test]
    fn test_identity_derives_names() {
        let identity = TenantIdentity::from_manifest(&manifest("teamA", "inst1")).unwrap();
        assert_eq!(identity.database_name(), "teamA__inst1");
        assert_eq!(identity.login_name(), "DB_teamA__inst1");
    }

    #[test]
    fn test_empty_alias_rejected() {
        let err = TenantIdentity::from_manifest(&manifest("", "inst1")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_injection_attempt_rejected() {
        let err =
            TenantIdentity::from_manifest(&manifest("team", "x; DROP DATABASE postgres")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("instance_alias"));
    }

    #[test]
    fn test_overlong_names_rejected() {
        let long = "a".repeat(40);
        let err = TenantIdentity::from_manifest(&manifest(&long, &long)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "manifest": {
                "callingDeveloperAlias": "teamA",
                "instanceAlias": "inst1",
                "properties": [{ "key": "server", "value": "localhost" }]
            }
        }"#;
        let request: AddonRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.manifest.calling_developer_alias, "teamA");
        assert_eq!(request.manifest.properties, vec![AddonProperty::new("server", "localhost")]);
    }
}
