//! Deterministic tenant naming.
//!
//! The functions here only format; validation lives in
//! [`identifier`](super::identifier) and quoting happens when SQL is rendered.

/// Separator between owner and instance aliases.
pub const ALIAS_SEPARATOR: &str = "__";

/// Prefix distinguishing tenant logins from tenant databases.
pub const LOGIN_PREFIX: &str = "DB_";

/// Returns `"{owner}__{instance}"`.
pub fn derive_database_name(owner: &str, instance: &str) -> String {
    format!("{owner}{ALIAS_SEPARATOR}{instance}")
}

/// Returns `"DB_{owner}__{instance}"`.
pub fn derive_login_name(owner: &str, instance: &str) -> String {
    format!("{LOGIN_PREFIX}{}", derive_database_name(owner, instance))
}
