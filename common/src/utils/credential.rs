//! Tenant credential generation.

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Length of a generated credential: SHA-256 rendered as hex.
pub const CREDENTIAL_LENGTH: usize = 64;

/// Generates a fresh password for a tenant login.
///
/// The digest input is the current timestamp joined with a random v4 UUID, so
/// the output carries the UUID's 122 random bits and never depends on the
/// tenant. Callers must not log the returned value.
pub fn generate_credential() -> String {
    let seed = format!(
        "{}__{}",
        Utc::now().timestamp_nanos_opt().unwrap_or_default(),
        Uuid::new_v4()
    );
    hex::encode(Sha256::digest(seed.as_bytes()))
}
