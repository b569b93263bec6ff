//! Shared building blocks for the PostgreSQL tenant provisioning service.
//!
//! - [`config`]: service settings and admin connection parameters
//! - [`errors`]: the error taxonomy surfaced to callers
//! - [`models`]: inbound manifests and outbound operation results
//! - [`utils`]: name derivation, credential generation and SQL quoting

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
