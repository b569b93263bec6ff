//! Shared data models.

pub mod addon;
pub mod operation;

pub use addon::{AddonManifest, AddonProperty, AddonRequest, TenantIdentity};
pub use operation::{OperationKind, OperationResult};
