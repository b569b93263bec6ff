//! Utility functions and helpers.

pub mod credential;
pub mod identifier;
pub mod naming;

// Re-export commonly used items
pub use credential::generate_credential;
pub use identifier::{quote_identifier, quote_literal};
pub use naming::{derive_database_name, derive_login_name};
