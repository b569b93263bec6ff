//! Safe embedding of tenant names into administrative SQL.
//!
//! PostgreSQL cannot bind identifiers as parameters, so names are validated
//! up front and double-quoted when rendered.

use std::borrow::Cow;

use validator::ValidationError;

use crate::models::AddonManifest;
use crate::utils::naming::{derive_login_name, ALIAS_SEPARATOR};

/// PostgreSQL truncates identifiers beyond `NAMEDATALEN - 1` bytes.
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Checks a single alias.
///
/// Allowed: ASCII letters, digits, `_` and `-`. An alias may not start or end
/// with `_` and may not contain `__`, which keeps the separator unambiguous.
pub fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.is_empty() {
        return Err(alias_error("alias must not be empty"));
    }
    if let Some(c) = alias
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(alias_error(format!("alias contains forbidden character {c:?}")));
    }
    if alias.starts_with('_') || alias.ends_with('_') || alias.contains(ALIAS_SEPARATOR) {
        return Err(alias_error(format!(
            "alias must not start or end with '_' or contain '{ALIAS_SEPARATOR}'"
        )));
    }
    Ok(())
}

/// Checks that the derived login name fits in a PostgreSQL identifier.
/// The database name is always shorter than the login name.
pub fn validate_derived_names(manifest: &AddonManifest) -> Result<(), ValidationError> {
    let login = derive_login_name(&manifest.calling_developer_alias, &manifest.instance_alias);
    if login.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::new("identifier_length").with_message(Cow::Owned(format!(
            "derived login name is {} bytes, limit is {MAX_IDENTIFIER_LEN}",
            login.len()
        ))));
    }
    Ok(())
}

fn alias_error(message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new("alias").with_message(message.into())
}

/// Renders `name` as a quoted identifier, doubling embedded `"`.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders `value` as a string literal, doubling embedded `'`.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_aliases_pass() {
        assert!(validate_alias("teamA").is_ok());
        assert!(validate_alias("my-app_2").is_ok());
    }

    #[test]
    fn test_forbidden_characters() {
        assert!(validate_alias("a b").is_err());
        assert!(validate_alias("a;b").is_err());
        assert!(validate_alias("a\"b").is_err());
        assert!(validate_alias("ä").is_err());
    }

    #[test]
    fn test_separator_ambiguity_rejected() {
        assert!(validate_alias("A__inst1").is_err());
        assert!(validate_alias("_a").is_err());
        assert!(validate_alias("a_").is_err());
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("teamA__inst1"), "\"teamA__inst1\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("abc"), "'abc'");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
