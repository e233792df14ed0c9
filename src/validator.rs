//! Delegated TOML parsing: whole-document validation and value literals.
//!
//! The engine never interprets document semantics itself; it leans on the
//! `toml` parser to reject malformed input up front and to turn literal
//! snippets into structural values.

use crate::errors::PatchError;
use toml::{Table, Value};

/// Validate the full document, discarding the parsed form.
pub fn validate_document(text: &str) -> Result<(), PatchError> {
    text.parse::<Table>()
        .map_err(|err| PatchError::InvalidDocument {
            message: err.to_string(),
        })?;
    Ok(())
}

/// Parse a single TOML value literal via a synthetic `key = <literal>`
/// snippet.
pub fn parse_value_literal(source: &str) -> Result<Value, PatchError> {
    let snippet = format!("key = {source}\n");
    let mut table = snippet
        .parse::<Table>()
        .map_err(|err| PatchError::InvalidPayload {
            input: source.to_string(),
            message: err.to_string(),
        })?;
    table.remove("key").ok_or_else(|| PatchError::InvalidPayload {
        input: source.to_string(),
        message: "empty TOML value".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_and_rejects_documents() {
        assert!(validate_document("[a]\nx = 1\n").is_ok());
        assert!(matches!(
            validate_document("[a\nx = 1\n"),
            Err(PatchError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn parses_value_literals() {
        assert_eq!(parse_value_literal("42").unwrap(), Value::Integer(42));
        assert_eq!(
            parse_value_literal("\"x\"").unwrap(),
            Value::String("x".to_string())
        );
        assert!(matches!(
            parse_value_literal("[1, 2"),
            Err(PatchError::InvalidPayload { .. })
        ));
    }
}
