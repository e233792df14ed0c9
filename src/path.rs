use crate::errors::PatchError;
use crate::scan::{split_index_suffix, split_path_tokens, unquote_key};
use std::fmt;

/// One component of a dotted patch path.
///
/// `index` addresses a specific array-of-tables occurrence (`servers[1]`).
/// Equality is exact on both fields: `servers` and `servers[0]` are
/// distinct segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub name: String,
    pub index: Option<usize>,
}

impl PathSegment {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parse a caller-supplied dotted path with optional quoted keys and
/// `[index]` suffixes, e.g. `servers[1].host` or `"my.key".child`.
///
/// The index suffix is recognized on the raw token, so a quoted name may
/// itself contain brackets without being misread.
pub fn parse_path(input: &str) -> Result<Vec<PathSegment>, PatchError> {
    let tokens = split_path_tokens(input);
    if tokens.is_empty() {
        return Err(PatchError::InvalidPayload {
            input: input.to_string(),
            message: "empty path".to_string(),
        });
    }

    let mut segments = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if token.is_empty() {
            return Err(PatchError::InvalidPayload {
                input: input.to_string(),
                message: "empty path segment".to_string(),
            });
        }
        let segment = match split_index_suffix(token) {
            Some((name, index)) => PathSegment::indexed(unquote_key(name), index),
            None => PathSegment::named(unquote_key(token)),
        };
        segments.push(segment);
    }
    Ok(segments)
}

/// Dotted rendering of a segment sequence, for diagnostics.
pub fn dotted(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_basic() {
        let path = parse_path("logger.stdout_level").unwrap();
        assert_eq!(
            path,
            vec![PathSegment::named("logger"), PathSegment::named("stdout_level")]
        );
    }

    #[test]
    fn parse_path_with_index_and_quotes() {
        let path = parse_path("\"my.key\".servers[1].host").unwrap();
        assert_eq!(
            path,
            vec![
                PathSegment::named("my.key"),
                PathSegment::indexed("servers", 1),
                PathSegment::named("host"),
            ]
        );
    }

    #[test]
    fn parse_path_rejects_empty_segment() {
        assert!(matches!(
            parse_path("a..b"),
            Err(PatchError::InvalidPayload { .. })
        ));
        assert!(matches!(
            parse_path(""),
            Err(PatchError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn dotted_renders_indices() {
        let path = parse_path("servers[1].host").unwrap();
        assert_eq!(dotted(&path), "servers[1].host");
    }
}
