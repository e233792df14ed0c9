//! Patch specifications and the pure line transformations they drive.
//!
//! Every operation takes the current line sequence and returns a new one;
//! nothing here mutates shared state. Each operation re-indexes headers so
//! it observes the line numbers produced by earlier edits.

use crate::errors::PatchError;
use crate::format::{format_key_path, format_value};
use crate::index::{index_headers, is_blank_or_comment, HeaderKind};
use crate::locate::{locate_assignment, resolve_section};
use crate::path::{parse_path, PathSegment};
use crate::scan::find_unquoted;
use crate::validator::parse_value_literal;
use toml::Value;

/// Request to replace one assignment's value.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPatch {
    pub path: Vec<PathSegment>,
    pub value: Value,
    pub comment: Option<String>,
}

impl SetPatch {
    /// Parse a `path = TOML_VALUE [# inline comment]` payload.
    pub fn parse(spec: &str) -> Result<Self, PatchError> {
        let eq = find_unquoted(spec, '=').ok_or_else(|| PatchError::InvalidPayload {
            input: spec.to_string(),
            message: "missing '='".to_string(),
        })?;
        let path_part = spec[..eq].trim();
        if path_part.is_empty() {
            return Err(PatchError::InvalidPayload {
                input: spec.to_string(),
                message: "empty path before '='".to_string(),
            });
        }

        let rhs = spec[eq + 1..].trim();
        let (value_src, comment) = match find_unquoted(rhs, '#') {
            Some(hash) => (
                rhs[..hash].trim_end(),
                Some(rhs[hash + 1..].trim().to_string()),
            ),
            None => (rhs, None),
        };
        if value_src.is_empty() {
            return Err(PatchError::InvalidPayload {
                input: spec.to_string(),
                message: "empty TOML value".to_string(),
            });
        }

        Ok(Self {
            path: parse_path(path_part)?,
            value: parse_value_literal(value_src)?,
            comment,
        })
    }
}

/// Request to remove one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteKeyPatch {
    pub path: Vec<PathSegment>,
}

impl DeleteKeyPatch {
    pub fn parse(spec: &str) -> Result<Self, PatchError> {
        Ok(Self {
            path: parse_path(spec)?,
        })
    }
}

/// Request to remove a section header and its owned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSectionPatch {
    pub path: Vec<PathSegment>,
}

impl DeleteSectionPatch {
    pub fn parse(spec: &str) -> Result<Self, PatchError> {
        Ok(Self {
            path: parse_path(spec)?,
        })
    }
}

/// Replace the resolved assignment's span with one canonical line.
pub fn apply_set(lines: &[String], patch: &SetPatch) -> Result<Vec<String>, PatchError> {
    let headers = index_headers(lines);
    let span = locate_assignment(lines, &headers, &patch.path)?;

    let lhs = format_key_path(&span.key_segments);
    let rhs = format_value(&patch.value);
    let new_line = match patch.comment.as_deref() {
        Some(comment) if !comment.is_empty() => format!("{lhs} = {rhs} # {comment}\n"),
        _ => format!("{lhs} = {rhs}\n"),
    };

    let mut out = Vec::with_capacity(lines.len());
    out.extend_from_slice(&lines[..span.start]);
    out.push(new_line);
    out.extend_from_slice(&lines[span.end + 1..]);
    Ok(out)
}

/// Remove the resolved assignment's lines entirely.
pub fn apply_delete_key(lines: &[String], patch: &DeleteKeyPatch) -> Result<Vec<String>, PatchError> {
    let headers = index_headers(lines);
    let span = locate_assignment(lines, &headers, &patch.path)?;

    let mut out = Vec::with_capacity(lines.len());
    out.extend_from_slice(&lines[..span.start]);
    out.extend_from_slice(&lines[span.end + 1..]);
    Ok(out)
}

/// Remove a section from its header line through its trimmed owned
/// content, leaving trailing blank/comment lines for the next section.
pub fn apply_delete_section(
    lines: &[String],
    patch: &DeleteSectionPatch,
) -> Result<Vec<String>, PatchError> {
    let headers = index_headers(lines);
    let section = resolve_section(&headers, &patch.path)?;
    if section.kind == HeaderKind::Root {
        return Err(PatchError::RootDeletionRefused);
    }
    let header_line = section.line.expect("non-root header has a line");

    let mut out = Vec::with_capacity(lines.len());
    out.extend_from_slice(&lines[..header_line]);
    out.extend_from_slice(&lines[section.content_end..]);
    Ok(out)
}

/// Replace the leading blank/comment run with a fresh comment block.
///
/// Each replacement line is prefixed with `# ` (a bare `#` for blank
/// lines), and a single blank line separates the block from the rest of
/// the document.
pub fn replace_top_comment(lines: &[String], text: &str) -> Vec<String> {
    let mut keep = 0;
    while keep < lines.len() && is_blank_or_comment(&lines[keep]) {
        keep += 1;
    }

    let mut out = Vec::with_capacity(lines.len());
    for raw in text.lines() {
        if raw.trim().is_empty() {
            out.push("#\n".to_string());
        } else {
            out.push(format!("# {}\n", raw.trim_end()));
        }
    }
    out.push("\n".to_string());
    out.extend_from_slice(&lines[keep..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(str::to_string).collect()
    }

    fn text(lines: &[String]) -> String {
        lines.concat()
    }

    #[test]
    fn set_payload_splits_value_and_comment() {
        let patch = SetPatch::parse("logger.level = 6 # disable").unwrap();
        assert_eq!(patch.value, Value::Integer(6));
        assert_eq!(patch.comment.as_deref(), Some("disable"));

        let quoted = SetPatch::parse("msg = \"a # b\"").unwrap();
        assert_eq!(quoted.value, Value::String("a # b".to_string()));
        assert_eq!(quoted.comment, None);
    }

    #[test]
    fn set_payload_rejects_malformed_specs() {
        assert!(matches!(
            SetPatch::parse("no equals here"),
            Err(PatchError::InvalidPayload { .. })
        ));
        assert!(matches!(
            SetPatch::parse("path = "),
            Err(PatchError::InvalidPayload { .. })
        ));
        assert!(matches!(
            SetPatch::parse(" = 1"),
            Err(PatchError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn set_rewrites_only_the_target_line() {
        let doc = lines("[a]\n\nx   =   1   # old\ny = 2\n");
        let patch = SetPatch::parse("a.x = 42").unwrap();
        let out = apply_set(&doc, &patch).unwrap();
        assert_eq!(text(&out), "[a]\n\nx = 42\ny = 2\n");
    }

    #[test]
    fn set_collapses_multiline_value_to_one_line() {
        let doc = lines("[a]\nlist = [\n  1,\n  2,\n]\nafter = true\n");
        let patch = SetPatch::parse("a.list = [3]").unwrap();
        let out = apply_set(&doc, &patch).unwrap();
        assert_eq!(text(&out), "[a]\nlist = [3]\nafter = true\n");
    }

    #[test]
    fn delete_key_removes_the_whole_span() {
        let doc = lines("[a]\nlist = [\n  1,\n]\nkeep = 1\n");
        let patch = DeleteKeyPatch::parse("a.list").unwrap();
        let out = apply_delete_key(&doc, &patch).unwrap();
        assert_eq!(text(&out), "[a]\nkeep = 1\n");
    }

    #[test]
    fn delete_section_requires_index_for_repeated_arrays() {
        let doc = lines("[[s]]\nh = 1\n[[s]]\nh = 2\n");
        let ambiguous = DeleteSectionPatch::parse("s").unwrap();
        assert!(matches!(
            apply_delete_section(&doc, &ambiguous),
            Err(PatchError::AmbiguousPath { .. })
        ));

        let indexed = DeleteSectionPatch::parse("s[0]").unwrap();
        let out = apply_delete_section(&doc, &indexed).unwrap();
        assert_eq!(text(&out), "[[s]]\nh = 2\n");
    }

    #[test]
    fn delete_section_refuses_the_root() {
        let doc = lines("x = 1\n");
        let patch = DeleteSectionPatch { path: Vec::new() };
        assert!(matches!(
            apply_delete_section(&doc, &patch),
            Err(PatchError::RootDeletionRefused)
        ));
    }

    #[test]
    fn top_comment_replaces_leading_run() {
        let doc = lines("# old one\n# old two\n\nkey = 1\n");
        let out = replace_top_comment(&doc, "fresh\n\nnotes");
        assert_eq!(text(&out), "# fresh\n#\n# notes\n\nkey = 1\n");
    }

    #[test]
    fn top_comment_on_document_without_one() {
        let doc = lines("key = 1\n");
        let out = replace_top_comment(&doc, "added");
        assert_eq!(text(&out), "# added\n\nkey = 1\n");
    }
}
