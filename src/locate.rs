//! Path resolution: map a dotted path to its owning section and, for a
//! terminal key, to the exact line span of the assignment.

use crate::errors::PatchError;
use crate::index::{Header, HeaderKind};
use crate::path::{dotted, PathSegment};
use crate::scan::{find_unquoted, split_path_tokens, unquote_key, value_end_line};

/// Inclusive line span of one `key = value` assignment, with the key
/// segments as written on that line (unquoted), kept for re-emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSpan {
    pub start: usize,
    pub end: usize,
    pub key_segments: Vec<String>,
}

/// Resolve the section owning `table_path`.
///
/// An empty path resolves to the synthetic root. An explicit `[index]` on
/// the final segment requires the matching array-of-tables occurrence.
/// Without one, a plain table wins, a single array occurrence is accepted,
/// and several demand an explicit index. A path carried by both a plain
/// table and an array of tables is reported ambiguous rather than silently
/// preferring either.
pub fn resolve_section<'a>(
    headers: &'a [Header],
    table_path: &[PathSegment],
) -> Result<&'a Header, PatchError> {
    if table_path.is_empty() {
        return Ok(headers
            .iter()
            .find(|header| header.kind == HeaderKind::Root)
            .expect("root header is always indexed"));
    }

    let names: Vec<&str> = table_path.iter().map(|segment| segment.name.as_str()).collect();
    let path_matches =
        |header: &Header| header.path.iter().map(String::as_str).eq(names.iter().copied());

    if let Some(wanted) = table_path.last().and_then(|segment| segment.index) {
        return headers
            .iter()
            .find(|header| {
                header.kind == HeaderKind::ArrayEntry
                    && header.occurrence == Some(wanted)
                    && path_matches(header)
            })
            .ok_or_else(|| PatchError::PathNotFound {
                path: dotted(table_path),
            });
    }

    let mut table_match = None;
    let mut array_matches = Vec::new();
    for header in headers {
        match header.kind {
            HeaderKind::Table if path_matches(header) => table_match = Some(header),
            HeaderKind::ArrayEntry if path_matches(header) => array_matches.push(header),
            _ => {}
        }
    }

    match (table_match, array_matches.as_slice()) {
        (Some(header), []) => Ok(header),
        (None, [single]) => Ok(*single),
        (None, []) => Err(PatchError::PathNotFound {
            path: dotted(table_path),
        }),
        _ => Err(PatchError::AmbiguousPath {
            path: dotted(table_path),
        }),
    }
}

/// Locate the assignment owning `path` inside its resolved section.
///
/// Scans the section's owned lines, skipping blanks, comments, and header
/// lines; each candidate line's key segments are prefixed with the owning
/// header's identity and compared for exact segment equality. Zero matches
/// is not-found, several matches (a malformed document with duplicate
/// keys) is ambiguous.
pub fn locate_assignment(
    lines: &[String],
    headers: &[Header],
    path: &[PathSegment],
) -> Result<AssignmentSpan, PatchError> {
    let Some((_, table_path)) = path.split_last() else {
        return Err(PatchError::PathNotFound {
            path: String::new(),
        });
    };

    let section = resolve_section(headers, table_path)?;
    let identity = section.identity_segments();

    let mut matches = Vec::new();
    for i in section.content_start..section.content_end.min(lines.len()) {
        let line = &lines[i];
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            continue;
        }
        let Some(eq_idx) = find_unquoted(line, '=') else {
            continue;
        };
        let key_segments: Vec<String> = split_path_tokens(&line[..eq_idx])
            .iter()
            .map(|token| unquote_key(token))
            .collect();
        if key_segments.is_empty() {
            continue;
        }

        let full: Vec<PathSegment> = identity
            .iter()
            .cloned()
            .chain(key_segments.iter().map(|name| PathSegment::named(name.as_str())))
            .collect();
        if full.as_slice() == path {
            let end = value_end_line(lines, i, eq_idx + 1);
            matches.push(AssignmentSpan {
                start: i,
                end,
                key_segments,
            });
        }
    }

    match matches.len() {
        0 => Err(PatchError::PathNotFound { path: dotted(path) }),
        1 => Ok(matches.pop().expect("checked length")),
        _ => Err(PatchError::AmbiguousPath { path: dotted(path) }),
    }
}
