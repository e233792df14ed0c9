//! Header indexing: scan the document's physical lines for `[table]` and
//! `[[array.of.tables]]` headers and compute each section's owned span.

use crate::path::PathSegment;
use crate::scan::{find_unquoted, split_path_tokens, unquote_key};
use std::collections::HashMap;

/// What kind of section a [`Header`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Synthetic section covering everything before the first real header.
    Root,
    /// `[a.b]`
    Table,
    /// One `[[a.b]]` occurrence, numbered 0-based in document order.
    ArrayEntry,
}

/// A section found in the document, with its owned content span.
///
/// `content_start..content_end` excludes the header line itself. For real
/// headers the span is trimmed backward past trailing blank/comment-only
/// lines; those belong to whatever section follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kind: HeaderKind,
    pub path: Vec<String>,
    /// Occurrence number for `ArrayEntry` headers.
    pub occurrence: Option<usize>,
    /// Physical line of the header; `None` for the root.
    pub line: Option<usize>,
    pub content_start: usize,
    /// Exclusive.
    pub content_end: usize,
}

impl Header {
    /// Identity segments prepended to line-local key segments when
    /// matching full paths. The root contributes nothing; an array entry
    /// carries its occurrence index on the final segment.
    pub fn identity_segments(&self) -> Vec<PathSegment> {
        match self.kind {
            HeaderKind::Root => Vec::new(),
            HeaderKind::Table => self
                .path
                .iter()
                .map(|name| PathSegment::named(name.as_str()))
                .collect(),
            HeaderKind::ArrayEntry => {
                let (last, init) = self.path.split_last().expect("array header has a path");
                let mut segments: Vec<PathSegment> = init
                    .iter()
                    .map(|name| PathSegment::named(name.as_str()))
                    .collect();
                segments.push(PathSegment::indexed(
                    last.as_str(),
                    self.occurrence.unwrap_or(0),
                ));
                segments
            }
        }
    }
}

/// True for lines that are blank or comment-only.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a header line into `(is_array, path names)`.
///
/// A line that does not form a complete header is content, not an error;
/// malformed documents were already rejected by whole-document
/// validation. The closing bracket is located with the
/// quote-aware scanner so a quoted `]` inside a key does not end the
/// header, and a trailing inline comment is allowed.
fn parse_header_line(line: &str) -> Option<(bool, Vec<String>)> {
    let trimmed = line.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    let is_array = trimmed.starts_with("[[");
    let rest = &trimmed[if is_array { 2 } else { 1 }..];

    let close = find_unquoted(rest, ']')?;
    let mut tail = &rest[close + 1..];
    if is_array {
        tail = tail.strip_prefix(']')?;
    }
    let tail = tail.trim_start();
    if !tail.is_empty() && !tail.starts_with('#') {
        return None;
    }

    let path = split_path_tokens(rest[..close].trim())
        .iter()
        .map(|token| unquote_key(token))
        .collect();
    Some((is_array, path))
}

/// Scan physical lines and produce the ordered header list, root first.
///
/// Array-of-table headers sharing a dotted path receive strictly
/// increasing occurrence indices in document order.
pub fn index_headers(lines: &[String]) -> Vec<Header> {
    let mut headers = vec![Header {
        kind: HeaderKind::Root,
        path: Vec::new(),
        occurrence: None,
        line: None,
        content_start: 0,
        content_end: 0,
    }];
    let mut array_counters: HashMap<Vec<String>, usize> = HashMap::new();

    for (i, line) in lines.iter().enumerate() {
        let Some((is_array, path)) = parse_header_line(line) else {
            continue;
        };
        let occurrence = if is_array {
            let counter = array_counters.entry(path.clone()).or_insert(0);
            let index = *counter;
            *counter += 1;
            Some(index)
        } else {
            None
        };
        headers.push(Header {
            kind: if is_array {
                HeaderKind::ArrayEntry
            } else {
                HeaderKind::Table
            },
            path,
            occurrence,
            line: Some(i),
            content_start: i + 1,
            content_end: i + 1,
        });
    }

    for idx in 0..headers.len() {
        let next_start = match headers.get(idx + 1) {
            Some(next) => next.line.unwrap_or(lines.len()),
            None => lines.len(),
        };
        let header = &mut headers[idx];
        let mut end = next_start;
        if header.kind != HeaderKind::Root {
            while end > header.content_start && is_blank_or_comment(&lines[end - 1]) {
                end -= 1;
            }
        }
        header.content_end = end;
    }

    headers
}
