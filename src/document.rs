//! The in-memory document and the driver that applies patch batches.

use crate::errors::PatchError;
use crate::ops::{
    apply_delete_key, apply_delete_section, apply_set, replace_top_comment, DeleteKeyPatch,
    DeleteSectionPatch, SetPatch,
};
use crate::validator::validate_document;

/// One invocation's worth of requested edits, applied in fixed group
/// order: top comment, then sets, then key deletions, then section
/// deletions.
#[derive(Debug, Clone, Default)]
pub struct PatchBatch {
    pub top_comment: Option<String>,
    pub sets: Vec<SetPatch>,
    pub delete_keys: Vec<DeleteKeyPatch>,
    pub delete_sections: Vec<DeleteSectionPatch>,
}

impl PatchBatch {
    pub fn is_empty(&self) -> bool {
        self.top_comment.is_none()
            && self.sets.is_empty()
            && self.delete_keys.is_empty()
            && self.delete_sections.is_empty()
    }
}

/// A TOML document held as physical lines, each keeping its own
/// terminator so untouched lines round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TomlDocument {
    lines: Vec<String>,
}

impl TomlDocument {
    /// Validate `text` with the delegated parser and take it over as
    /// lines.
    pub fn parse(text: &str) -> Result<Self, PatchError> {
        validate_document(text)?;
        Ok(Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Apply a whole batch. Every operation re-resolves its path against
    /// the lines produced by the previous one; the first failure aborts
    /// and leaves the document unchanged.
    pub fn apply(&mut self, batch: &PatchBatch) -> Result<(), PatchError> {
        let mut lines = self.lines.clone();

        if let Some(text) = &batch.top_comment {
            lines = replace_top_comment(&lines, text);
        }
        for patch in &batch.sets {
            lines = apply_set(&lines, patch)?;
        }
        for patch in &batch.delete_keys {
            lines = apply_delete_key(&lines, patch)?;
        }
        for patch in &batch.delete_sections {
            lines = apply_delete_section(&lines, patch)?;
        }

        self.lines = lines;
        Ok(())
    }
}
