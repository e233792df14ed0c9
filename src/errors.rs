use thiserror::Error;

/// Failures surfaced while resolving and applying patches.
///
/// Each variant maps onto one process exit code so the CLI can report a
/// single diagnostic and stop.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("cannot read input: {message}")]
    UnreadableInput { message: String },

    #[error("invalid TOML document: {message}")]
    InvalidDocument { message: String },

    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error("ambiguous path: {path}")]
    AmbiguousPath { path: String },

    #[error("invalid payload '{input}': {message}")]
    InvalidPayload { input: String, message: String },

    #[error("cannot delete the document root")]
    RootDeletionRefused,

    #[error("cannot write output: {message}")]
    UnwritableOutput { message: String },
}

impl PatchError {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            PatchError::UnreadableInput { .. } | PatchError::InvalidDocument { .. } => 1,
            PatchError::PathNotFound { .. } => 2,
            PatchError::AmbiguousPath { .. } => 3,
            PatchError::InvalidPayload { .. } | PatchError::RootDeletionRefused => 4,
            PatchError::UnwritableOutput { .. } => 5,
        }
    }
}
