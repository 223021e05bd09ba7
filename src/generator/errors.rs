//! Error taxonomy for the suite generator
//!
//! Every failure here is fatal: a partially generated suite would silently
//! under-test the compiler it exercises, so no variant is recoverable and
//! no retries are performed. Errors propagate to the CLI boundary, which
//! prints them and exits non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required input was missing before any work started.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A test-data directory could not be listed, or the root was empty.
    #[error("failed to discover test sources in '{path}': {reason}")]
    Discovery { path: PathBuf, reason: String },

    /// The external compiler rejected a source unit.
    ///
    /// The message carries the offending file's path and the full rewritten
    /// source text so the failure can be reproduced outside the generator.
    #[error("cannot compile {path}\n{source_text}")]
    Compilation {
        path: PathBuf,
        source_text: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

impl GeneratorError {
    /// Wrap an underlying compiler failure with the context the operator
    /// needs to reproduce it: the file path and the rewritten text that was
    /// actually handed to the compiler.
    pub fn compilation(
        path: impl Into<PathBuf>,
        source_text: impl Into<String>,
        cause: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Compilation {
            path: path.into(),
            source_text: source_text.into(),
            cause,
        }
    }
}
