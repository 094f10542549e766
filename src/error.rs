//! Error types for packaging operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when repackaging a WebAssembly build, along with a
//! convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! Fallible building blocks (manifest loading, compression, configuration)
//! return `Result<T, Error>`. The pipeline stages themselves never return an
//! error: they fold failures into a [`StageReport`] so that one stage's
//! failure never prevents the others from running.
//!
//! ```rust,no_run
//! use minipack::{Error, archive::Manifest};
//!
//! fn load(path: &str) -> minipack::Result<Manifest> {
//!     match Manifest::load(path) {
//!         Ok(manifest) => Ok(manifest),
//!         Err(Error::Manifest { path, source }) => {
//!             eprintln!("{} is not a valid manifest: {}", path.display(), source);
//!             Err(Error::Manifest { path, source })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! [`StageReport`]: crate::report::StageReport

use std::io;
use std::path::PathBuf;

/// The main error type for packaging operations.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io], [`FileIo`][Self::FileIo] | Unreadable or unwritable files |
/// | Data | [`Manifest`][Self::Manifest] | Malformed archive manifest JSON |
/// | Codec | [`Compression`][Self::Compression] | Brotli encoder failure |
/// | Configuration | [`InvalidLevel`][Self::InvalidLevel] | Bad command-line values |
/// | Missing input | [`MissingInput`][Self::MissingInput] | Optional input not present |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An I/O error tied to a specific file or directory.
    #[error("{}: {source}", .path.display())]
    FileIo {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The archive manifest could not be parsed or serialized.
    ///
    /// Aborts only the manifest rewrite stage.
    #[error("Invalid manifest {}: {source}", .path.display())]
    Manifest {
        /// The manifest path.
        path: PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The compression backend failed.
    #[error("Compression failed: {0}")]
    Compression(String),

    /// The requested compression level is outside the supported range.
    #[error("Invalid compression level {level}: expected 0-{max}", max = crate::codec::MAX_LEVEL)]
    InvalidLevel {
        /// The rejected level.
        level: u32,
    },

    /// An optional input is not present.
    ///
    /// Stages treat this as a warning and do nothing.
    #[error("{what} not found: {}", .path.display())]
    MissingInput {
        /// A short description of the missing input.
        what: &'static str,
        /// Where it was looked for.
        path: PathBuf,
    },
}

impl Error {
    /// Wraps an I/O error with the path it occurred on.
    pub fn file_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error only signals a missing optional input.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingInput { .. })
    }
}

/// A specialized Result type for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;
