//! Content archive repackaging.
//!
//! The mini-game host only serves archive payloads carrying a `.bin`
//! extension. Two stages adapt the engine's archive directory:
//!
//! - [`rename::copy_archive_files`] copies every payload file into the target
//!   archive directory under its suffixed name.
//! - [`rewrite_manifest`] rewrites `archive_files.json` so every piece name
//!   refers to the suffixed file.
//!
//! Both stages use [`with_piece_suffix`], so the rewritten manifest always
//! names exactly the files the renamer produced.

pub mod manifest;
pub mod rename;

use std::path::Path;

pub use manifest::{ContentItem, Manifest, Piece};
pub use rename::copy_archive_files;

use crate::config::PackConfig;
use crate::report::{Stage, StageReport};
use crate::{Error, Result};

/// Suffix every archive payload file must carry on the host.
pub const PIECE_SUFFIX: &str = ".bin";

/// Name of the manifest inside the archive directory.
pub const MANIFEST_FILE: &str = "archive_files.json";

/// Extension of files the renamer passes through unchanged.
pub const JSON_SUFFIX: &str = ".json";

/// Returns `name` with [`PIECE_SUFFIX`] appended, or `None` if it already
/// ends with it.
///
/// ```rust
/// use minipack::archive::with_piece_suffix;
///
/// assert_eq!(with_piece_suffix("game.arcd0").as_deref(), Some("game.arcd0.bin"));
/// assert_eq!(with_piece_suffix("game.arcd0.bin"), None);
/// ```
pub fn with_piece_suffix(name: &str) -> Option<String> {
    if name.ends_with(PIECE_SUFFIX) {
        None
    } else {
        Some(format!("{name}{PIECE_SUFFIX}"))
    }
}

/// Reads the manifest at `source`, suffixes its piece names and writes it to
/// `target`.
///
/// Returns the number of bytes written.
pub fn rewrite_manifest_file(source: &Path, target: &Path) -> Result<u64> {
    let mut manifest = Manifest::load(source)?;
    let renamed = manifest.suffix_pieces();
    log::debug!(
        "{} of {} piece names suffixed in {}",
        renamed,
        manifest.pieces().count(),
        source.display()
    );
    manifest.save(target)
}

/// Manifest rewrite stage.
///
/// Reads `source/archive/archive_files.json` and writes the rewritten
/// manifest to `target/<project>/archive/archive_files.json`. A missing
/// source manifest skips the stage without touching the target tree.
pub fn rewrite_manifest(config: &PackConfig) -> StageReport {
    let report = StageReport::new(Stage::ArchiveManifest);
    let source = config.archive_source_dir().join(MANIFEST_FILE);
    let target_dir = config.archive_target_dir();
    let target = target_dir.join(MANIFEST_FILE);

    if !source.is_file() {
        return report.skip(Error::MissingInput {
            what: "archive manifest",
            path: source,
        });
    }

    if let Err(e) = crate::fs::ensure_dir(&target_dir) {
        return report.abort(e);
    }

    match rewrite_manifest_file(&source, &target) {
        Ok(bytes) => {
            let mut report = report;
            report.record_written(&source, &target, bytes);
            report
        }
        Err(e) => report.abort(e),
    }
}
