//! Archive payload renaming.
//!
//! Copies the flat `archive` directory of the engine build into the target
//! tree, giving every payload file the `.bin` suffix the host requires.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

use super::{JSON_SUFFIX, MANIFEST_FILE, PIECE_SUFFIX};
use crate::Error;
use crate::config::PackConfig;
use crate::report::{Stage, StageReport};

/// What the renamer does with a file from the source archive directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveFile {
    /// `archive_files.json`; written by the manifest rewrite stage instead.
    Manifest,
    /// Other JSON files, copied under their own name.
    Json,
    /// A payload piece, copied under the given suffixed name.
    Piece(OsString),
}

impl ArchiveFile {
    /// Classifies a file by name.
    pub fn classify(name: &OsStr) -> Self {
        let bytes = name.as_encoded_bytes();
        if name == MANIFEST_FILE {
            Self::Manifest
        } else if bytes.ends_with(JSON_SUFFIX.as_bytes()) {
            Self::Json
        } else {
            Self::Piece(piece_file_name(name))
        }
    }
}

/// Returns the on-disk name of a payload piece.
///
/// Same rule as [`with_piece_suffix`](super::with_piece_suffix): the suffix
/// is appended unless already present.
pub fn piece_file_name(name: &OsStr) -> OsString {
    let mut renamed = name.to_os_string();
    if !name.as_encoded_bytes().ends_with(PIECE_SUFFIX.as_bytes()) {
        renamed.push(PIECE_SUFFIX);
    }
    renamed
}

/// Archive renaming stage.
///
/// Copies every regular file of `source/archive` into
/// `target/<project>/archive`: JSON files keep their name, everything else
/// gets the `.bin` suffix. Sub-directories are ignored. A file that cannot
/// be read or written is reported and skipped.
///
/// Two source files can map to the same name (`data` and `data.bin`). The
/// first one in name order keeps it; the others are reported and skipped
/// rather than overwriting it.
pub fn copy_archive_files(config: &PackConfig) -> StageReport {
    let mut report = StageReport::new(Stage::ArchiveFiles);
    let source_dir = config.archive_source_dir();
    let target_dir = config.archive_target_dir();

    if !source_dir.is_dir() {
        return report.skip(Error::MissingInput {
            what: "archive directory",
            path: source_dir,
        });
    }

    let files = match crate::fs::list_files(&source_dir) {
        Ok(files) => files,
        Err(e) => return report.abort(e),
    };

    if let Err(e) = crate::fs::ensure_dir(&target_dir) {
        return report.abort(e);
    }

    let mut claimed: HashMap<OsString, OsString> = HashMap::new();
    for file in files {
        let target_name = match ArchiveFile::classify(&file.name) {
            ArchiveFile::Manifest => {
                log::debug!("Leaving {} to the manifest rewrite", file.path.display());
                continue;
            }
            ArchiveFile::Json => file.name.clone(),
            ArchiveFile::Piece(name) => name,
        };

        if let Some(owner) = claimed.get(&target_name) {
            report.record_failure(
                &file.path,
                format!(
                    "target name {} is already taken by {}",
                    target_name.to_string_lossy(),
                    owner.to_string_lossy()
                ),
            );
            continue;
        }
        claimed.insert(target_name.clone(), file.name.clone());

        let target = target_dir.join(&target_name);
        match crate::fs::copy(&file.path, &target) {
            Ok(bytes) => report.record_written(&file.path, &target, bytes),
            Err(e) => report.record_failure(&file.path, e),
        }
    }

    report
}
