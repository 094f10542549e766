//! Filesystem helpers shared by the stages.
//!
//! All helpers attach the offending path to I/O errors so stage reports can
//! name the file that failed.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::file_io(dir, e))
}

/// Reads a whole file.
pub fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::file_io(path, e))
}

/// Writes `data` to `path`, replacing any existing file.
pub fn write(path: &Path, data: &[u8]) -> Result<u64> {
    std::fs::write(path, data).map_err(|e| Error::file_io(path, e))?;
    Ok(data.len() as u64)
}

/// Copies `source` to `target` byte for byte and returns the size.
pub fn copy(source: &Path, target: &Path) -> Result<u64> {
    let data = read(source)?;
    write(target, &data)
}

/// A regular file found directly inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// File name component.
    pub name: std::ffi::OsString,
}

/// Lists the non-directory entries of `dir`, sorted by name.
///
/// Sub-directories are skipped and not descended into. An entry whose type
/// cannot be determined is listed, so a later read reports it.
pub fn list_files(dir: &Path) -> Result<Vec<DirFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::file_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::file_io(dir, e))?;
        if entry.file_type().is_ok_and(|ft| ft.is_dir()) {
            continue;
        }
        files.push(DirFile {
            path: entry.path(),
            name: entry.file_name(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}
