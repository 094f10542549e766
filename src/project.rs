//! Project discovery.
//!
//! The engine's HTML5 bundle names its loader script after the project:
//! `<project>_wasm.js`. The project name drives the output directory and the
//! `{projectName}` placeholder in templates.

use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// File name suffix identifying a generated loader script.
pub const LOADER_SUFFIX: &str = "_wasm.js";

/// Lists the loader scripts in `source_dir`, sorted by path.
///
/// Only the top level of `source_dir` is searched.
///
/// # Errors
///
/// Returns an error if `source_dir` is not valid UTF-8 or cannot be listed.
pub fn find_loader_scripts(source_dir: &Path) -> Result<Vec<PathBuf>> {
    let dir = source_dir.to_str().ok_or_else(|| {
        Error::file_io(
            source_dir,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not valid UTF-8"),
        )
    })?;
    let pattern = format!("{}/*{}", glob::Pattern::escape(dir), LOADER_SUFFIX);

    let paths = glob::glob(&pattern).map_err(|e| {
        Error::file_io(
            source_dir,
            io::Error::new(io::ErrorKind::InvalidInput, e.msg),
        )
    })?;

    let mut scripts = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::file_io(path, io::Error::from(e))
        })?;
        if path.is_file() {
            scripts.push(path);
        }
    }
    // glob yields alphabetical order already; keep it explicit
    scripts.sort();
    Ok(scripts)
}

/// Derives the project name from a loader script path.
///
/// Returns `None` if the file name does not end with [`LOADER_SUFFIX`].
pub fn project_name_from(script: &Path) -> Option<String> {
    script
        .file_name()?
        .to_str()?
        .strip_suffix(LOADER_SUFFIX)
        .map(str::to_string)
}

/// Discovers the project name from the first loader script in `source_dir`.
///
/// When several scripts exist the lexicographically first one wins.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] if no loader script exists, or an I/O
/// error if the directory cannot be searched.
pub fn discover_project_name(source_dir: &Path) -> Result<String> {
    let scripts = find_loader_scripts(source_dir)?;
    if scripts.len() > 1 {
        log::debug!(
            "{} loader scripts in {}, using the first",
            scripts.len(),
            source_dir.display()
        );
    }

    scripts
        .iter()
        .find_map(|script| project_name_from(script))
        .ok_or_else(|| Error::MissingInput {
            what: "*_wasm.js loader script",
            path: source_dir.to_path_buf(),
        })
}
