//! Run configuration.
//!
//! A [`PackConfig`] is built once at startup and passed by reference into
//! every stage. Nothing in the crate keeps process-wide state.

use std::path::{Path, PathBuf};

use crate::Result;
use crate::codec;
use crate::project;

/// Name of the archive directory inside the source and target trees.
pub const ARCHIVE_DIR: &str = "archive";

/// Configuration for one packaging run.
///
/// # Example
///
/// ```rust
/// use minipack::PackConfig;
///
/// let config = PackConfig::new("build/wasm-web", "dist", "wx1234567890")
///     .project_name("mygame")
///     .compression_level(9)
///     .unwrap();
///
/// assert_eq!(config.final_target_dir(), std::path::Path::new("dist/mygame"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    source_dir: PathBuf,
    target_dir: PathBuf,
    app_id: String,
    project_name: String,
    compression_level: u32,
}

impl PackConfig {
    /// Creates a configuration with an empty project name and the default
    /// compression level.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            app_id: app_id.into(),
            project_name: String::new(),
            compression_level: codec::DEFAULT_LEVEL,
        }
    }

    /// Creates a configuration and discovers the project name from the
    /// `*_wasm.js` loader script in `source_dir`.
    ///
    /// A missing loader script is logged and leaves the project name empty,
    /// so output goes directly into `target_dir`.
    pub fn discover(
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        app_id: impl Into<String>,
    ) -> Self {
        let config = Self::new(source_dir, target_dir, app_id);
        match project::discover_project_name(&config.source_dir) {
            Ok(name) => {
                log::info!("Project name initialized to: {}", name);
                config.project_name(name)
            }
            Err(e) => {
                log::error!("Project name unavailable: {}", e);
                config
            }
        }
    }

    /// Sets the project name.
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Sets the payload compression level (0-11).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`](crate::Error::InvalidLevel) for levels above 11.
    pub fn compression_level(mut self, level: u32) -> Result<Self> {
        self.compression_level = codec::validate_level(level)?;
        Ok(self)
    }

    /// The engine build output directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// The root output directory.
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// The mini-game application identifier.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// The project name; empty when discovery failed.
    pub fn name(&self) -> &str {
        &self.project_name
    }

    /// The payload compression level.
    pub fn level(&self) -> u32 {
        self.compression_level
    }

    /// Directory all output is written to: `target/<project>`.
    pub fn final_target_dir(&self) -> PathBuf {
        if self.project_name.is_empty() {
            self.target_dir.clone()
        } else {
            self.target_dir.join(&self.project_name)
        }
    }

    /// `source/archive`.
    pub fn archive_source_dir(&self) -> PathBuf {
        self.source_dir.join(ARCHIVE_DIR)
    }

    /// `target/<project>/archive`.
    pub fn archive_target_dir(&self) -> PathBuf {
        self.final_target_dir().join(ARCHIVE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn derived_paths() {
        let config = PackConfig::new("/src", "/out", "wxid").project_name("game");
        assert_eq!(config.final_target_dir(), PathBuf::from("/out/game"));
        assert_eq!(config.archive_source_dir(), PathBuf::from("/src/archive"));
        assert_eq!(config.archive_target_dir(), PathBuf::from("/out/game/archive"));
        assert_eq!(config.app_id(), "wxid");
        assert_eq!(config.level(), 11);
    }

    #[test]
    fn empty_project_degrades_to_target_root() {
        let config = PackConfig::new("/src", "/out", "wxid");
        assert_eq!(config.final_target_dir(), PathBuf::from("/out"));
        assert_eq!(config.archive_target_dir(), PathBuf::from("/out/archive"));
    }

    #[test]
    fn rejects_bad_level() {
        let err = PackConfig::new("/src", "/out", "wxid")
            .compression_level(12)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLevel { level: 12 }));
    }

    #[test]
    fn discover_reads_loader_script() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("space_wasm.js"), "").unwrap();

        let config = PackConfig::discover(dir.path(), "/out", "wxid");
        assert_eq!(config.name(), "space");
        assert_eq!(config.final_target_dir(), PathBuf::from("/out/space"));
    }

    #[test]
    fn discover_without_script_leaves_name_empty() {
        let dir = TempDir::new().unwrap();
        let config = PackConfig::discover(dir.path(), "/out", "wxid");
        assert_eq!(config.name(), "");
    }
}
