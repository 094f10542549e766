//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use minipack::PackConfig;
use tempfile::TempDir;

/// Manifest from the engine's archive builder: one item split over two pieces.
pub const SAMPLE_MANIFEST: &str = r#"{
  "content": [
    {
      "name": "game.arcd",
      "size": 10,
      "pieces": [
        { "name": "game.arcd0", "offset": 0 },
        { "name": "game.arcd1.bin", "offset": 5 }
      ]
    }
  ],
  "total_size": 10
}"#;

/// A fake engine build output directory.
///
/// ```ignore
/// let build = BuildDir::new()
///     .project("space")
///     .archive_file("game.arcd0", b"hello")
///     .manifest(SAMPLE_MANIFEST);
/// let config = build.config();
/// ```
pub struct BuildDir {
    root: TempDir,
}

impl BuildDir {
    /// Creates an empty build output directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(root.path().join("build")).expect("Failed to create build dir");
        Self { root }
    }

    /// The build output directory (`--source`).
    pub fn source(&self) -> PathBuf {
        self.root.path().join("build")
    }

    /// The output root (`--target`).
    pub fn target(&self) -> PathBuf {
        self.root.path().join("dist")
    }

    /// Adds `<name>_wasm.js`, the loader script the project name comes from.
    pub fn project(self, name: &str) -> Self {
        self.file(
            &format!("{name}_wasm.js"),
            b"var Module=typeof Module!=\"undefined\"?Module:{};var FS={};",
        )
    }

    /// Adds a file at the top of the build output.
    pub fn file(self, name: &str, data: &[u8]) -> Self {
        write(&self.source().join(name), data);
        self
    }

    /// Adds a file to `archive/`.
    pub fn archive_file(self, name: &str, data: &[u8]) -> Self {
        write(&self.source().join("archive").join(name), data);
        self
    }

    /// Adds `archive/archive_files.json`.
    pub fn manifest(self, json: &str) -> Self {
        self.archive_file("archive_files.json", json.as_bytes())
    }

    /// Builds a config the same way the CLI does.
    pub fn config(&self) -> PackConfig {
        PackConfig::discover(self.source(), self.target(), "wx0123456789")
    }
}

fn write(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(path, data).expect("Failed to write fixture file");
}

/// Lists the file names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
