//! # minipack
//!
//! Repackages a WebAssembly game build (the engine's HTML5 bundle) into a
//! project the WeChat mini-game host can load.
//!
//! A run reads a build output directory and writes `target/<project>`:
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`template`] | embedded files, `dmloader.js` | `game.js`, `game.json`, `project*.config.json`, `weapp-adapter/` |
//! | [`loader`] | `<project>_wasm.js` | same name, globals moved to `GameGlobal` |
//! | [`archive::rename`] | `archive/*` | `archive/*.bin` |
//! | [`archive`] manifest rewrite | `archive/archive_files.json` | same, piece names suffixed |
//! | [`compress`] | `*.wasm` | `*.wasm.br` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minipack::{PackConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PackConfig::discover("build/wasm-web", "dist", "wx0123456789abcdef");
//!     let summary = minipack::run(&config)?;
//!     println!(
//!         "{} files written to {}, {} failed",
//!         summary.files_written(),
//!         summary.output_dir.display(),
//!         summary.files_failed()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Stages never abort the run. A file that cannot be read or written is
//! skipped and recorded in the stage's [`StageReport`]; a malformed manifest
//! aborts only the manifest stage. Only failing to create the output
//! directory makes [`run`] return an error.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | Yes | Command-line interface tool |
//! | `parallel` | No | Run the stages concurrently with Rayon |

pub mod archive;
pub mod codec;
pub mod compress;
pub mod config;
pub mod error;
pub mod fs;
pub mod loader;
pub mod pipeline;
pub mod project;
pub mod report;
pub mod template;

pub use config::PackConfig;
pub use error::{Error, Result};
pub use pipeline::run;
pub use report::{FileOutcome, RunSummary, Stage, StageReport, StageStatus};
