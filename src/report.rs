//! Per-file and per-stage results of a packaging run.
//!
//! Stages never abort the run. Each one returns a [`StageReport`] listing
//! every file it wrote or failed to write, and the pipeline collects them
//! into a [`RunSummary`] that the CLI prints at the end.

use std::fmt;
use std::path::{Path, PathBuf};

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Copies the embedded mini-game templates.
    Templates,
    /// Rewrites global declarations in `*_wasm.js` loader scripts.
    LoaderScripts,
    /// Copies archive payload files with the `.bin` suffix.
    ArchiveFiles,
    /// Rewrites piece names in `archive_files.json`.
    ArchiveManifest,
    /// Brotli-compresses `*.wasm` payloads.
    Payload,
}

impl Stage {
    /// Returns a short machine-friendly name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::LoaderScripts => "loader-scripts",
            Self::ArchiveFiles => "archive-files",
            Self::ArchiveManifest => "archive-manifest",
            Self::Payload => "payload",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome for a single file handled by a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was written to the target tree.
    Written {
        /// The file that was written.
        target: PathBuf,
        /// Number of bytes written.
        bytes: u64,
    },
    /// The file was skipped because reading or writing it failed.
    Failed {
        /// The file that could not be processed.
        path: PathBuf,
        /// Why it was skipped.
        reason: String,
    },
}

impl FileOutcome {
    /// Returns true for [`FileOutcome::Written`].
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// How a stage ended as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StageStatus {
    /// The stage ran over all of its inputs. Individual files may still have failed.
    #[default]
    Completed,
    /// An optional input was missing and the stage did nothing.
    Skipped(String),
    /// A stage-level failure stopped the stage early.
    Aborted(String),
}

impl StageStatus {
    /// Returns a short machine-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Skipped(_) => "skipped",
            Self::Aborted(_) => "aborted",
        }
    }

    /// Returns the reason for a skipped or aborted stage.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Completed => None,
            Self::Skipped(reason) | Self::Aborted(reason) => Some(reason),
        }
    }
}

/// Result of running one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// The stage this report belongs to.
    pub stage: Stage,
    /// How the stage ended.
    pub status: StageStatus,
    /// Every file the stage attempted, in processing order.
    pub files: Vec<FileOutcome>,
}

impl StageReport {
    /// Creates an empty, completed report.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            status: StageStatus::Completed,
            files: Vec::new(),
        }
    }

    /// Records a successfully written file.
    pub fn record_written(&mut self, source: &Path, target: &Path, bytes: u64) {
        log::info!(
            "[{}] {} -> {}",
            self.stage,
            source.display(),
            target.display()
        );
        self.files.push(FileOutcome::Written {
            target: target.to_path_buf(),
            bytes,
        });
    }

    /// Records a file that was skipped after an error.
    pub fn record_failure(&mut self, path: &Path, reason: impl fmt::Display) {
        let reason = reason.to_string();
        log::error!("[{}] {}: {}", self.stage, path.display(), reason);
        self.files.push(FileOutcome::Failed {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Marks the stage as skipped for a missing optional input.
    pub fn skip(mut self, reason: impl fmt::Display) -> Self {
        let reason = reason.to_string();
        log::warn!("[{}] {}", self.stage, reason);
        self.status = StageStatus::Skipped(reason);
        self
    }

    /// Marks the stage as aborted.
    pub fn abort(mut self, reason: impl fmt::Display) -> Self {
        let reason = reason.to_string();
        log::error!("[{}] {}", self.stage, reason);
        self.status = StageStatus::Aborted(reason);
        self
    }

    /// Number of files written.
    pub fn written(&self) -> usize {
        self.files.iter().filter(|f| f.is_written()).count()
    }

    /// Number of files skipped after an error.
    pub fn failed(&self) -> usize {
        self.files.len() - self.written()
    }

    /// Total bytes written by the stage.
    pub fn bytes_written(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Written { bytes, .. } => *bytes,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Iterates over failed files and their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().filter_map(|f| match f {
            FileOutcome::Failed { path, reason } => Some((path.as_path(), reason.as_str())),
            FileOutcome::Written { .. } => None,
        })
    }

    /// Returns true if the stage was not aborted and no file failed.
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, StageStatus::Aborted(_)) && self.failed() == 0
    }
}

/// Results of a complete packaging run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The final output directory (`target/<project>`).
    pub output_dir: PathBuf,
    /// One report per stage, in pipeline order.
    pub stages: Vec<StageReport>,
}

impl RunSummary {
    /// Returns the report for `stage`, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Total number of files written across all stages.
    pub fn files_written(&self) -> usize {
        self.stages.iter().map(StageReport::written).sum()
    }

    /// Total number of files skipped after an error across all stages.
    pub fn files_failed(&self) -> usize {
        self.stages.iter().map(StageReport::failed).sum()
    }

    /// Total bytes written across all stages.
    pub fn bytes_written(&self) -> u64 {
        self.stages.iter().map(StageReport::bytes_written).sum()
    }

    /// Returns true if every stage is ok.
    pub fn is_ok(&self) -> bool {
        self.stages.iter().all(StageReport::is_ok)
    }
}
