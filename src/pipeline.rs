//! The packaging pipeline.
//!
//! Stages only read from the source tree and write disjoint paths in the
//! output directory, so none depends on another's output. They run in a
//! fixed order by default; with the `parallel` feature the independent
//! stages run on the Rayon pool.

use crate::config::PackConfig;
use crate::report::{RunSummary, StageReport};
use crate::{Result, archive, compress, loader, template};

/// A stage entry point.
pub type StageFn = fn(&PackConfig) -> StageReport;

/// The stages of a run, in reporting order.
pub const STAGES: [StageFn; 5] = [
    template::copy_templates,
    loader::patch_loader_scripts,
    archive::copy_archive_files,
    archive::rewrite_manifest,
    compress::compress_wasm_files,
];

/// Runs every stage for `config`.
///
/// # Errors
///
/// Only fails if the output directory itself cannot be created. Every other
/// failure is recorded in the returned [`RunSummary`].
pub fn run(config: &PackConfig) -> Result<RunSummary> {
    let output_dir = config.final_target_dir();
    crate::fs::ensure_dir(&output_dir)?;

    let stages = run_stages(config);

    let summary = RunSummary { output_dir, stages };
    if summary.is_ok() {
        log::info!("All file processing completed");
    } else {
        log::warn!(
            "File processing completed with {} failed file(s)",
            summary.files_failed()
        );
    }
    Ok(summary)
}

#[cfg(not(feature = "parallel"))]
fn run_stages(config: &PackConfig) -> Vec<StageReport> {
    STAGES.iter().map(|stage| stage(config)).collect()
}

#[cfg(feature = "parallel")]
fn run_stages(config: &PackConfig) -> Vec<StageReport> {
    use rayon::prelude::*;

    // collect() on an indexed parallel iterator keeps stage order
    STAGES.par_iter().map(|stage| stage(config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Stage;
    use tempfile::TempDir;

    #[test]
    fn reports_every_stage_in_order() {
        let root = TempDir::new().unwrap();
        let config = PackConfig::new(root.path(), root.path().join("out"), "wxid");

        let summary = run(&config).unwrap();
        let order: Vec<_> = summary.stages.iter().map(|r| r.stage).collect();
        assert_eq!(
            order,
            [
                Stage::Templates,
                Stage::LoaderScripts,
                Stage::ArchiveFiles,
                Stage::ArchiveManifest,
                Stage::Payload,
            ]
        );
        assert!(summary.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_output_fails_run() {
        let root = TempDir::new().unwrap();
        let blocker = root.path().join("out");
        std::fs::write(&blocker, b"file, not a directory").unwrap();

        let config = PackConfig::new(root.path(), &blocker, "wxid").project_name("game");
        assert!(run(&config).is_err());
    }
}
