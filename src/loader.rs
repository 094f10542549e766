//! Loader script patching.
//!
//! The generated `*_wasm.js` bootstrap declares its runtime objects as
//! script-level `var`s. The mini-game runtime evaluates scripts as modules,
//! so those declarations must be moved onto the `GameGlobal` object.

use crate::config::PackConfig;
use crate::project;
use crate::report::{Stage, StageReport};

/// Text replacements applied to every loader script, in order.
pub const REPLACEMENTS: [(&str, &str); 3] = [
    ("var DMSYS", "GameGlobal.DMSYS"),
    ("var FS=", "GameGlobal.FS="),
    (
        "var Module=typeof Module!=\"undefined\"?Module:{};",
        "var Module=GameGlobal.Module;",
    ),
];

/// Applies [`REPLACEMENTS`] to a loader script.
pub fn patch_script(source: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(source.to_string(), |text, (from, to)| text.replace(from, to))
}

/// Loader script stage.
///
/// Patches every `*_wasm.js` in the source directory and writes it under the
/// same name into the output directory.
pub fn patch_loader_scripts(config: &PackConfig) -> StageReport {
    let mut report = StageReport::new(Stage::LoaderScripts);
    let target_dir = config.final_target_dir();

    let scripts = match project::find_loader_scripts(config.source_dir()) {
        Ok(scripts) => scripts,
        Err(e) => return report.abort(e),
    };
    if scripts.is_empty() {
        return report.skip(format!(
            "No *{} files found in {}",
            project::LOADER_SUFFIX,
            config.source_dir().display()
        ));
    }

    for script in scripts {
        let Some(file_name) = script.file_name() else {
            continue;
        };
        let target = target_dir.join(file_name);

        let text = match crate::fs::read(&script).map(String::from_utf8) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                report.record_failure(&script, format!("not valid UTF-8: {e}"));
                continue;
            }
            Err(e) => {
                report.record_failure(&script, e);
                continue;
            }
        };

        match crate::fs::write(&target, patch_script(&text).as_bytes()) {
            Ok(bytes) => report.record_written(&script, &target, bytes),
            Err(e) => report.record_failure(&target, e),
        }
    }

    report
}
