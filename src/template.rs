//! Mini-game project templates.
//!
//! The host needs a small set of project files next to the engine output:
//! an entry script, the game and project configuration, and the platform
//! adapter scripts. They are compiled into the binary and written out with
//! the project name and application id filled in.

use std::path::Path;

use crate::config::PackConfig;
use crate::report::{Stage, StageReport};

/// Placeholder replaced with the project name.
pub const PROJECT_NAME_PLACEHOLDER: &str = "{projectName}";

/// Placeholder replaced with the mini-game application id.
pub const APP_ID_PLACEHOLDER: &str = "{wxAppId}";

/// Engine loader copied from the build output rather than embedded.
pub const ENGINE_LOADER: &str = "dmloader.js";

/// Directory holding the platform adapter scripts.
pub const ADAPTER_DIR: &str = "weapp-adapter";

/// An embedded template file.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    /// Path relative to the output directory, `/`-separated.
    pub path: &'static str,
    /// File contents.
    pub contents: &'static [u8],
    /// Whether placeholders are substituted.
    pub substitute: bool,
}

macro_rules! template {
    ($path:literal, $substitute:expr) => {
        TemplateFile {
            path: $path,
            contents: include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/template/", $path)),
            substitute: $substitute,
        }
    };
}

/// Every embedded template, in the order it is written.
pub const FILES: &[TemplateFile] = &[
    template!("game.json", true),
    template!("project.config.json", true),
    template!("project.private.config.json", true),
    template!("game.js", true),
    template!("weapp-adapter/AudioContext.js", false),
    template!("weapp-adapter/DMFS.js", false),
];

/// Replaces every placeholder occurrence in `text`.
pub fn substitute(text: &str, project_name: &str, app_id: &str) -> String {
    text.replace(PROJECT_NAME_PLACEHOLDER, project_name)
        .replace(APP_ID_PLACEHOLDER, app_id)
}

/// Renders a template for `config`.
pub fn render(file: &TemplateFile, config: &PackConfig) -> Vec<u8> {
    if !file.substitute {
        return file.contents.to_vec();
    }
    match std::str::from_utf8(file.contents) {
        Ok(text) => substitute(text, config.name(), config.app_id()).into_bytes(),
        Err(_) => file.contents.to_vec(),
    }
}

/// Template stage.
///
/// Writes every embedded template into the output directory and copies the
/// engine's `dmloader.js` from the build output.
pub fn copy_templates(config: &PackConfig) -> StageReport {
    let mut report = StageReport::new(Stage::Templates);
    let target_dir = config.final_target_dir();

    for file in FILES {
        let target = file
            .path
            .split('/')
            .fold(target_dir.clone(), |dir, part| dir.join(part));

        if let Some(parent) = target.parent() {
            if let Err(e) = crate::fs::ensure_dir(parent) {
                report.record_failure(&target, e);
                continue;
            }
        }

        match crate::fs::write(&target, &render(file, config)) {
            Ok(bytes) => report.record_written(Path::new(file.path), &target, bytes),
            Err(e) => report.record_failure(&target, e),
        }
    }

    let loader = config.source_dir().join(ENGINE_LOADER);
    if loader.is_file() {
        let target = target_dir.join(ENGINE_LOADER);
        match crate::fs::copy(&loader, &target) {
            Ok(bytes) => report.record_written(&loader, &target, bytes),
            Err(e) => report.record_failure(&loader, e),
        }
    } else {
        log::warn!("[{}] {} not found in build output", report.stage, ENGINE_LOADER);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn substitutes_all_occurrences() {
        let text = "{projectName}/{projectName}_wasm.js appid={wxAppId}";
        assert_eq!(
            substitute(text, "hero", "wx42"),
            "hero/hero_wasm.js appid=wx42"
        );
    }

    #[test]
    fn embedded_templates_reference_placeholders() {
        let game_js = FILES.iter().find(|f| f.path == "game.js").unwrap();
        let text = std::str::from_utf8(game_js.contents).unwrap();
        assert!(text.contains(PROJECT_NAME_PLACEHOLDER));

        let project = FILES
            .iter()
            .find(|f| f.path == "project.config.json")
            .unwrap();
        let text = std::str::from_utf8(project.contents).unwrap();
        assert!(text.contains(APP_ID_PLACEHOLDER));
    }

    #[test]
    fn adapter_scripts_are_copied_verbatim() {
        let config = PackConfig::new("/src", "/out", "wx{projectName}").project_name("p");
        for file in FILES.iter().filter(|f| f.path.starts_with(ADAPTER_DIR)) {
            assert_eq!(render(file, &config), file.contents);
        }
    }

    #[test]
    fn writes_templates_into_project_dir() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("src");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join(ENGINE_LOADER), "var EngineLoader={};").unwrap();

        let config =
            PackConfig::new(&source, root.path().join("out"), "wx0001").project_name("hero");
        let report = copy_templates(&config);

        assert_eq!(report.failed(), 0);
        assert_eq!(report.written(), FILES.len() + 1);

        let out = config.final_target_dir();
        let project = std::fs::read_to_string(out.join("project.config.json")).unwrap();
        assert!(project.contains("\"appid\": \"wx0001\""));
        assert!(project.contains("\"projectname\": \"hero\""));
        assert!(!project.contains(PROJECT_NAME_PLACEHOLDER));

        let game = std::fs::read_to_string(out.join("game.js")).unwrap();
        assert!(game.contains("require(\"hero_wasm.js\")"));

        assert!(out.join(ADAPTER_DIR).join("DMFS.js").is_file());
        assert_eq!(
            std::fs::read_to_string(out.join(ENGINE_LOADER)).unwrap(),
            "var EngineLoader={};"
        );
    }

    #[test]
    fn missing_engine_loader_is_not_a_failure() {
        let root = TempDir::new().unwrap();
        let config = PackConfig::new(root.path(), root.path().join("out"), "wx");
        let report = copy_templates(&config);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.written(), FILES.len());
    }
}
