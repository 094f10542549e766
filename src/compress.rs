//! Payload compression stage.
//!
//! Every `*.wasm` module at the top of the build output is compressed and
//! written as `<name>.wasm.br` into the output directory.

use std::ffi::OsString;

use crate::codec;
use crate::config::PackConfig;
use crate::report::{Stage, StageReport};

/// Extension of the payloads this stage compresses.
pub const WASM_EXTENSION: &str = "wasm";

/// Returns the output file name for a compressed payload.
pub fn compressed_name(name: &std::ffi::OsStr) -> OsString {
    let mut out = name.to_os_string();
    out.push(".");
    out.push(codec::brotli::EXTENSION);
    out
}

/// Compression stage.
pub fn compress_wasm_files(config: &PackConfig) -> StageReport {
    let mut report = StageReport::new(Stage::Payload);
    let target_dir = config.final_target_dir();

    let files = match crate::fs::list_files(config.source_dir()) {
        Ok(files) => files,
        Err(e) => return report.abort(e),
    };

    let payloads: Vec<_> = files
        .into_iter()
        .filter(|f| f.path.extension().is_some_and(|ext| ext == WASM_EXTENSION))
        .collect();
    if payloads.is_empty() {
        return report.skip(format!(
            "No .{} files found in {}",
            WASM_EXTENSION,
            config.source_dir().display()
        ));
    }

    for file in payloads {
        let data = match crate::fs::read(&file.path) {
            Ok(data) => data,
            Err(e) => {
                report.record_failure(&file.path, e);
                continue;
            }
        };

        let compressed = match codec::compress(&data, config.level()) {
            Ok(compressed) => compressed,
            Err(e) => {
                report.record_failure(&file.path, e);
                continue;
            }
        };
        log::debug!(
            "{}: {} -> {} bytes",
            file.path.display(),
            data.len(),
            compressed.len()
        );

        let target = target_dir.join(compressed_name(&file.name));
        match crate::fs::write(&target, &compressed) {
            Ok(bytes) => report.record_written(&file.path, &target, bytes),
            Err(e) => report.record_failure(&target, e),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::StageStatus;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn output_name_appends_br() {
        assert_eq!(compressed_name(OsStr::new("game.wasm")), "game.wasm.br");
    }

    #[test]
    fn compresses_only_wasm() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("src");
        let out = root.path().join("out");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&out).unwrap();

        let module = b"\0asm\x01\0\0\0".repeat(100);
        std::fs::write(source.join("game.wasm"), &module).unwrap();
        std::fs::write(source.join("game_wasm.js"), "var FS={};").unwrap();

        let config = PackConfig::new(&source, &out, "wxid")
            .compression_level(5)
            .unwrap();
        let report = compress_wasm_files(&config);

        assert_eq!(report.written(), 1);
        let compressed = std::fs::read(out.join("game.wasm.br")).unwrap();
        assert_eq!(codec::decompress(&compressed).unwrap(), module);
        assert!(!out.join("game_wasm.js.br").exists());
    }

    #[test]
    fn no_payload_skips_stage() {
        let root = TempDir::new().unwrap();
        let config = PackConfig::new(root.path(), root.path().join("out"), "wxid");
        let report = compress_wasm_files(&config);
        assert!(matches!(report.status, StageStatus::Skipped(_)));
    }
}
