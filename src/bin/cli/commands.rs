//! Command implementation for the CLI tool.

use std::path::Path;

use console::style;
use minipack::PackConfig;

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;

/// Configuration for a packaging run.
pub struct PackArgs<'a> {
    pub source: &'a Path,
    pub target: &'a Path,
    pub app_id: &'a str,
    pub level: u32,
    pub format: OutputFormat,
    pub strict: bool,
}

/// Pack command implementation
pub fn pack(args: &PackArgs<'_>) -> ExitCode {
    let formatter = create_formatter(args.format);
    let human = matches!(args.format, OutputFormat::Human);

    if human {
        println!("{}", style(format!("Source directory: {}", args.source.display())).blue());
        println!("{}", style(format!("Target directory: {}", args.target.display())).blue());
        println!("{}", style(format!("AppId: {}", args.app_id)).blue());
    }

    let config = match PackConfig::discover(args.source, args.target, args.app_id)
        .compression_level(args.level)
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red(), e);
            return ExitCode::BadArgs;
        }
    };

    if human {
        println!(
            "{}",
            style(format!(
                "Final target directory: {}",
                config.final_target_dir().display()
            ))
            .yellow()
        );
    }

    let summary = match minipack::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            println!(
                "{}",
                style(format!("Error creating final target directory: {}", e)).red()
            );
            return error_to_exit_code(&e).with_policy(args.strict);
        }
    };

    print!("{}", formatter.format_summary(&summary));
    if !human {
        println!();
    }

    if summary.is_ok() {
        if human {
            println!("{}", style("All file processing completed").green());
        }
        ExitCode::Success
    } else {
        ExitCode::Incomplete.with_policy(args.strict)
    }
}
