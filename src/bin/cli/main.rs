//! CLI tool for packaging WebAssembly builds as WeChat mini-games.

mod commands;
mod exit_codes;
mod output;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// Repackage a WebAssembly game build as a WeChat mini-game
#[derive(Parser)]
#[command(name = "minipack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory path (the engine's HTML5 build output)
    #[arg(long)]
    source: PathBuf,

    /// Target directory path
    #[arg(long)]
    target: PathBuf,

    /// WeChat mini-game appId
    #[arg(long = "appid")]
    app_id: String,

    /// Brotli compression level for .wasm payloads (0-11)
    #[arg(long, short = 'l', default_value = "11")]
    level: u32,

    /// Summary output format
    #[arg(long, short = 'f', value_enum, default_value = "human")]
    format: OutputFormat,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Exit with a non-zero status if any file was skipped
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn init_logger(quiet: bool, format: OutputFormat) {
    let default_filter = if quiet { "warn" } else { "info" };
    // JSON summaries own stdout
    let target = match format {
        OutputFormat::Human => env_logger::Target::Stdout,
        OutputFormat::Json => env_logger::Target::Stderr,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(target)
        .format_timestamp(None)
        .init();
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // includes the usage line
            let _ = e.print();
            std::process::exit(exit_codes::BAD_ARGS);
        }
    };

    if cli.app_id.is_empty() {
        eprintln!("Please provide source directory, target directory, and WeChat mini-game appId");
        eprintln!("\n{}", Cli::command().render_usage());
        std::process::exit(exit_codes::BAD_ARGS);
    }

    init_logger(cli.quiet, cli.format);

    let exit_code = commands::pack(&commands::PackArgs {
        source: &cli.source,
        target: &cli.target,
        app_id: &cli.app_id,
        level: cli.level,
        format: cli.format,
        strict: cli.strict,
    });

    std::process::exit(exit_code.code());
}
