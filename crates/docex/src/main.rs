//! docex CLI - API documentation exporter.
//!
//! Provides commands for:
//! - `export`: Render a documentation model to XML and LaTeX
//! - `formats`: List the available export formats

mod commands;
mod error;
mod model;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ExportArgs;
use output::Output;

/// docex - API documentation exporter.
#[derive(Parser)]
#[command(name = "docex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a documentation model.
    Export(ExportArgs),
    /// List the available export formats.
    Formats,
}

/// --verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Export(args) if args.verbose);
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Export(args) => args.execute(),
        Commands::Formats => {
            commands::list_formats();
            Ok(())
        }
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_verbose_is_info() {
        assert_eq!(
            log_filter(true, Some("debug")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_filter_uses_rust_log() {
        assert_eq!(
            log_filter(false, Some("docex_export=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
