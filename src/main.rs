//! CLI tool to inspect and format nginx-style configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Parse nginx-style configuration files and show their structure
#[derive(Parser)]
#[command(name = "nginxconf")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed configuration as a tree
    Tree {
        /// Configuration file to read
        file: PathBuf,
    },

    /// Re-serialize the configuration with canonical indentation
    Fmt {
        /// Configuration file to read
        file: PathBuf,
    },

    /// Report structural problems; exits non-zero if any are found
    Check {
        /// Configuration files to read
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tree { file } => {
            let doc = nginxconf_rs::parse_file(&file)?;
            print!("{doc}");
        }
        Commands::Fmt { file } => {
            let doc = nginxconf_rs::parse_file(&file)?;
            print!("{}", nginxconf_rs::format(&doc));
        }
        Commands::Check { files } => {
            let mut had_warning = false;
            for file in &files {
                let doc = nginxconf_rs::parse_file(file)?;
                if doc.warnings().is_empty() {
                    eprintln!("{}: ok ({} block(s))", doc.source(), doc.scope_count() - 1);
                }
                for warning in doc.warnings() {
                    eprintln!("{}: {warning}", doc.source());
                    had_warning = true;
                }
            }
            if had_warning {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
