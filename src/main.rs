//! umlcpp CLI entrypoint
//! Parses command-line arguments and dispatches to the generate use case.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use umlcpp::application::{GenerateRequest, GenerateUseCase};
use umlcpp::infrastructure::{AppConfig, FileModelLoader, FileSystemOutputService};

#[derive(Parser)]
#[command(name = "umlcpp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate C++ skeleton files from a model document
    Generate {
        /// Model document (YAML or JSON)
        #[arg(long)]
        model: PathBuf,
        /// Directory the package tree is written into
        #[arg(long)]
        output: PathBuf,
        /// Element to start from, as a `/`-joined path (default: the whole model)
        #[arg(long)]
        base: Option<String>,
        /// Configuration file (default: ./umlcpp.toml, then the user config dir)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Indent with tabs
        #[arg(long)]
        use_tab: bool,
        /// Spaces per indentation level
        #[arg(long)]
        indent_spaces: Option<usize>,
        /// Only write headers
        #[arg(long)]
        no_cpp: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Generate {
            model,
            output,
            base,
            config,
            use_tab,
            indent_spaces,
            no_cpp,
        } => {
            let app_config =
                AppConfig::load(config.as_deref()).context("Failed to load configuration")?;

            let mut options = app_config.generation;
            if use_tab {
                options.use_tab = true;
            }
            if let Some(spaces) = indent_spaces {
                options.indent_spaces = spaces;
            }
            if no_cpp {
                options.gen_cpp = false;
            }

            let request = GenerateRequest {
                model_path: model,
                output_dir: output,
                base,
                options,
                project: app_config.project,
                copyright: app_config.copyright,
            };

            let use_case = GenerateUseCase::new(
                Arc::new(FileModelLoader::new()),
                Arc::new(FileSystemOutputService::new()),
            );
            let response = use_case
                .execute(request)
                .context("Failed to generate C++ skeletons")?;

            let report = &response.report;
            info!(
                output = %response.output_path.display(),
                "Generation complete"
            );
            println!(
                "Generated into {}: {} written, {} skipped, {} directories created",
                response.output_path.display(),
                report.written.len(),
                report.skipped.len(),
                report.directories.len()
            );
            for path in &report.written {
                println!("  + {}", path.display());
            }
            for path in &report.skipped {
                println!("  = {} (exists)", path.display());
            }
        }
    }

    Ok(())
}
