//! Filepick CLI: run local files through an upload control and print what it decides.
//!
//! Defaults come from FILEPICK_* environment variables (see `ControlConfig::from_env`);
//! flags override them.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use filepick_cli::{criteria_report, init_tracing, run_check, system_file_from_path};
use filepick_core::{ControlConfig, UploadPolicy, UploadResponseRecord};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filepick", about = "File picker validation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select files and report per-file status, messages and emitted events
    Check {
        /// Accept string, e.g. ".jpg, .png" or "image/*"
        #[arg(long)]
        accept: Option<String>,
        /// Maximum file size in bytes
        #[arg(long)]
        max_file_size_bytes: Option<u64>,
        /// Allow more than one file
        #[arg(long)]
        multiple: bool,
        /// Files are uploaded on selection; removals wait for the host
        #[arg(long)]
        upload_on_select: bool,
        /// JSON file holding a host response list to apply after selection
        #[arg(long)]
        responses: Option<PathBuf>,
        /// Files to select
        files: Vec<PathBuf>,
    },
    /// Show parsed criteria and the rejection message for an accept string
    Criteria {
        #[arg(long, default_value = "")]
        accept: String,
        #[arg(long, default_value_t = filepick_core::DEFAULT_MAX_FILE_SIZE_BYTES)]
        max_file_size_bytes: u64,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize report")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            accept,
            max_file_size_bytes,
            multiple,
            upload_on_select,
            responses,
            files,
        } => {
            let mut config = ControlConfig::from_env().context("Failed to load configuration")?;
            if let Some(accept) = accept {
                config.accept = accept;
            }
            if let Some(max) = max_file_size_bytes {
                config.max_file_size_bytes = max;
            }
            config.multiple |= multiple;
            if upload_on_select {
                config.upload_policy = UploadPolicy::OnSelect;
            }

            let mut selected = Vec::with_capacity(files.len());
            for path in &files {
                selected.push(system_file_from_path(path).await?);
            }

            let responses = match responses {
                Some(path) => {
                    let raw = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Some(
                        UploadResponseRecord::parse_list(&raw)
                            .with_context(|| format!("Invalid response list in {}", path.display()))?,
                    )
                }
                None => None,
            };

            tracing::info!(
                files = selected.len(),
                accept = %config.accept,
                max_file_size_bytes = config.max_file_size_bytes,
                "Checking selection"
            );
            let report = run_check(config, selected, responses);
            print_json(&report)?;
        }
        Commands::Criteria {
            accept,
            max_file_size_bytes,
        } => {
            print_json(&criteria_report(&accept, max_file_size_bytes))?;
        }
    }

    Ok(())
}
