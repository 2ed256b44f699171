//! TeachDesk - a terminal lesson-planning assistant
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use teachdesk_app::config;
use teachdesk_core::prelude::*;
use teachdesk_tui::RunOptions;

/// TeachDesk - draft lesson plans and visual aids from the terminal
#[derive(Parser, Debug)]
#[command(name = "teachdesk", version)]
#[command(about = "A terminal lesson-planning assistant", long_about = None)]
struct Args {
    /// Directory holding saved_lessons.json
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config_dir>/teachdesk/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep saved lessons in memory for this run only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logs go to a file; the TUI owns stdout
    teachdesk_core::logging::init()?;

    // Write a commented default config on first run
    if args.config.is_none() {
        if let Some(path) = config::default_config_path() {
            if let Err(e) = config::init_config_file(&path) {
                warn!("Could not create default config at {:?}: {}", path, e);
            }
        }
    }

    let result = teachdesk_tui::run(RunOptions {
        config_path: args.config,
        data_dir: args.data_dir,
        ephemeral: args.ephemeral,
    })
    .await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("TeachDesk exiting");
    result
}
