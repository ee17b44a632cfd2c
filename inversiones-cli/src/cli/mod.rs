//! Command line interface definition

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{
    ConvertArgs, DownloadAllArgs, DownloadArgs, PublishArgs, ReshapeArgs, RunArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "inversiones-cli",
    version,
    about = "Download, normalize, reshape and publish MEF public investment reports"
)]
pub struct Cli {
    /// Path to a config file (default: <config dir>/inversiones-cli/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the investment report of one department
    Download(DownloadArgs),
    /// Download the reports of all 25 departments, one after another
    DownloadAll(DownloadAllArgs),
    /// Convert a downloaded XLSX report to CSV
    Convert(ConvertArgs),
    /// Reshape a report CSV into the Category/Projects JSON document
    Reshape(ReshapeArgs),
    /// Overwrite the remote Category and Projects collections with a JSON document
    Publish(PublishArgs),
    /// Download, convert, reshape and optionally publish one department
    Run(RunArgs),
}
