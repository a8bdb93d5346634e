//! CLI for keeping a local copy of an HTTP(s) resource.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use localcopy_core::{config, LocalCopy};
use std::path::PathBuf;

use commands::{run_cat, run_check, run_download, run_fetch, run_sync};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "localcopy")]
#[command(about = "Keep a local copy of an HTTP(s) resource up to date", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/localcopy/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check whether the local copy is older than the remote resource.
    Check {
        /// HTTP/HTTPS URL of the resource.
        url: String,
        /// Path of the local copy.
        path: PathBuf,
    },

    /// Download the resource unconditionally.
    Download {
        /// HTTP/HTTPS URL of the resource.
        url: String,
        /// Destination path; missing directories are created.
        path: PathBuf,
    },

    /// Download the resource only if the remote copy is newer.
    Sync {
        /// HTTP/HTTPS URL of the resource.
        url: String,
        /// Path of the local copy.
        path: PathBuf,
    },

    /// Print the local copy.
    Cat {
        /// Path of the local copy.
        path: PathBuf,
    },

    /// Print the remote resource without storing it.
    Fetch {
        /// HTTP/HTTPS URL of the resource.
        url: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let lc = LocalCopy::new(cfg.transport);

        match cli.command {
            CliCommand::Check { url, path } => run_check(&lc, &url, &path)?,
            CliCommand::Download { url, path } => run_download(&lc, &url, &path)?,
            CliCommand::Sync { url, path } => run_sync(&lc, &url, &path)?,
            CliCommand::Cat { path } => run_cat(&lc, &path)?,
            CliCommand::Fetch { url } => run_fetch(&lc, &url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
