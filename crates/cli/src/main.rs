//! `idcard` command-line entry point.

mod cli;
mod commands;
mod photo;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use idcard_infra::DeskConfig;

use crate::cli::Cli;

fn main() -> Result<()> {
    idcard_observability::init_with_default("warn");

    let cli = Cli::parse();

    let mut config = DeskConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!(data_dir = %config.data_dir.display(), policy = ?config.identity_policy, "opening desk");

    let mut desk = config
        .open_desk()
        .with_context(|| format!("failed to open card store in {}", config.data_dir.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut desk, cli.command, &mut out)
}
