mod cli;
mod config;
mod imap;
mod logging;
mod purge;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use config::Config;
use purge::FolderTarget;

/// Sweep matching mail out of IMAP folders: select, search, flag \Deleted,
/// expunge.
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to the config file. Defaults to
    /// $XDG_CONFIG_HOME/imapsweep/config.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Folder to sweep, as FOLDER or FOLDER=CRITERIA (criteria defaults to
    /// UNSEEN). Repeatable; overrides the configured target list.
    #[arg(short, long = "target")]
    pub targets: Vec<FolderTarget>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    let args = Args::parse();
    let config = Config::load_from_file(args.config.clone());

    cli::run(&args, &config).await
}
