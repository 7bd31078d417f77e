use anyhow::{Context as _, Result};
use log::{info, trace, warn};

use crate::{
    Args,
    config::Config,
    imap::{Client, Connection},
    purge::{FolderOutcome, FolderTarget, purge},
};

pub async fn run(args: &Args, config: &Config) -> Result<()> {
    let (connection, _greeting) = Connection::connect_to(config.host(), *config.port())
        .await
        .context("cannot open imap connection")?;
    let client = Client::new(connection);
    let session = client
        .login(config.auth().user(), &config.auth().password())
        .await
        .context("authentication failed, aborting the run")?;

    let targets: Vec<FolderTarget> = if args.targets.is_empty() {
        config.targets()
    } else {
        args.targets.clone()
    };
    trace!("targets = {targets:?}");

    let report = purge(session, &targets).await;

    info!("{report}");
    info!("{} messages deleted in total", report.total_deleted());
    let skipped = report
        .entries()
        .iter()
        .filter(|(_, outcome)| matches!(outcome, FolderOutcome::Skipped(_)))
        .count();
    if skipped > 0 {
        warn!("{skipped} of {} folders were skipped", report.entries().len());
    }

    Ok(())
}
