use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use derive_getters::Getters;
use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::imap::{ExpungeError, SearchError, SelectError, SendCommand, Session};

/// One folder to sweep: where to look and what to match.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct FolderTarget {
    folder: String,
    criteria: String,
}

impl FolderTarget {
    pub fn new(folder: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            criteria: criteria.into(),
        }
    }

    pub fn unseen(folder: impl Into<String>) -> Self {
        Self::new(folder, "UNSEEN")
    }
}

pub fn default_targets() -> Vec<FolderTarget> {
    vec![FolderTarget::unseen("INBOX"), FolderTarget::unseen("Junk")]
}

#[derive(Debug, Error)]
#[error("targets take the form FOLDER or FOLDER=CRITERIA")]
pub struct ParseTargetError;

impl FromStr for FolderTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (folder, criteria) = match s.split_once('=') {
            Some((folder, criteria)) => (folder, criteria),
            None => (s, "UNSEEN"),
        };
        if folder.is_empty() || criteria.is_empty() {
            return Err(ParseTargetError);
        }
        Ok(Self::new(folder, criteria))
    }
}

/// Scoped to a single target; the run carries on with the next one.
#[derive(Debug, Error)]
pub enum FolderError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("mailbox {0} is read-only, \\Deleted would not stick")]
    ReadOnly(String),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Expunge(#[from] ExpungeError),
}

#[derive(Debug)]
pub enum FolderOutcome {
    Deleted(usize),
    Skipped(FolderError),
}

impl Display for FolderOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted(count) => write!(f, "{count} deleted"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
        }
    }
}

/// Per-folder results of one run, in target order.
#[derive(Debug, Default)]
pub struct PurgeReport {
    entries: Vec<(String, FolderOutcome)>,
}

impl PurgeReport {
    fn record(&mut self, folder: &str, outcome: FolderOutcome) {
        self.entries.push((folder.to_string(), outcome));
    }

    pub fn entries(&self) -> &[(String, FolderOutcome)] {
        &self.entries
    }

    pub fn total_deleted(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, outcome)| match outcome {
                FolderOutcome::Deleted(count) => *count,
                FolderOutcome::Skipped(_) => 0,
            })
            .sum()
    }
}

impl Display for PurgeReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "nothing to do");
        }
        let mut separate = false;
        for (folder, outcome) in &self.entries {
            if separate {
                write!(f, ", ")?;
            }
            write!(f, "{folder}: {outcome}")?;
            separate = true;
        }
        Ok(())
    }
}

/// Works through `targets` in order, then closes the selected folder and logs
/// out, exactly once, whatever happened in between. Folder-level failures are
/// recorded and skipped over; nothing after a successful login aborts the
/// run.
pub async fn purge<T: SendCommand>(
    mut session: Session<T>,
    targets: &[FolderTarget],
) -> PurgeReport {
    let mut report = PurgeReport::default();
    for target in targets {
        let outcome = purge_folder(&mut session, target).await;
        match &outcome {
            FolderOutcome::Deleted(count) => {
                info!(
                    "{}: deleted {count} messages matching {}",
                    target.folder(),
                    target.criteria()
                );
            }
            FolderOutcome::Skipped(reason) => {
                warn!("{}: skipped: {reason}", target.folder());
            }
        }
        report.record(target.folder(), outcome);
    }
    session.close().await;
    session.logout().await;
    report
}

async fn purge_folder<T: SendCommand>(
    session: &mut Session<T>,
    target: &FolderTarget,
) -> FolderOutcome {
    let mailbox = match session.select(target.folder()).await {
        Ok(mailbox) => mailbox,
        Err(e) => return FolderOutcome::Skipped(e.into()),
    };
    if *mailbox.readonly() {
        return FolderOutcome::Skipped(FolderError::ReadOnly(target.folder().clone()));
    }
    debug!(
        "{} holds {} messages, {} recent",
        mailbox.name(),
        mailbox.exists(),
        mailbox.recent()
    );
    trace!("{} flags = {:?}", mailbox.name(), mailbox.flags());
    if let Some(unseen) = mailbox.unseen() {
        trace!("first unseen message is {unseen}");
    }
    let ids = match session.search(target.criteria()).await {
        Ok(ids) => ids,
        Err(e) => return FolderOutcome::Skipped(e.into()),
    };
    if ids.is_empty() {
        debug!(
            "nothing in {} matches {}",
            target.folder(),
            target.criteria()
        );
        return FolderOutcome::Deleted(0);
    }
    for &id in &ids {
        session.flag_deleted(id).await;
    }
    if let Err(e) = session.expunge().await {
        return FolderOutcome::Skipped(e.into());
    }
    FolderOutcome::Deleted(ids.len())
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use assertables::*;
    use imap_proto::{MailboxDatum, RequestId, Response, ResponseCode, Status};
    use rstest::*;

    use crate::imap::{TransportError, mock_connection::MockConnection};

    use super::*;

    fn done_ok() -> Response<'static> {
        Response::Done {
            tag: RequestId("0001".to_string()),
            status: Status::Ok,
            code: None,
            information: None,
        }
    }

    fn done_no(information: &'static str) -> Response<'static> {
        Response::Done {
            tag: RequestId("0001".to_string()),
            status: Status::No,
            code: None,
            information: Some(Cow::Borrowed(information)),
        }
    }

    fn select_ok(exists: u32) -> Vec<Response<'static>> {
        vec![
            Response::MailboxData(MailboxDatum::Exists(exists)),
            Response::MailboxData(MailboxDatum::Recent(0)),
            Response::Done {
                tag: RequestId("0001".to_string()),
                status: Status::Ok,
                code: Some(ResponseCode::ReadWrite),
                information: None,
            },
        ]
    }

    fn search_found(ids: Vec<u32>) -> Vec<Response<'static>> {
        vec![Response::MailboxData(MailboxDatum::Search(ids)), done_ok()]
    }

    fn bye() -> Vec<Response<'static>> {
        vec![
            Response::Data {
                status: Status::Bye,
                code: None,
                information: Some(Cow::Borrowed("Logging out")),
            },
            done_ok(),
        ]
    }

    fn count_with_prefix(log: &[String], prefix: &str) -> usize {
        log.iter()
            .filter(|command| command.starts_with(prefix))
            .count()
    }

    #[tokio::test]
    async fn flags_every_match_once_then_expunges_once() {
        let connection = MockConnection::new()
            .replies(select_ok(12))
            .replies(search_found(vec![3, 5, 9]))
            .replies([done_ok()])
            .replies([done_ok()])
            .replies([done_ok()])
            .replies([
                Response::Expunge(3),
                Response::Expunge(4),
                Response::Expunge(7),
                done_ok(),
            ])
            .replies([done_ok()])
            .replies(bye());
        let log = connection.command_log();
        let session = Session::new(connection);

        let report = purge(session, &[FolderTarget::unseen("INBOX")]).await;

        assert_eq!(report.total_deleted(), 3);
        let entries = report.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "INBOX");
        assert!(matches!(entries[0].1, FolderOutcome::Deleted(3)));

        let log = log.borrow();
        assert_eq!(count_with_prefix(&log, "STORE "), 3);
        assert_eq!(count_with_prefix(&log, "EXPUNGE"), 1);
        assert_eq!(count_with_prefix(&log, "CLOSE"), 1);
        assert_eq!(count_with_prefix(&log, "LOGOUT"), 1);
        assert!(log.contains(&"STORE 3 +FLAGS (\\Deleted)".to_string()));
        assert!(log.contains(&"STORE 5 +FLAGS (\\Deleted)".to_string()));
        assert!(log.contains(&"STORE 9 +FLAGS (\\Deleted)".to_string()));
    }

    #[tokio::test]
    async fn empty_folders_report_zero_and_are_left_untouched() {
        let connection = MockConnection::new()
            .replies(select_ok(2))
            .replies(search_found(vec![]))
            .replies([done_ok()])
            .replies(bye());
        let log = connection.command_log();
        let session = Session::new(connection);

        let report = purge(session, &[FolderTarget::unseen("INBOX")]).await;

        assert!(matches!(report.entries()[0].1, FolderOutcome::Deleted(0)));
        assert_eq!(report.total_deleted(), 0);

        let log = log.borrow();
        assert_eq!(count_with_prefix(&log, "STORE "), 0);
        assert_eq!(count_with_prefix(&log, "EXPUNGE"), 0);
    }

    #[tokio::test]
    async fn failed_select_skips_the_folder_and_continues() {
        let connection = MockConnection::new()
            .replies([done_no("Mailbox doesn't exist: INBOX")])
            .replies(select_ok(0))
            .replies(search_found(vec![]))
            .replies([done_ok()])
            .replies(bye());
        let log = connection.command_log();
        let session = Session::new(connection);

        let targets = [FolderTarget::unseen("INBOX"), FolderTarget::unseen("Spam")];
        let report = purge(session, &targets).await;

        let entries = report.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "INBOX");
        assert!(matches!(
            entries[0].1,
            FolderOutcome::Skipped(FolderError::Select(_))
        ));
        assert_eq!(entries[1].0, "Spam");
        assert!(matches!(entries[1].1, FolderOutcome::Deleted(0)));

        let log = log.borrow();
        // the failed folder gets no further commands, and only the second
        // target is searched
        assert_eq!(count_with_prefix(&log, "SELECT "), 2);
        assert_eq!(count_with_prefix(&log, "SEARCH "), 1);
        assert_eq!(count_with_prefix(&log, "STORE "), 0);
        assert_eq!(count_with_prefix(&log, "EXPUNGE"), 0);
        // cleanup still happens exactly once
        assert_eq!(count_with_prefix(&log, "CLOSE"), 1);
        assert_eq!(count_with_prefix(&log, "LOGOUT"), 1);
    }

    #[tokio::test]
    async fn readonly_folders_are_skipped_without_a_search() {
        let connection = MockConnection::new()
            .replies([Response::Done {
                tag: RequestId("0001".to_string()),
                status: Status::Ok,
                code: Some(ResponseCode::ReadOnly),
                information: None,
            }])
            .replies([done_ok()])
            .replies(bye());
        let log = connection.command_log();
        let session = Session::new(connection);

        let report = purge(session, &[FolderTarget::unseen("INBOX")]).await;

        assert!(matches!(
            report.entries()[0].1,
            FolderOutcome::Skipped(FolderError::ReadOnly(_))
        ));
        let log = log.borrow();
        assert_eq!(count_with_prefix(&log, "SEARCH "), 0);
    }

    #[tokio::test]
    async fn transport_fault_in_one_folder_does_not_end_the_run() {
        let connection = MockConnection::new()
            .replies(select_ok(1))
            .fails(TransportError::Closed)
            .replies(select_ok(1))
            .replies(search_found(vec![1]))
            .replies([done_ok()])
            .replies([Response::Expunge(1), done_ok()])
            .replies([done_ok()])
            .replies(bye());
        let log = connection.command_log();
        let session = Session::new(connection);

        let targets = [FolderTarget::unseen("INBOX"), FolderTarget::unseen("Spam")];
        let report = purge(session, &targets).await;

        assert!(matches!(
            report.entries()[0].1,
            FolderOutcome::Skipped(FolderError::Search(SearchError::Transport(_)))
        ));
        assert!(matches!(report.entries()[1].1, FolderOutcome::Deleted(1)));
        assert_eq!(report.total_deleted(), 1);

        let log = log.borrow();
        assert_eq!(count_with_prefix(&log, "CLOSE"), 1);
        assert_eq!(count_with_prefix(&log, "LOGOUT"), 1);
    }

    #[test]
    fn report_displays_counts_and_skip_reasons() {
        let mut report = PurgeReport::default();
        report.record("INBOX", FolderOutcome::Deleted(3));
        report.record(
            "Spam",
            FolderOutcome::Skipped(FolderError::ReadOnly("Spam".to_string())),
        );

        assert_eq!(
            report.to_string(),
            "INBOX: 3 deleted, Spam: skipped (mailbox Spam is read-only, \\Deleted would not stick)"
        );
    }

    #[rstest]
    #[case("INBOX", "INBOX", "UNSEEN")]
    #[case("Spam=ALL", "Spam", "ALL")]
    #[case("[Gmail]/Spam=UNSEEN", "[Gmail]/Spam", "UNSEEN")]
    fn targets_parse_from_their_cli_form(
        #[case] input: &str,
        #[case] folder: &str,
        #[case] criteria: &str,
    ) {
        let target: FolderTarget = assert_ok!(input.parse());
        assert_eq!(target.folder(), folder);
        assert_eq!(target.criteria(), criteria);
    }

    #[rstest]
    #[case("")]
    #[case("=UNSEEN")]
    #[case("INBOX=")]
    fn malformed_targets_are_rejected(#[case] input: &str) {
        assert_err!(input.parse::<FolderTarget>());
    }
}
