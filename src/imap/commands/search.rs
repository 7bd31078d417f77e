use futures::StreamExt as _;
use imap_proto::{MailboxDatum, Response, Status};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::imap::{
    connection::{SendCommand, TransportError},
    message_id::MessageId,
};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("server rejected search criteria {criteria}")]
    Rejected { criteria: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Runs SEARCH in the currently selected folder. An empty result is a normal
/// outcome, not an error. The returned identifiers stay valid only while that
/// folder remains selected.
pub async fn search(
    connection: &mut impl SendCommand,
    criteria: &str,
) -> Result<Vec<MessageId>, SearchError> {
    let command = format!("SEARCH {criteria}");
    debug!("{command}");
    let mut responses = connection.send(&command);
    let mut ids = Vec::new();
    while let Some(response) = responses.next().await {
        let response = response?;
        match response.parsed() {
            Response::MailboxData(MailboxDatum::Search(found)) => {
                for seq in found {
                    match MessageId::try_from(seq) {
                        Ok(id) => ids.push(id),
                        Err(_) => warn!("server reported impossible message number 0"),
                    }
                }
            }
            Response::Done {
                status: Status::Ok, ..
            } => {
                trace!("search matched {} messages", ids.len());
                return Ok(ids);
            }
            Response::Done { information, .. } => {
                trace!("{information:?}");
                return Err(SearchError::Rejected {
                    criteria: criteria.to_string(),
                });
            }
            other => {
                warn!("ignoring unknown response to SEARCH");
                trace!("{other:?}");
            }
        }
    }
    Err(TransportError::Closed.into())
}
