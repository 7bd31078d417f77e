use futures::StreamExt as _;
use imap_proto::{Response, Status};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::imap::connection::{SendCommand, TransportError};

#[derive(Debug, Error)]
pub enum ExpungeError {
    #[error("server rejected expunge")]
    Rejected,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Permanently removes every message flagged `\Deleted` in the selected
/// folder.
pub async fn expunge(connection: &mut impl SendCommand) -> Result<(), ExpungeError> {
    debug!("EXPUNGE");
    let mut responses = connection.send("EXPUNGE");
    let mut expunged = 0u32;
    while let Some(response) = responses.next().await {
        let response = response?;
        match response.parsed() {
            Response::Expunge(seq) => {
                trace!("expunged message {seq}");
                expunged += 1;
            }
            Response::Done {
                status: Status::Ok, ..
            } => {
                debug!("expunge removed {expunged} messages");
                return Ok(());
            }
            Response::Done { .. } => return Err(ExpungeError::Rejected),
            other => {
                warn!("ignoring unknown response to EXPUNGE");
                trace!("{other:?}");
            }
        }
    }
    Err(TransportError::Closed.into())
}
