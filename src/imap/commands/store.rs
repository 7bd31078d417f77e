use futures::StreamExt as _;
use log::{debug, trace, warn};

use crate::imap::{connection::SendCommand, message_id::MessageId};

/// Marks one message for deletion. Best-effort: an individual STORE failure
/// is not distinguished from success, the expunge afterwards settles what
/// actually goes away.
pub async fn store_deleted(connection: &mut impl SendCommand, id: MessageId) {
    let command = format!("STORE {id} +FLAGS (\\Deleted)");
    debug!("{command}");
    let mut responses = connection.send(&command);
    while let Some(response) = responses.next().await {
        match response {
            Ok(response) => trace!("{:?}", response.parsed()),
            Err(e) => {
                warn!("transport fault while flagging message {id}: {e}");
                return;
            }
        }
    }
}
