use futures::{Stream, StreamExt as _};
use log::{debug, trace, warn};

use crate::imap::connection::{ResponseData, SendCommand, TransportError};

/// Unselects the current folder. Best-effort: cleanup must never fail the
/// run, so the server's verdict is only logged.
pub async fn close(connection: &mut impl SendCommand) {
    debug!("CLOSE");
    drain(connection.send("CLOSE"), "CLOSE").await;
}

pub(super) async fn drain<S>(mut responses: S, command: &str)
where
    S: Stream<Item = Result<ResponseData, TransportError>> + Unpin,
{
    while let Some(response) = responses.next().await {
        match response {
            Ok(response) => trace!("{:?}", response.parsed()),
            Err(e) => {
                warn!("transport fault during {command}: {e}");
                return;
            }
        }
    }
}
