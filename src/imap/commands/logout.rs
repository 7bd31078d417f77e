use log::debug;

use crate::imap::connection::SendCommand;

use super::close::drain;

/// Ends the session. The server announces BYE before the tagged OK; both are
/// only of interest to the trace log.
pub async fn logout(connection: &mut impl SendCommand) {
    debug!("LOGOUT");
    drain(connection.send("LOGOUT"), "LOGOUT").await;
}
