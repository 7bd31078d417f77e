use futures::StreamExt as _;
use imap_proto::{Response, Status};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::imap::connection::{SendCommand, TransportError};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("username or password rejected")]
    Rejected,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Authenticates with LOGIN. The secret never reaches the log.
pub async fn login(
    connection: &mut impl SendCommand,
    username: &str,
    secret: &str,
) -> Result<(), LoginError> {
    debug!("LOGIN <user> <secret>");
    let command = format!("LOGIN {username} {secret}");
    let mut responses = connection.send(&command);
    while let Some(response) = responses.next().await {
        let response = response?;
        match response.parsed() {
            Response::Done {
                status: Status::Ok,
                code,
                ..
            } => {
                trace!("{code:?}");
                return Ok(());
            }
            Response::Done {
                status: Status::No, ..
            } => return Err(LoginError::Rejected),
            Response::Done {
                status,
                information,
                ..
            } => {
                return Err(TransportError::Protocol(format!(
                    "{status:?} in response to LOGIN: {information:?}"
                ))
                .into());
            }
            other => {
                warn!("ignoring unsolicited response during LOGIN");
                trace!("{other:?}");
            }
        }
    }
    Err(TransportError::Closed.into())
}
