use futures::StreamExt as _;
use imap_proto::{
    MailboxDatum::{Exists, Flags, Recent},
    Response::{Data, Done, MailboxData},
    ResponseCode::{ReadOnly, Unseen},
    Status::{No, Ok},
};
use log::{debug, trace, warn};
use thiserror::Error;

use crate::imap::{
    connection::{SendCommand, TransportError},
    mailbox::{Mailbox, MailboxBuilder},
};

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("cannot select mailbox {mailbox}")]
    Rejected { mailbox: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Selects `mailbox` for read/write access, collecting the metadata the
/// server volunteers along the way.
pub async fn select(
    connection: &mut impl SendCommand,
    mailbox: &str,
) -> Result<Mailbox, SelectError> {
    let command = format!("SELECT {mailbox}");
    debug!("{command}");
    let mut responses = connection.send(&command);
    let mut new_mailbox = MailboxBuilder::default();
    new_mailbox.name(mailbox.to_string());
    while let Some(response) = responses.next().await {
        let response = response?;
        match response.parsed() {
            MailboxData(mailbox_datum) => match mailbox_datum {
                Flags(cows) => {
                    new_mailbox.flags(cows.iter().map(ToString::to_string).collect());
                }
                Exists(exists) => {
                    new_mailbox.exists(*exists);
                }
                Recent(recent) => {
                    new_mailbox.recent(*recent);
                }
                _ => {
                    warn!("ignoring unknown mailbox data response to SELECT");
                    trace!("{mailbox_datum:?}");
                }
            },
            Data {
                status: Ok,
                code: Some(Unseen(unseen)),
                ..
            } => {
                new_mailbox.unseen(*unseen);
            }
            Data {
                status: Ok,
                code,
                information,
            } => {
                trace!("{code:?} {information:?}");
            }
            Done { status, code, .. } => match status {
                Ok => {
                    if let Some(ReadOnly) = code {
                        new_mailbox.readonly(true);
                    }
                    let selected = new_mailbox
                        .build()
                        .expect("every mailbox field except the name has a default");
                    trace!("selected = {selected:?}");
                    return Result::Ok(selected);
                }
                No => {
                    return Err(SelectError::Rejected {
                        mailbox: mailbox.to_string(),
                    });
                }
                _ => {
                    // BAD means the folder name did not even parse as a
                    // command argument. Still local to this folder.
                    return Err(SelectError::Rejected {
                        mailbox: mailbox.to_string(),
                    });
                }
            },
            _ => {
                warn!("ignoring unknown response to SELECT");
                trace!("{:?}", response.parsed());
            }
        }
    }
    Err(TransportError::Closed.into())
}
