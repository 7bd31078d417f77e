use crate::imap::connection::SendCommand;

use super::{
    commands::{
        ExpungeError, SearchError, SelectError, close, expunge, logout, search, select,
        store_deleted,
    },
    mailbox::Mailbox,
    message_id::MessageId,
};

/// Authenticated session. Message identifiers handed out by [`Self::search`]
/// belong to the folder selected at that moment and must not outlive the
/// selection.
pub struct Session<T: SendCommand> {
    connection: T,
}

impl<T: SendCommand> Session<T> {
    pub(crate) fn new(connection: T) -> Self {
        Self { connection }
    }

    pub async fn select(&mut self, mailbox: &str) -> Result<Mailbox, SelectError> {
        select(&mut self.connection, mailbox).await
    }

    pub async fn search(&mut self, criteria: &str) -> Result<Vec<MessageId>, SearchError> {
        search(&mut self.connection, criteria).await
    }

    pub async fn flag_deleted(&mut self, id: MessageId) {
        store_deleted(&mut self.connection, id).await;
    }

    pub async fn expunge(&mut self) -> Result<(), ExpungeError> {
        expunge(&mut self.connection).await
    }

    pub async fn close(&mut self) {
        close(&mut self.connection).await;
    }

    /// Consumes the session; there is nothing useful left after LOGOUT.
    pub async fn logout(mut self) {
        logout(&mut self.connection).await;
    }
}
