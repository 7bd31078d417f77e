use crate::imap::connection::SendCommand;

use super::{
    commands::{LoginError, login},
    session::Session,
};

/// Unauthenticated end of a connection. Only good for one thing.
pub struct Client<T: SendCommand> {
    connection: T,
}

impl<T: SendCommand> Client<T> {
    pub fn new(connection: T) -> Self {
        Self { connection }
    }

    pub async fn login(mut self, username: &str, secret: &str) -> Result<Session<T>, LoginError> {
        login(&mut self.connection, username, secret).await?;
        Ok(Session::new(self.connection))
    }
}
