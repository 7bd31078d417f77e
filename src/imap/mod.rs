mod client;
mod commands;
mod connection;
mod mailbox;
mod message_id;
mod session;

pub use client::Client;
pub use commands::ExpungeError;
pub use commands::LoginError;
pub use commands::SearchError;
pub use commands::SelectError;
pub use connection::ConnectError;
pub use connection::Connection;
pub use connection::SendCommand;
pub use connection::TransportError;
pub use mailbox::Mailbox;
pub use message_id::MessageId;
pub use session::Session;

#[cfg(test)]
pub use connection::mock_connection;
