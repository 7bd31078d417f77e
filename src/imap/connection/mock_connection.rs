use std::{cell::RefCell, collections::VecDeque, rc::Rc, vec};

use futures::stream;
use imap_proto::Response;

use super::{
    codec::{ResponseData, TransportError},
    send_command::SendCommand,
};

type Batch = Vec<Result<ResponseData, TransportError>>;

/// Scripted stand-in for a [`super::Connection`]: every `send` consumes the
/// next batch of canned responses and records the command line so tests can
/// assert on what went over the wire.
#[derive(Default)]
pub struct MockConnection {
    scripted: VecDeque<Batch>,
    commands: Rc<RefCell<Vec<String>>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a mock that answers a single command.
    pub fn replying(batch: impl IntoIterator<Item = Response<'static>>) -> Self {
        Self::new().replies(batch)
    }

    /// Scripts the full reply to the next unscripted command.
    #[must_use]
    pub fn replies(mut self, batch: impl IntoIterator<Item = Response<'static>>) -> Self {
        self.scripted.push_back(
            batch
                .into_iter()
                .map(|response| Ok(ResponseData::from_parsed(response)))
                .collect(),
        );
        self
    }

    /// Scripts a transport fault as the reply to the next unscripted command.
    #[must_use]
    pub fn fails(mut self, error: TransportError) -> Self {
        self.scripted.push_back(vec![Err(error)]);
        self
    }

    /// Shared view on the commands sent so far. Survives moving the mock into
    /// a session.
    pub fn command_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.commands)
    }
}

impl SendCommand for MockConnection {
    type Responses<'a> = stream::Iter<vec::IntoIter<Result<ResponseData, TransportError>>>;

    fn send<'a>(&'a mut self, command: &'a str) -> Self::Responses<'a> {
        self.commands.borrow_mut().push(command.to_string());
        stream::iter(self.scripted.pop_front().unwrap_or_default())
    }
}
