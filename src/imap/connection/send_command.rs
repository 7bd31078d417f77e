use futures::Stream;

use super::codec::{ResponseData, TransportError};

/// Seam between the command layer and the network. Production code runs
/// against [`super::Connection`]; tests substitute a scripted mock.
pub trait SendCommand {
    type Responses<'a>: Stream<Item = Result<ResponseData, TransportError>> + Unpin
    where
        Self: 'a;

    fn send<'a>(&'a mut self, command: &'a str) -> Self::Responses<'a>;
}
