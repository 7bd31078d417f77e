use std::{
    borrow::Cow,
    pin::Pin,
    task::{Context, Poll, ready},
};

use futures::{SinkExt as _, Stream, TryStreamExt as _};
use imap_proto::Request;

use super::{
    codec::{ResponseData, TransportError},
    connection::ImapStream,
    tag_generator::TagGenerator,
};

enum ResponseStreamState {
    Start,
    Sending,
    Receiving,
    Done,
}

/// Responses to a single tagged command. The command goes out on first poll;
/// the stream ends after the matching tagged status line.
pub struct ResponseStream<'a> {
    imap_stream: &'a mut ImapStream,
    state: ResponseStreamState,
    tag_generator: &'a mut TagGenerator,
    tag: String,
    command: &'a str,
}

impl<'a> ResponseStream<'a> {
    pub fn new(
        imap_stream: &'a mut ImapStream,
        tag_generator: &'a mut TagGenerator,
        command: &'a str,
    ) -> Self {
        Self {
            imap_stream,
            state: ResponseStreamState::Start,
            tag_generator,
            tag: String::with_capacity(0),
            command,
        }
    }

    fn start_sending(&mut self) -> Result<(), TransportError> {
        let tag = self.tag_generator.next();
        let request = Request(
            Cow::Borrowed(tag.as_bytes()),
            Cow::Borrowed(self.command.as_bytes()),
        );
        self.imap_stream.start_send_unpin(&request)?;
        self.tag = tag;
        self.state = ResponseStreamState::Sending;
        Ok(())
    }

    fn fail(&mut self, error: TransportError) -> Poll<Option<Result<ResponseData, TransportError>>> {
        self.state = ResponseStreamState::Done;
        Poll::Ready(Some(Err(error)))
    }
}

impl Stream for ResponseStream<'_> {
    type Item = Result<ResponseData, TransportError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.state {
                ResponseStreamState::Start => {
                    if let Err(e) = ready!(self.imap_stream.poll_ready_unpin(cx)) {
                        return self.fail(e);
                    }
                    if let Err(e) = self.start_sending() {
                        return self.fail(e);
                    }
                }
                ResponseStreamState::Sending => {
                    if let Err(e) = ready!(self.imap_stream.poll_flush_unpin(cx)) {
                        return self.fail(e);
                    }
                    self.state = ResponseStreamState::Receiving;
                }
                ResponseStreamState::Receiving => {
                    return match ready!(self.imap_stream.try_poll_next_unpin(cx)) {
                        None => self.fail(TransportError::Closed),
                        Some(Ok(data)) => {
                            if let Some(tag) = data.request_id() {
                                debug_assert_eq!(
                                    tag.0, self.tag,
                                    "response tag does not match request tag",
                                );
                                self.state = ResponseStreamState::Done;
                            }
                            Poll::Ready(Some(Ok(data)))
                        }
                        Some(Err(e)) => self.fail(e),
                    };
                }
                ResponseStreamState::Done => return Poll::Ready(None),
            }
        }
    }
}
