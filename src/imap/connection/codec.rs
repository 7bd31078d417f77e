use std::{fmt, io, mem::transmute};

use bytes::{BufMut as _, Bytes, BytesMut};
use imap_proto::{Request, RequestId, Response};
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};

/// Fault below the command layer. Surfaces through whichever command it
/// interrupts.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("i/o failure on the imap connection")]
    Io(#[from] io::Error),
    #[error("server response could not be parsed")]
    Parse,
    #[error("connection closed before the server finished responding")]
    Closed,
    #[error("unexpected protocol response: {0}")]
    Protocol(String),
}

/// One server response together with the buffer it was parsed from, so the
/// borrowed [`Response`] stays valid without copying.
pub struct ResponseData {
    raw: Bytes,
    // invariant: borrows from raw, which is never mutated
    response: Response<'static>,
}

impl ResponseData {
    pub fn parsed(&self) -> &Response<'_> {
        &self.response
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        match &self.response {
            Response::Done { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    #[cfg(test)]
    pub fn from_parsed(response: Response<'static>) -> Self {
        Self {
            raw: Bytes::new(),
            response,
        }
    }
}

impl fmt::Debug for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.response.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct ImapCodec {
    decode_need_message_bytes: usize,
}

impl Decoder for ImapCodec {
    type Item = ResponseData;
    type Error = TransportError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if buf.len() < self.decode_need_message_bytes {
            return Ok(None);
        }
        let (response, response_len) = match imap_proto::parser::parse_response(buf) {
            Ok((remaining, response)) => {
                // The parsed response borrows from buf. split_to below moves
                // the backing memory into raw without copying, so the borrow
                // stays valid for the lifetime of the ResponseData.
                let response = unsafe { transmute::<Response<'_>, Response<'static>>(response) };
                (response, buf.len() - remaining.len())
            }
            Err(nom::Err::Incomplete(nom::Needed::Size(min))) => {
                self.decode_need_message_bytes = buf.len() + min.get();
                return Ok(None);
            }
            Err(nom::Err::Incomplete(nom::Needed::Unknown)) => return Ok(None),
            Err(_) => return Err(TransportError::Parse),
        };
        let raw = buf.split_to(response_len).freeze();
        self.decode_need_message_bytes = 0;
        Ok(Some(ResponseData { raw, response }))
    }
}

impl<'a> Encoder<&'a Request<'a>> for ImapCodec {
    type Error = TransportError;

    fn encode(&mut self, request: &Request<'_>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let Request(tag, command) = request;
        dst.reserve(tag.len() + command.len() + 3);
        if !tag.is_empty() {
            dst.put_slice(tag);
            dst.put_u8(b' ');
        }
        dst.put_slice(command);
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
