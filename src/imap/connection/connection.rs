use std::io;

use futures::StreamExt as _;
use log::{debug, trace};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_native_tls::{TlsConnector, TlsStream, native_tls};
use tokio_util::codec::Framed;

use super::{
    codec::{ImapCodec, ResponseData, TransportError},
    response_stream::ResponseStream,
    send_command::SendCommand,
    tag_generator::TagGenerator,
};

pub type ImapStream = Framed<TlsStream<TcpStream>, ImapCodec>;

/// Run-fatal: without a connection there is nothing to recover per folder.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("cannot reach {host}:{port}")]
    Io {
        host: String,
        port: u16,
        source: io::Error,
    },
    #[error("cannot establish tls with {host}")]
    Tls {
        host: String,
        source: native_tls::Error,
    },
    #[error("server closed the connection before greeting")]
    NoGreeting,
    #[error("server greeting was unreadable")]
    Greeting(#[source] TransportError),
}

pub struct Connection {
    stream: ImapStream,
    tag_generator: TagGenerator,
}

impl Connection {
    pub async fn connect_to(host: &str, port: u16) -> Result<(Self, ResponseData), ConnectError> {
        debug!("connecting to {host}:{port}");
        let tls = native_tls::TlsConnector::new().map_err(|source| ConnectError::Tls {
            host: host.to_string(),
            source,
        })?;
        let tls = TlsConnector::from(tls);
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| ConnectError::Io {
                host: host.to_string(),
                port,
                source,
            })?;
        let stream = tls
            .connect(host, stream)
            .await
            .map_err(|source| ConnectError::Tls {
                host: host.to_string(),
                source,
            })?;

        let mut stream = Framed::new(stream, ImapCodec::default());

        let greeting = stream
            .next()
            .await
            .ok_or(ConnectError::NoGreeting)?
            .map_err(ConnectError::Greeting)?;
        trace!("greeting = {:?}", String::from_utf8_lossy(greeting.raw()));

        Ok((
            Connection {
                stream,
                tag_generator: TagGenerator::default(),
            },
            greeting,
        ))
    }
}

impl SendCommand for Connection {
    type Responses<'a> = ResponseStream<'a>;

    fn send<'a>(&'a mut self, command: &'a str) -> Self::Responses<'a> {
        ResponseStream::new(&mut self.stream, &mut self.tag_generator, command)
    }
}
