use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::error::MessagingError;
use crate::framing::{FrameReader, write_frame};

/// Request side of the request/reply pair. Each report waits for the
/// server's reply before the next one can be sent.
pub struct Reporter {
    name: String,
    reader: FrameReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Reporter {
    pub async fn connect(
        name: impl Into<String>,
        addr: impl ToSocketAddrs,
    ) -> Result<Self, MessagingError> {
        let name = name.into();
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        tracing::debug!(reporter = %name, peer = %peer, "reporter connected");
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            name,
            reader: FrameReader::new(read_half),
            writer: write_half,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send `description` and return the server's reply.
    pub async fn report(&mut self, description: &str) -> Result<String, MessagingError> {
        write_frame(&mut self.writer, description.as_bytes()).await?;
        let reply = self.reader.next_frame().await?.ok_or(MessagingError::NoReply)?;
        Ok(String::from_utf8(reply)?)
    }
}
