use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::MessagingError;
use crate::framing::{FrameReader, write_frame};

/// Reply sent for every request.
pub const ACKNOWLEDGEMENT: &str = "msg received";

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 5555;

/// Pause after a failed accept, so a persistent failure such as running
/// out of file descriptors does not spin the loop.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Reply side of the request/reply pair: logs each description it receives
/// and answers with [`ACKNOWLEDGEMENT`].
pub struct MessageServer {
    listener: TcpListener,
    received: Option<mpsc::UnboundedSender<String>>,
}

impl MessageServer {
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, MessagingError> {
        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;
        tracing::info!(addr = %local, "message server listening");
        Ok(Self { listener, received: None })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, MessagingError> {
        Ok(self.listener.local_addr()?)
    }

    /// Forward every received description to the returned channel, in
    /// addition to logging it.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.received = Some(tx);
        rx
    }

    /// Accept connections until `shutdown` is cancelled. A failed accept is
    /// logged and the loop keeps going.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), MessagingError> {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("message server stopping");
                    return Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed, retrying");
                            tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                            continue;
                        }
                    };
                    tracing::debug!(peer = %peer, "reporter connected");
                    let received = self.received.clone();
                    let token = shutdown.child_token();
                    tokio::spawn(async move {
                        if let Err(e) = serve_connection(stream, peer, received, token).await {
                            tracing::warn!(peer = %peer, error = %e, "reporter connection failed");
                        }
                    });
                }
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    received: Option<mpsc::UnboundedSender<String>>,
    shutdown: CancellationToken,
) -> Result<(), MessagingError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = FrameReader::new(read_half);

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            frame = reader.next_frame() => frame?,
        };
        let Some(bytes) = frame else {
            tracing::debug!(peer = %peer, "reporter disconnected");
            return Ok(());
        };

        let message = String::from_utf8_lossy(&bytes).into_owned();
        tracing::info!(peer = %peer, message = %message, "message received");
        if let Some(tx) = &received {
            let _ = tx.send(message);
        }
        write_frame(&mut write_half, ACKNOWLEDGEMENT.as_bytes()).await?;
    }
}
