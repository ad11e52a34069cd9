use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::MessagingError;

/// Frame header: 4-byte big-endian payload length.
const LENGTH_BYTES: usize = 4;

/// Largest payload accepted in either direction.
pub const MAX_PAYLOAD: usize = 1024 * 1024;

/// Try to take one frame from the front of `buf`.
///
/// Returns the payload and the number of bytes consumed, or `None` if `buf`
/// does not hold a complete frame yet.
pub fn decode(buf: &[u8]) -> Result<Option<(Vec<u8>, usize)>, MessagingError> {
    if buf.len() < LENGTH_BYTES {
        return Ok(None);
    }

    let len = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    if len > MAX_PAYLOAD {
        return Err(MessagingError::FrameTooLarge { len, max: MAX_PAYLOAD });
    }

    let total = LENGTH_BYTES + len;
    if buf.len() < total {
        return Ok(None);
    }

    Ok(Some((buf[LENGTH_BYTES..total].to_vec(), total)))
}

/// Append `data` as one frame to `buf`.
pub fn encode(data: &[u8], buf: &mut Vec<u8>) -> Result<(), MessagingError> {
    let len = data.len();
    if len > MAX_PAYLOAD {
        return Err(MessagingError::FrameTooLarge { len, max: MAX_PAYLOAD });
    }
    buf.extend_from_slice(&(len as u32).to_be_bytes());
    buf.extend_from_slice(data);
    Ok(())
}

pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), MessagingError> {
    let mut buf = Vec::with_capacity(LENGTH_BYTES + data.len());
    encode(data, &mut buf)?;
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

/// Buffered frame reader over a byte stream.
pub struct FrameReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, buf: Vec::new() }
    }

    /// Next complete frame. `None` when the peer closed cleanly between frames.
    pub async fn next_frame(&mut self) -> Result<Option<Vec<u8>>, MessagingError> {
        let mut chunk = [0u8; 4096];
        loop {
            if let Some((payload, consumed)) = decode(&self.buf)? {
                self.buf.drain(..consumed);
                return Ok(Some(payload));
            }

            let n = self.inner.read(&mut chunk).await?;
            if n == 0 {
                return if self.buf.is_empty() {
                    Ok(None)
                } else {
                    Err(MessagingError::Truncated)
                };
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}
