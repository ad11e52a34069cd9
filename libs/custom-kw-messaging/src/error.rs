#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    #[error("connection closed mid-frame")]
    Truncated,

    #[error("connection closed before reply")]
    NoReply,

    #[error("reply is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
