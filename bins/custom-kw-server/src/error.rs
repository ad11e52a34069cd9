#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Engine(#[from] custom_kw_engine::EngineError),

    #[error("messaging: {0}")]
    Messaging(#[from] custom_kw_messaging::MessagingError),

    #[error("keyword '{0}' has no result_file pattern; pass the file explicitly")]
    NoResultFile(String),

    #[error("keyword '{0}' has no output_file pattern")]
    NoOutputFile(String),

    #[error("message server task failed: {0}")]
    ServerTask(String),

    #[error("signal: {0}")]
    Signal(#[from] std::io::Error),
}
