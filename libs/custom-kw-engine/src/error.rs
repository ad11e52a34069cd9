use custom_kw_api::KeywordError;

/// Reason a result record was rejected. Any of these aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected `key value`, got {tokens} token(s)")]
    MalformedLine { line: usize, tokens: usize },

    #[error("line {line}: unknown key '{key}' for a fixed schema")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: value '{value}' for float key '{key}' is not numeric")]
    TypeMismatch { line: usize, key: String, value: String },

    #[error("line {line}: key '{key}' appears more than once")]
    DuplicateKey { line: usize, key: String },
}

impl ParseError {
    /// 1-based line number of the offending record.
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedLine { line, .. }
            | ParseError::UnknownKey { line, .. }
            | ParseError::TypeMismatch { line, .. }
            | ParseError::DuplicateKey { line, .. } => *line,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("keyword error: {0}")]
    Keyword(#[from] KeywordError),

    #[error("keyword not found: {0}")]
    KeywordNotFound(String),

    #[error("io error ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("result file {path} rejected: {reason}")]
    Rejected {
        path: String,
        #[source]
        reason: ParseError,
    },
}

impl EngineError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Add context to the error.
    ///
    /// For `Keyword` variant, context is added to the inner `KeywordError`.
    /// For other variants, context is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Keyword(e) => EngineError::Keyword(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::KeywordNotFound(msg) => {
                EngineError::KeywordNotFound(format!("{ctx}: {msg}"))
            }
            other => other,
        }
    }
}
