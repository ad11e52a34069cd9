use std::fmt;

/// Error kind for keyword errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid construction arguments or configuration values.
    Config,
    /// Schema invariant violation (growing a fixed schema, retyping a key).
    Schema,
    /// Lookup of a key that is not in the schema.
    Lookup,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Schema => f.write_str("schema"),
            ErrorKind::Lookup => f.write_str("lookup"),
        }
    }
}

/// Keyword error — returned by schema and keyword operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordError {
    pub kind: ErrorKind,
    pub message: String,
}

impl KeywordError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Schema, message: msg.into() }
    }

    /// `KeyNotFound`: the key is absent from the schema.
    pub fn key_not_found(key: &str) -> Self {
        Self { kind: ErrorKind::Lookup, message: format!("key not found: '{key}'") }
    }

    pub fn is_key_not_found(&self) -> bool {
        self.kind == ErrorKind::Lookup
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for KeywordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind() {
        let err = KeywordError::key_not_found("pressure").with_context("FIELD");
        assert!(err.is_key_not_found());
        assert_eq!(err.message, "FIELD: key not found: 'pressure'");
        assert_eq!(err.to_string(), "lookup: FIELD: key not found: 'pressure'");
    }

    #[test]
    fn lookup_is_the_only_key_not_found_kind() {
        assert!(!KeywordError::schema("fixed schema").is_key_not_found());
        assert_eq!(KeywordError::config("bad").kind, ErrorKind::Config);
    }
}
