use std::collections::HashSet;

use custom_kw_api::{ParsedRecord, Schema, ValueType};

use crate::error::ParseError;

/// Parses `key value` result lines against a schema.
///
/// Stateless: everything it learns is written into the schema it is given.
/// A growable schema registers every new key with the type inferred from
/// the first value seen for it; a fixed schema rejects unknown keys.
pub struct ResultRecordParser;

impl ResultRecordParser {
    /// Parse `lines` into `destination`, aligned to `schema` order.
    ///
    /// Returns `false` if any line is rejected. In that case `destination`
    /// must be discarded, and `schema` keeps every key registered before the
    /// offending line.
    pub fn parse<I, S>(schema: &mut Schema, lines: I, destination: &mut ParsedRecord) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match Self::try_parse(schema, lines, destination) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "result record rejected");
                false
            }
        }
    }

    /// Same as [`parse`](Self::parse), reporting why a record was rejected.
    pub fn try_parse<I, S>(
        schema: &mut Schema,
        lines: I,
        destination: &mut ParsedRecord,
    ) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        destination.reset(schema.len());
        let mut seen = HashSet::new();

        for (n, line) in lines.into_iter().enumerate() {
            let line_no = n + 1;
            let (key, raw) = split_record(line.as_ref()).map_err(|tokens| {
                ParseError::MalformedLine { line: line_no, tokens }
            })?;

            let (index, value_type) = match schema.get_full(key) {
                Some(found) => found,
                None => {
                    let value_type = ValueType::infer(raw);
                    let index = schema.register(key, value_type).map_err(|_| {
                        ParseError::UnknownKey { line: line_no, key: key.to_string() }
                    })?;
                    tracing::trace!(key, %value_type, index, "registered key");
                    (index, value_type)
                }
            };

            if !seen.insert(index) {
                return Err(ParseError::DuplicateKey { line: line_no, key: key.to_string() });
            }

            let value = value_type.convert(raw).ok_or_else(|| ParseError::TypeMismatch {
                line: line_no,
                key: key.to_string(),
                value: raw.to_string(),
            })?;
            destination.set(index, value);
        }

        Ok(())
    }
}

/// Split a record into exactly two whitespace-delimited tokens.
/// On failure returns the number of tokens found.
fn split_record(line: &str) -> Result<(&str, &str), usize> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(key), Some(value), None) => Ok((key, value)),
        _ => Err(line.split_whitespace().count()),
    }
}
