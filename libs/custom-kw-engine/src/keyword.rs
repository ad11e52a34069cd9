use std::fmt;
use std::path::{Path, PathBuf};

use custom_kw_api::{KeywordError, ParsedRecord, Schema, SchemaMode, ValueType};

use crate::error::{EngineError, ParseError};
use crate::io::render_pattern;
use crate::parser::ResultRecordParser;

/// A named custom keyword: a schema of scalar fields plus the file
/// patterns external I/O uses to locate result and output files.
///
/// Built either in parse mode (growable schema, learnt from result files)
/// or in definition mode (fixed schema). The mode never changes afterwards.
#[derive(Debug, Clone)]
pub struct CustomKeywordConfig {
    name: String,
    result_file: Option<String>,
    output_file: Option<String>,
    schema: Schema,
}

impl CustomKeywordConfig {
    /// Parse-mode keyword with an empty, growable schema.
    ///
    /// Both patterns are stored verbatim and must be non-empty.
    pub fn new(
        name: impl Into<String>,
        result_file: impl Into<String>,
        output_file: impl Into<String>,
    ) -> Result<Self, KeywordError> {
        let name = name.into();
        let result_file = result_file.into();
        let output_file = output_file.into();

        if result_file.is_empty() {
            return Err(KeywordError::config(format!("{name}: result_file must not be empty")));
        }
        if output_file.is_empty() {
            return Err(KeywordError::config(format!("{name}: output_file must not be empty")));
        }

        Ok(Self {
            name,
            result_file: Some(result_file),
            output_file: Some(output_file),
            schema: Schema::growable(),
        })
    }

    /// Definition-mode keyword with a fixed schema in the definition's order.
    pub fn with_definition<I, K>(
        name: impl Into<String>,
        definition: I,
    ) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        let name = name.into();
        let schema = Schema::fixed(definition).map_err(|e| e.with_context(&name))?;
        Ok(Self {
            name,
            result_file: None,
            output_file: None,
            schema,
        })
    }

    /// Build from optional parts, as a config file or form supplies them.
    ///
    /// A definition selects definition mode. Result/output patterns given
    /// alongside it are ignored with a warning. Without a definition both
    /// patterns are required.
    pub fn from_parts<I, K>(
        name: impl Into<String>,
        result_file: Option<&str>,
        output_file: Option<&str>,
        definition: Option<I>,
    ) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        let name = name.into();
        match definition {
            Some(definition) => {
                if result_file.is_some() || output_file.is_some() {
                    tracing::warn!(
                        keyword = %name,
                        result_file = result_file.unwrap_or_default(),
                        output_file = output_file.unwrap_or_default(),
                        "keyword has a definition, ignoring result_file and output_file"
                    );
                }
                Self::with_definition(name, definition)
            }
            None => {
                let result_file = result_file.ok_or_else(|| {
                    KeywordError::config(format!(
                        "{name}: result_file is required without a definition"
                    ))
                })?;
                let output_file = output_file.ok_or_else(|| {
                    KeywordError::config(format!(
                        "{name}: output_file is required without a definition"
                    ))
                })?;
                Self::new(name, result_file, output_file)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Result file pattern. `None` for definition-mode keywords.
    pub fn result_file(&self) -> Option<&str> {
        self.result_file.as_deref()
    }

    /// Output file pattern. `None` for definition-mode keywords.
    pub fn output_file(&self) -> Option<&str> {
        self.output_file.as_deref()
    }

    /// Result file path for realization `iens`.
    pub fn result_path(&self, iens: usize) -> Option<PathBuf> {
        self.result_file().map(|p| PathBuf::from(render_pattern(p, iens)))
    }

    /// Output file path for realization `iens`.
    pub fn output_path(&self, iens: usize) -> Option<PathBuf> {
        self.output_file().map(|p| PathBuf::from(render_pattern(p, iens)))
    }

    pub fn mode(&self) -> SchemaMode {
        self.schema.mode()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of keys currently in the schema.
    pub fn size(&self) -> usize {
        self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schema.is_empty()
    }

    /// Snapshot of the keys in schema order.
    pub fn keys(&self) -> Vec<String> {
        self.schema.keys()
    }

    /// Iterate over a snapshot of the keys taken now. Later schema growth
    /// does not affect the returned iterator.
    pub fn iter(&self) -> Keys {
        Keys(self.keys().into_iter())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.schema.contains_key(key)
    }

    pub fn is_float_key(&self, key: &str) -> Result<bool, KeywordError> {
        self.schema.is_float_key(key)
    }

    pub fn index_of(&self, key: &str) -> Result<usize, KeywordError> {
        self.schema.index_of(key)
    }

    /// Parse raw result lines into `destination`. See [`ResultRecordParser::parse`].
    pub fn parse<I, S>(&mut self, lines: I, destination: &mut ParsedRecord) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.try_parse(lines, destination) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(keyword = %self.name, error = %e, "result record rejected");
                false
            }
        }
    }

    pub fn try_parse<I, S>(
        &mut self,
        lines: I,
        destination: &mut ParsedRecord,
    ) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.schema.len();
        let result = ResultRecordParser::try_parse(&mut self.schema, lines, destination);
        if self.schema.len() > before {
            tracing::info!(
                keyword = %self.name,
                added = self.schema.len() - before,
                size = self.schema.len(),
                "keyword schema grew"
            );
        }
        result
    }

    /// Read `path` and parse its lines into `destination`.
    ///
    /// `Err` only for I/O failures; a rejected record is `Ok(false)`.
    pub fn parse_result_file(
        &mut self,
        path: impl AsRef<Path>,
        destination: &mut ParsedRecord,
    ) -> Result<bool, EngineError> {
        match self.try_parse_result_file(path, destination) {
            Ok(()) => Ok(true),
            Err(EngineError::Rejected { path, reason }) => {
                tracing::debug!(
                    keyword = %self.name,
                    path = %path,
                    error = %reason,
                    "result file rejected"
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Same as [`parse_result_file`](Self::parse_result_file), reporting a
    /// rejected record as [`EngineError::Rejected`].
    pub fn try_parse_result_file(
        &mut self,
        path: impl AsRef<Path>,
        destination: &mut ParsedRecord,
    ) -> Result<(), EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        self.try_parse(content.lines(), destination)
            .map_err(|reason| EngineError::Rejected {
                path: path.display().to_string(),
                reason,
            })
    }
}

impl fmt::Display for CustomKeywordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomKeywordConfig(name = {}, len = {})", self.name, self.size())
    }
}

/// Owning iterator over a key snapshot.
#[derive(Debug, Clone)]
pub struct Keys(std::vec::IntoIter<String>);

impl Iterator for Keys {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Keys {}

impl IntoIterator for &CustomKeywordConfig {
    type Item = String;
    type IntoIter = Keys;

    fn into_iter(self) -> Keys {
        self.iter()
    }
}
