use std::path::Path;

use custom_kw_api::ValueType;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::EngineError;
use crate::keyword::CustomKeywordConfig;
use crate::registry::KeywordRegistry;

/// Root configuration — a list of keyword declarations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default)]
    pub keywords: Vec<KeywordConfig>,
}

/// One keyword declaration.
///
/// With `definition` the keyword gets a fixed schema in declaration order;
/// without it, `result_file` and `output_file` are required and the schema
/// is learnt from result files.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordConfig {
    pub name: String,
    #[serde(default)]
    pub result_file: Option<String>,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub definition: Option<IndexMap<String, ValueType>>,
}

impl KeywordConfig {
    pub fn build(&self) -> Result<CustomKeywordConfig, EngineError> {
        CustomKeywordConfig::from_parts(
            self.name.as_str(),
            self.result_file.as_deref(),
            self.output_file.as_deref(),
            self.definition.clone(),
        )
        .map_err(EngineError::from)
    }
}

/// Config file syntax. Selected by file extension in [`KeywordsConfig::load_with`].
pub trait ConfigParser: Send + Sync {
    fn extensions(&self) -> &[&str];
    fn parse(&self, content: &str) -> Result<KeywordsConfig, EngineError>;
}

pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<KeywordsConfig, EngineError> {
        KeywordsConfig::parse(content)
    }
}

impl KeywordsConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        Self::load_with(path, &[&TomlParser])
    }

    /// Load configuration with the first parser claiming the file's extension.
    pub fn load_with(
        path: impl AsRef<Path>,
        parsers: &[&dyn ConfigParser],
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let parser = parsers
            .iter()
            .find(|p| p.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "{}: unsupported config extension {ext:?}",
                    path.display()
                ))
            })?;

        let content = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        parser
            .parse(&content)
            .map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Construct every declared keyword.
    pub fn build(&self) -> Result<KeywordRegistry, EngineError> {
        let mut registry = KeywordRegistry::new();
        for kw in &self.keywords {
            let keyword = kw.build()?;
            tracing::info!(
                keyword = %keyword.name(),
                mode = ?keyword.mode(),
                keys = keyword.size(),
                "keyword configured"
            );
            registry.insert(keyword)?;
        }
        Ok(registry)
    }
}
