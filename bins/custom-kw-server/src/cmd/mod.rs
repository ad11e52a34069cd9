pub mod keys;
pub mod parse;
pub mod report;
pub mod serve;

use std::path::Path;

use custom_kw_config_hcl::HclParser;
use custom_kw_engine::{KeywordRegistry, KeywordsConfig, TomlParser};

use crate::error::ServerError;

/// Load the config file and construct every keyword it declares.
pub fn load_registry(path: &Path) -> Result<KeywordRegistry, ServerError> {
    let config = KeywordsConfig::load_with(path, &[&TomlParser, &HclParser])?;
    tracing::debug!(config = %path.display(), keywords = config.keywords.len(), "loaded config");
    Ok(config.build()?)
}
