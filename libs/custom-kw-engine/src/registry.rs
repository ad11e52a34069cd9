use indexmap::IndexMap;

use crate::error::EngineError;
use crate::keyword::CustomKeywordConfig;

/// Keywords by name, in declaration order. Each keyword owns its schema.
#[derive(Debug, Default)]
pub struct KeywordRegistry {
    keywords: IndexMap<String, CustomKeywordConfig>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword. Names must be unique.
    pub fn insert(&mut self, keyword: CustomKeywordConfig) -> Result<(), EngineError> {
        let name = keyword.name().to_string();
        if self.keywords.contains_key(&name) {
            return Err(EngineError::Config(format!("duplicate keyword '{name}'")));
        }
        self.keywords.insert(name, keyword);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&CustomKeywordConfig, EngineError> {
        self.keywords
            .get(name)
            .ok_or_else(|| EngineError::KeywordNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut CustomKeywordConfig, EngineError> {
        self.keywords
            .get_mut(name)
            .ok_or_else(|| EngineError::KeywordNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomKeywordConfig> + '_ {
        self.keywords.values()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let mut registry = KeywordRegistry::new();
        registry.insert(CustomKeywordConfig::new("A", "r", "o").unwrap()).unwrap();
        let err = registry
            .insert(CustomKeywordConfig::new("A", "r2", "o2").unwrap())
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_keyword_is_reported() {
        let registry = KeywordRegistry::new();
        let err = registry.get("NOPE").unwrap_err();
        assert_eq!(err.to_string(), "keyword not found: NOPE");
    }
}
