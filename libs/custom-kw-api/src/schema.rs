use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::KeywordError;
use crate::value::ValueType;

/// Lifecycle variant of a schema, chosen at construction and never switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaMode {
    /// Built in one shot from a definition; no key may be added later.
    Fixed,
    /// Starts empty; parsing appends keys with an inferred type.
    Growable,
}

/// Ordered key → type mapping.
///
/// Key position (insertion order) is the index into every `ParsedRecord`
/// aligned to this schema. Keys are unique and case-sensitive, a key's type
/// never changes once assigned, and keys are never removed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Schema {
    mode: SchemaMode,
    entries: IndexMap<String, ValueType>,
}

impl Schema {
    /// Empty schema that grows as result files are parsed.
    pub fn growable() -> Self {
        Self {
            mode: SchemaMode::Growable,
            entries: IndexMap::new(),
        }
    }

    /// Fixed schema in the definition's iteration order.
    ///
    /// An empty definition yields a valid, empty fixed schema. A key that
    /// appears twice in the definition is rejected.
    pub fn fixed<I, K>(definition: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (K, ValueType)>,
        K: Into<String>,
    {
        let mut entries = IndexMap::new();
        for (key, value_type) in definition {
            let key = key.into();
            if entries.contains_key(&key) {
                return Err(KeywordError::schema(format!(
                    "duplicate key '{key}' in definition"
                )));
            }
            entries.insert(key, value_type);
        }
        Ok(Self {
            mode: SchemaMode::Fixed,
            entries,
        })
    }

    pub fn mode(&self) -> SchemaMode {
        self.mode
    }

    pub fn is_fixed(&self) -> bool {
        self.mode == SchemaMode::Fixed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn value_type(&self, key: &str) -> Option<ValueType> {
        self.entries.get(key).copied()
    }

    /// Position and type of `key`, if present.
    pub fn get_full(&self, key: &str) -> Option<(usize, ValueType)> {
        self.entries.get_full(key).map(|(index, _, ty)| (index, *ty))
    }

    pub fn is_float_key(&self, key: &str) -> Result<bool, KeywordError> {
        self.value_type(key)
            .map(ValueType::is_float)
            .ok_or_else(|| KeywordError::key_not_found(key))
    }

    /// Zero-based position of `key` in schema order.
    pub fn index_of(&self, key: &str) -> Result<usize, KeywordError> {
        self.entries
            .get_index_of(key)
            .ok_or_else(|| KeywordError::key_not_found(key))
    }

    /// Key at `index` in schema order.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get_index(index).map(|(k, _)| k.as_str())
    }

    /// Snapshot of the keys in schema order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ValueType)> + '_ {
        self.entries.iter().map(|(k, ty)| (k.as_str(), *ty))
    }

    /// Register `key` with `value_type`, returning its index.
    ///
    /// Re-registering a key with its existing type is a no-op. Fails for a
    /// fixed schema when the key is new, and for any schema when the type
    /// would change.
    pub fn register(&mut self, key: &str, value_type: ValueType) -> Result<usize, KeywordError> {
        let fixed = self.is_fixed();
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                if *entry.get() != value_type {
                    return Err(KeywordError::schema(format!(
                        "key '{key}' is {}, cannot change to {value_type}",
                        entry.get()
                    )));
                }
                Ok(entry.index())
            }
            Entry::Vacant(_) if fixed => Err(KeywordError::schema(format!(
                "cannot add key '{key}' to a fixed schema"
            ))),
            Entry::Vacant(entry) => {
                let index = entry.index();
                entry.insert(value_type);
                Ok(index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_schema_keeps_definition_order() {
        let schema = Schema::fixed([
            ("zeta", ValueType::Float),
            ("alpha", ValueType::Text),
            ("mid", ValueType::Float),
        ])
        .unwrap();

        assert_eq!(schema.keys(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.index_of("alpha").unwrap(), 1);
        assert_eq!(schema.key_at(2), Some("mid"));
        assert!(schema.is_fixed());
    }

    #[test]
    fn fixed_schema_rejects_new_keys() {
        let mut schema = Schema::fixed([("a", ValueType::Float)]).unwrap();
        let err = schema.register("b", ValueType::Float).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Schema);
        assert_eq!(schema.register("a", ValueType::Float).unwrap(), 0);
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn duplicate_definition_key_is_rejected() {
        let err = Schema::fixed([("a", ValueType::Float), ("a", ValueType::Text)]).unwrap_err();
        assert!(err.message.contains("duplicate key 'a'"));
    }

    #[test]
    fn empty_definition_is_permitted() {
        let schema = Schema::fixed(Vec::<(String, ValueType)>::new()).unwrap();
        assert!(schema.is_empty());
        assert!(schema.is_fixed());
    }

    #[test]
    fn growable_schema_appends_and_never_retypes() {
        let mut schema = Schema::growable();
        assert_eq!(schema.register("pressure", ValueType::Float).unwrap(), 0);
        assert_eq!(schema.register("label", ValueType::Text).unwrap(), 1);

        assert!(schema.register("pressure", ValueType::Text).is_err());
        assert_eq!(schema.value_type("pressure"), Some(ValueType::Float));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn lookups_on_absent_keys_fail() {
        let schema = Schema::growable();
        assert!(schema.index_of("missing").unwrap_err().is_key_not_found());
        assert!(schema.is_float_key("missing").unwrap_err().is_key_not_found());
        assert!(!schema.contains_key("missing"));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut schema = Schema::growable();
        schema.register("Key", ValueType::Float).unwrap();
        schema.register("key", ValueType::Text).unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.is_float_key("Key").unwrap());
        assert!(!schema.is_float_key("key").unwrap());
    }
}
