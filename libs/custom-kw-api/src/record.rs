use crate::schema::Schema;
use crate::value::Value;

/// Positional record of typed values. Slot `i` belongs to the key at index
/// `i` of the schema the record was parsed against.
///
/// Slots for schema keys that did not appear in the parsed input are `None`.
/// A record is only meaningful against the key order it was produced for;
/// it is not updated when the schema grows afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRecord(pub Vec<Option<Value>>);

impl ParsedRecord {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Drop all values and size the record to `len` empty slots.
    pub fn reset(&mut self, len: usize) {
        self.0.clear();
        self.0.resize(len, None);
    }

    /// Store `value` at `index`, growing the record with empty slots if the
    /// schema grew past the current length.
    pub fn set(&mut self, index: usize, value: Value) {
        if index >= self.0.len() {
            self.0.resize(index + 1, None);
        }
        self.0[index] = Some(value);
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Option<Value>] {
        &self.0
    }

    /// Values that were present, without their slot positions.
    pub fn present(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.iter().flatten()
    }

    /// Pair each slot with its key, in schema order.
    pub fn entries<'a>(
        &'a self,
        schema: &'a Schema,
    ) -> impl Iterator<Item = (&'a str, Option<&'a Value>)> + 'a {
        schema
            .iter()
            .enumerate()
            .map(move |(index, (key, _))| (key, self.get(index)))
    }

    /// JSON object keyed by schema key, in schema order. Absent slots map
    /// to `null`.
    pub fn to_json(&self, schema: &Schema) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in self.entries(schema) {
            let json = match value {
                Some(Value::Float(v)) => serde_json::Number::from_f64(*v)
                    .map(serde_json::Value::Number)
                    .unwrap_or_else(|| serde_json::Value::String(v.to_string())),
                Some(Value::Text(s)) => serde_json::Value::String(s.clone()),
                None => serde_json::Value::Null,
            };
            map.insert(key.to_string(), json);
        }
        serde_json::Value::Object(map)
    }
}
