use std::fmt;
use std::str::FromStr;

use crate::error::KeywordError;

/// How a key's value must be interpreted.
///
/// Assigned once per key, either from an explicit definition or inferred
/// from the first value seen for the key. Never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Float,
    Text,
}

impl ValueType {
    /// Type assigned to a key seen for the first time with `raw` as its value.
    pub fn infer(raw: &str) -> Self {
        if parse_float(raw).is_some() {
            ValueType::Float
        } else {
            ValueType::Text
        }
    }

    /// Convert a raw token according to this type.
    ///
    /// `None` only for a non-numeric token on a `Float` key; `Text` accepts
    /// anything verbatim.
    pub fn convert(self, raw: &str) -> Option<Value> {
        match self {
            ValueType::Float => parse_float(raw).map(Value::Float),
            ValueType::Text => Some(Value::Text(raw.to_string())),
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Float => f.write_str("float"),
            ValueType::Text => f.write_str("text"),
        }
    }
}

impl FromStr for ValueType {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" | "double" => Ok(ValueType::Float),
            "text" | "str" | "string" => Ok(ValueType::Text),
            other => Err(KeywordError::config(format!(
                "value type must be \"float\" or \"text\", got {other:?}"
            ))),
        }
    }
}

/// Config files use the same case-insensitive names and aliases as
/// [`FromStr`].
impl<'de> serde::Deserialize<'de> for ValueType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}

/// A single typed value in a parsed record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    Float(f64),
    Text(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Float(_) => None,
        }
    }
}

/// Renders the value as a record token: floats in their shortest
/// round-tripping form, text verbatim.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_float_for_numeric_tokens() {
        assert_eq!(ValueType::infer("12.5"), ValueType::Float);
        assert_eq!(ValueType::infer("-3"), ValueType::Float);
        assert_eq!(ValueType::infer("1e-4"), ValueType::Float);
        assert_eq!(ValueType::infer("hello"), ValueType::Text);
        assert_eq!(ValueType::infer("12.5x"), ValueType::Text);
    }

    #[test]
    fn float_conversion_rejects_text() {
        assert_eq!(ValueType::Float.convert("2.0"), Some(Value::Float(2.0)));
        assert_eq!(ValueType::Float.convert("notanumber"), None);
        assert_eq!(ValueType::Text.convert("12.5"), Some(Value::Text("12.5".into())));
    }

    #[test]
    fn type_names_accept_aliases() {
        assert_eq!("double".parse::<ValueType>().unwrap(), ValueType::Float);
        assert_eq!("String".parse::<ValueType>().unwrap(), ValueType::Text);
        assert!("int".parse::<ValueType>().is_err());

        let ty: ValueType = serde_json::from_str("\"str\"").unwrap();
        assert_eq!(ty, ValueType::Text);
    }

    #[test]
    fn deserialized_names_ignore_case() {
        let ty: ValueType = serde_json::from_str("\"Float\"").unwrap();
        assert_eq!(ty, ValueType::Float);
        let ty: ValueType = serde_json::from_str("\"TEXT\"").unwrap();
        assert_eq!(ty, ValueType::Text);

        let err = serde_json::from_str::<ValueType>("\"int\"").unwrap_err();
        assert!(err.to_string().contains("\"float\" or \"text\""), "{err}");
    }

    #[test]
    fn values_serialize_untagged() {
        let json = serde_json::to_string(&vec![Value::Float(12.5), Value::from("hello")]).unwrap();
        assert_eq!(json, r#"[12.5,"hello"]"#);
    }
}
