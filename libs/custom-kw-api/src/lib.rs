pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{ErrorKind, KeywordError};
pub use record::ParsedRecord;
pub use schema::{Schema, SchemaMode};
pub use value::{Value, ValueType};
