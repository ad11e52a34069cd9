pub mod config;
pub mod data_model;
pub mod error;
pub mod io;
pub mod keyword;
pub mod parser;
pub mod registry;

pub use config::{ConfigParser, KeywordConfig, KeywordsConfig, TomlParser};
pub use error::{EngineError, ParseError};
pub use keyword::{CustomKeywordConfig, Keys};
pub use parser::ResultRecordParser;
pub use registry::KeywordRegistry;
