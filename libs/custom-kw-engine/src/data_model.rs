//! Backing model for the data-keyword form.
//!
//! The form picks input/output file formats and file paths and reads or
//! writes them by attribute name. Names are resolved to an
//! [`AttributeBinding`] once, when the form wires a widget, so each access
//! afterwards is a plain typed get/set.

use std::fmt;
use std::str::FromStr;

use custom_kw_api::KeywordError;
use serde::{Deserialize, Serialize};

/// File format for data keyword input and output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    #[default]
    Undefined,
    Ascii,
    AsciiTemplate,
    BinaryFloat,
    BinaryDouble,
}

impl FileFormat {
    /// Formats a result file can be read in.
    pub const INPUT_TYPES: &'static [FileFormat] =
        &[FileFormat::Ascii, FileFormat::BinaryFloat, FileFormat::BinaryDouble];

    /// Formats an output file can be written in.
    pub const OUTPUT_TYPES: &'static [FileFormat] = &[
        FileFormat::Ascii,
        FileFormat::AsciiTemplate,
        FileFormat::BinaryFloat,
        FileFormat::BinaryDouble,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Undefined => "undefined",
            FileFormat::Ascii => "ascii",
            FileFormat::AsciiTemplate => "ascii_template",
            FileFormat::BinaryFloat => "binary_float",
            FileFormat::BinaryDouble => "binary_double",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "undefined" => Ok(FileFormat::Undefined),
            "ascii" => Ok(FileFormat::Ascii),
            "ascii_template" => Ok(FileFormat::AsciiTemplate),
            "binary_float" => Ok(FileFormat::BinaryFloat),
            "binary_double" => Ok(FileFormat::BinaryDouble),
            other => Err(KeywordError::config(format!("unknown file format {other:?}"))),
        }
    }
}

/// Form model for a data keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    pub name: String,
    pub input_format: FileFormat,
    pub output_format: FileFormat,
    pub template_file: Option<String>,
    pub template_key: Option<String>,
    pub init_file_fmt: Option<String>,
}

impl DataModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Read an attribute by name.
    pub fn get(&self, attribute: &str) -> Result<AttributeValue, KeywordError> {
        Ok(AttributeBinding::resolve(attribute)?.get(self))
    }

    /// Write an attribute by name.
    pub fn set(&mut self, attribute: &str, value: AttributeValue) -> Result<(), KeywordError> {
        AttributeBinding::resolve(attribute)?.set(self, value)
    }
}

/// Attributes the form can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataAttribute {
    InputFormat,
    OutputFormat,
    TemplateFile,
    TemplateKey,
    InitFileFmt,
}

impl DataAttribute {
    pub const ALL: [DataAttribute; 5] = [
        DataAttribute::InputFormat,
        DataAttribute::OutputFormat,
        DataAttribute::TemplateFile,
        DataAttribute::TemplateKey,
        DataAttribute::InitFileFmt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataAttribute::InputFormat => "input_format",
            DataAttribute::OutputFormat => "output_format",
            DataAttribute::TemplateFile => "template_file",
            DataAttribute::TemplateKey => "template_key",
            DataAttribute::InitFileFmt => "init_file_fmt",
        }
    }
}

impl FromStr for DataAttribute {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataAttribute::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| KeywordError::config(format!("unknown data attribute {s:?}")))
    }
}

/// Value carried through a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Format(FileFormat),
    Path(Option<String>),
}

/// A resolved getter/setter pair for one [`DataAttribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    attribute: DataAttribute,
}

impl AttributeBinding {
    pub fn new(attribute: DataAttribute) -> Self {
        Self { attribute }
    }

    pub fn resolve(name: &str) -> Result<Self, KeywordError> {
        name.parse().map(Self::new)
    }

    pub fn attribute(&self) -> DataAttribute {
        self.attribute
    }

    /// Formats the form may offer for this attribute; empty for path attributes.
    pub fn choices(&self) -> &'static [FileFormat] {
        match self.attribute {
            DataAttribute::InputFormat => FileFormat::INPUT_TYPES,
            DataAttribute::OutputFormat => FileFormat::OUTPUT_TYPES,
            _ => &[],
        }
    }

    pub fn get(&self, model: &DataModel) -> AttributeValue {
        match self.attribute {
            DataAttribute::InputFormat => AttributeValue::Format(model.input_format),
            DataAttribute::OutputFormat => AttributeValue::Format(model.output_format),
            DataAttribute::TemplateFile => AttributeValue::Path(model.template_file.clone()),
            DataAttribute::TemplateKey => AttributeValue::Path(model.template_key.clone()),
            DataAttribute::InitFileFmt => AttributeValue::Path(model.init_file_fmt.clone()),
        }
    }

    pub fn set(&self, model: &mut DataModel, value: AttributeValue) -> Result<(), KeywordError> {
        let name = self.attribute.as_str();
        match (self.attribute, value) {
            (
                DataAttribute::InputFormat | DataAttribute::OutputFormat,
                AttributeValue::Format(format),
            ) => {
                // Undefined clears the selection.
                if format != FileFormat::Undefined && !self.choices().contains(&format) {
                    return Err(KeywordError::config(format!(
                        "{name}: format {format} is not allowed"
                    )));
                }
                match self.attribute {
                    DataAttribute::InputFormat => model.input_format = format,
                    _ => model.output_format = format,
                }
            }
            (DataAttribute::TemplateFile, AttributeValue::Path(path)) => {
                model.template_file = non_empty(path)
            }
            (DataAttribute::TemplateKey, AttributeValue::Path(path)) => {
                model.template_key = non_empty(path)
            }
            (DataAttribute::InitFileFmt, AttributeValue::Path(path)) => {
                model.init_file_fmt = non_empty(path)
            }
            (_, other) => {
                return Err(KeywordError::config(format!(
                    "{name}: cannot assign {other:?}"
                )));
            }
        }
        tracing::debug!(model = %model.name, attribute = name, "data attribute updated");
        Ok(())
    }

    /// Set from text input: format names for format attributes, paths otherwise.
    pub fn set_str(&self, model: &mut DataModel, text: &str) -> Result<(), KeywordError> {
        let value = match self.attribute {
            DataAttribute::InputFormat | DataAttribute::OutputFormat => {
                AttributeValue::Format(text.parse()?)
            }
            _ => AttributeValue::Path(Some(text.to_string())),
        };
        self.set(model, value)
    }
}

fn non_empty(path: Option<String>) -> Option<String> {
    path.filter(|p| !p.trim().is_empty())
}
