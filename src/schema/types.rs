//! Schema type definitions
//!
//! Supported primitive types:
//! - int: 64-bit signed integer
//! - string: UTF-8 string
//!
//! A field may also carry a format pattern that string values must match
//! in full.

use regex::Regex;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use crate::record::fields;

/// Format patterns of the stop record fields
pub mod patterns {
    /// Capitalized words followed by a street-kind suffix
    pub const STOP_NAME: &str = r"^[A-Z][a-z]+(?: [A-Z][a-z]+)* (?:Road|Avenue|Boulevard|Street)$";
    /// One of S, O, F or empty
    pub const STOP_TYPE: &str = r"^[SOF]?$";
    /// 24-hour HH:MM
    pub const ARRIVAL_TIME: &str = r"^(?:[01]\d|2[0-3]):[0-5]\d$";
}

/// Primitive field types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit signed integer
    Int,
    /// UTF-8 string
    String,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::String => "string",
        }
    }

    /// Whether a JSON value has this type. No coercion.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::Int => value.as_i64().is_some(),
            FieldType::String => value.is_string(),
        }
    }
}

/// Field definition
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field data type
    pub field_type: FieldType,
    /// Whether field must be present and non-empty
    pub required: bool,
    /// Full-match pattern for string values
    pub format: Option<Regex>,
}

impl FieldDef {
    /// Create a required int field
    pub fn required_int() -> Self {
        Self {
            field_type: FieldType::Int,
            required: true,
            format: None,
        }
    }

    /// Create a required string field
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            format: None,
        }
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            format: None,
        }
    }

    /// Attach a format pattern. `field` is only used for the error message.
    pub fn with_format(mut self, field: &str, pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| SchemaError::invalid_pattern(field, e))?;
        self.format = Some(regex);
        Ok(self)
    }
}

/// Ordered field definitions
///
/// Declaration order is also the report order.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<(&'static str, FieldDef)>,
}

impl Schema {
    pub fn new(fields: Vec<(&'static str, FieldDef)>) -> Self {
        Self { fields }
    }

    /// The stop record schema
    pub fn stop_records() -> SchemaResult<Self> {
        Ok(Self::new(vec![
            (fields::BUS_ID, FieldDef::required_int()),
            (fields::STOP_ID, FieldDef::required_int()),
            (
                fields::STOP_NAME,
                FieldDef::required_string().with_format(fields::STOP_NAME, patterns::STOP_NAME)?,
            ),
            (fields::NEXT_STOP, FieldDef::required_int()),
            (
                fields::STOP_TYPE,
                FieldDef::optional_string().with_format(fields::STOP_TYPE, patterns::STOP_TYPE)?,
            ),
            (
                fields::ARRIVAL_TIME,
                FieldDef::required_string()
                    .with_format(fields::ARRIVAL_TIME, patterns::ARRIVAL_TIME)?,
            ),
        ]))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldDef)> {
        self.fields.iter().map(|(name, def)| (*name, def))
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, def)| def)
    }
}
