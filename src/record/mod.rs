//! Stop records and the dataset they form
//!
//! Input is schemaless JSON. A [`StopRecord`] keeps the raw object and only
//! offers typed views over it; nothing here rejects a record because of its
//! content. The [`Dataset`] is loaded once and never mutated.
//!
//! A JSON `null` is treated exactly like an absent key.

mod errors;

pub use errors::{LoadError, LoadResult};

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Line identifier
pub type BusId = i64;

/// Field names as they appear in the input objects
pub mod fields {
    pub const BUS_ID: &str = "bus_id";
    pub const STOP_ID: &str = "stop_id";
    pub const STOP_NAME: &str = "stop_name";
    pub const NEXT_STOP: &str = "next_stop";
    pub const STOP_TYPE: &str = "stop_type";
    pub const ARRIVAL_TIME: &str = "arrival_time";
}

/// Returns the value as an integer if it is a JSON number that fits in i64.
///
/// Booleans, floats (even `1.0`) and numeric strings are not integers.
pub fn as_int(value: &Value) -> Option<i64> {
    value.as_i64()
}

/// Returns the JSON type name for log and error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() {
                "int"
            } else if n.is_u64() {
                "uint"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Role of a stop within its line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopType {
    /// "S"
    Start,
    /// "O"
    OnDemand,
    /// "F"
    Finish,
    /// "" or absent
    Regular,
}

impl StopType {
    /// Interprets a raw `stop_type` value.
    ///
    /// Returns `None` for values that name no known role.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        match value {
            None => Some(StopType::Regular),
            Some(Value::String(s)) => Self::from_code(s),
            Some(_) => None,
        }
    }

    /// Parses the one-letter code used in the input.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(StopType::Start),
            "O" => Some(StopType::OnDemand),
            "F" => Some(StopType::Finish),
            "" => Some(StopType::Regular),
            _ => None,
        }
    }
}

/// One stop-on-line entry of the input batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StopRecord {
    fields: Map<String, Value>,
}

impl StopRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the raw value of a field, treating `null` as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// The line this stop belongs to, if `bus_id` is an integer.
    pub fn bus_id(&self) -> Option<BusId> {
        self.get(fields::BUS_ID).and_then(as_int)
    }

    pub fn stop_id(&self) -> Option<i64> {
        self.get(fields::STOP_ID).and_then(as_int)
    }

    /// The stop name, if it is a string.
    pub fn stop_name(&self) -> Option<&str> {
        self.get(fields::STOP_NAME).and_then(Value::as_str)
    }

    pub fn stop_type(&self) -> Option<StopType> {
        StopType::from_value(self.get(fields::STOP_TYPE))
    }

    pub fn is_type(&self, stop_type: StopType) -> bool {
        self.stop_type() == Some(stop_type)
    }

    pub fn arrival_time(&self) -> Option<&Value> {
        self.get(fields::ARRIVAL_TIME)
    }
}

impl From<Map<String, Value>> for StopRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// A line: the records sharing one integer `bus_id`, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    pub bus_id: BusId,
    pub stops: Vec<&'a StopRecord>,
}

impl Line<'_> {
    /// Stop names of the given type, in stop order. Non-string names are skipped.
    pub fn names_of_type(&self, stop_type: StopType) -> Vec<&str> {
        self.stops
            .iter()
            .filter(|record| record.is_type(stop_type))
            .filter_map(|record| record.stop_name())
            .collect()
    }
}

/// The immutable input batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<StopRecord>,
}

impl Dataset {
    pub fn new(records: Vec<StopRecord>) -> Self {
        Self { records }
    }

    /// Parses a complete JSON document into a dataset.
    pub fn from_json_str(input: &str) -> LoadResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Builds a dataset from an already parsed document.
    ///
    /// The document must be an array of objects.
    pub fn from_value(value: Value) -> LoadResult<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(LoadError::NotAnArray(json_type_name(&other))),
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(StopRecord::new(fields)),
                _ => Err(LoadError::RecordNotObject(index)),
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Self { records })
    }

    pub fn records(&self) -> &[StopRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Groups records by integer `bus_id`.
    ///
    /// Lines come out in first-seen order and keep the input order of their
    /// stops. Records without an integer `bus_id` belong to no line.
    pub fn lines(&self) -> Vec<Line<'_>> {
        let mut index: HashMap<BusId, usize> = HashMap::new();
        let mut lines: Vec<Line<'_>> = Vec::new();

        for record in &self.records {
            let Some(bus_id) = record.bus_id() else {
                continue;
            };
            let slot = *index.entry(bus_id).or_insert_with(|| {
                lines.push(Line {
                    bus_id,
                    stops: Vec::new(),
                });
                lines.len() - 1
            });
            lines[slot].stops.push(record);
        }

        lines
    }
}
