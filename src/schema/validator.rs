//! Field validator
//!
//! Each field of a record goes through three checks in a fixed order:
//! required, type, format. Evaluation stops at the first failing check, so a
//! field contributes at most one violation per record.
//!
//! The validator never mutates records and never fails; it reports.

use std::fmt;

use serde_json::Value;

use super::errors::FieldViolation;
use super::types::{FieldDef, Schema};
use crate::record::{json_type_name, StopRecord};

/// One stage of field validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCheck {
    /// Present and not an empty string, when required
    Required,
    /// Runtime type matches the declared primitive type
    Type,
    /// String value matches the declared pattern in full
    Format,
}

impl FieldCheck {
    /// Evaluation order
    pub const ORDER: [FieldCheck; 3] = [FieldCheck::Required, FieldCheck::Type, FieldCheck::Format];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCheck::Required => "required",
            FieldCheck::Type => "type",
            FieldCheck::Format => "format",
        }
    }

    /// Whether `value` passes this check. Absent values pass type and format.
    pub fn passes(&self, def: &FieldDef, value: Option<&Value>) -> bool {
        match (self, value) {
            (FieldCheck::Required, None) => !def.required,
            (FieldCheck::Required, Some(Value::String(s))) => !(def.required && s.is_empty()),
            (FieldCheck::Required, Some(_)) => true,
            (FieldCheck::Type, None) => true,
            (FieldCheck::Type, Some(v)) => def.field_type.matches(v),
            (FieldCheck::Format, None) => true,
            (FieldCheck::Format, Some(v)) => match &def.format {
                None => true,
                Some(pattern) => v.as_str().is_some_and(|s| full_match(pattern, s)),
            },
        }
    }

    fn violation(&self, field: &str, def: &FieldDef, value: Option<&Value>) -> FieldViolation {
        let actual = value.map_or("missing", json_type_name);
        match self {
            FieldCheck::Required => match value {
                Some(_) => FieldViolation::new(field, *self, "non-empty value", "empty string"),
                None => FieldViolation::missing_field(field),
            },
            FieldCheck::Type => {
                FieldViolation::type_mismatch(field, def.field_type.type_name(), actual)
            }
            FieldCheck::Format => FieldViolation::bad_format(
                field,
                def.format.as_ref().map_or("", |p| p.as_str()),
                value.map_or_else(|| actual.to_string(), |v| v.to_string()),
            ),
        }
    }
}

impl fmt::Display for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the pattern matches the whole of `s`, not just a substring.
fn full_match(pattern: &regex::Regex, s: &str) -> bool {
    pattern
        .find(s)
        .is_some_and(|m| m.start() == 0 && m.end() == s.len())
}

/// Validates a single field value against its definition.
///
/// Returns the first failing check, or `Ok(())` when all pass.
pub fn check_field(field: &str, def: &FieldDef, value: Option<&Value>) -> Result<(), FieldViolation> {
    match FieldCheck::ORDER
        .iter()
        .find(|check| !check.passes(def, value))
    {
        Some(check) => Err(check.violation(field, def, value)),
        None => Ok(()),
    }
}

/// Schema validator that checks records field by field.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Validates one named field of a record.
    ///
    /// Fields the schema does not declare are always valid.
    pub fn validate_field(&self, field: &str, record: &StopRecord) -> Result<(), FieldViolation> {
        match self.schema.get(field) {
            Some(def) => check_field(field, def, record.get(field)),
            None => Ok(()),
        }
    }

    /// Validates every declared field of a record, in schema order.
    ///
    /// Returns one violation per failing field.
    pub fn validate_record(&self, record: &StopRecord) -> Vec<FieldViolation> {
        self.schema
            .field_names()
            .into_iter()
            .filter_map(|field| self.validate_field(field, record).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn record(value: Value) -> StopRecord {
        match value {
            Value::Object(fields) => StopRecord::new(fields),
            _ => StopRecord::new(Map::new()),
        }
    }

    fn valid_record() -> StopRecord {
        record(json!({
            "bus_id": 128,
            "stop_id": 1,
            "stop_name": "Prospekt Avenue",
            "next_stop": 3,
            "stop_type": "S",
            "arrival_time": "08:12"
        }))
    }

    #[test]
    fn test_valid_record_passes() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        assert!(validator.validate_record(&valid_record()).is_empty());
    }

    #[test]
    fn test_integer_beyond_i64_is_type_error() {
        let def = FieldDef::required_int();
        let value = json!(u64::MAX);

        let violation = check_field("bus_id", &def, Some(&value)).unwrap_err();
        assert_eq!(violation.check, FieldCheck::Type);
        assert_eq!(violation.expected, "int");
        assert_eq!(violation.actual, "uint");
    }

    #[test]
    fn test_missing_required_field() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"stop_id": 1}));

        let violation = validator.validate_field("bus_id", &rec).unwrap_err();
        assert_eq!(violation.check, FieldCheck::Required);
        assert_eq!(violation.field, "bus_id");
    }

    #[test]
    fn test_empty_string_fails_required() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"stop_name": "", "arrival_time": ""}));

        assert_eq!(
            validator.validate_field("stop_name", &rec).unwrap_err().check,
            FieldCheck::Required
        );
        assert_eq!(
            validator.validate_field("arrival_time", &rec).unwrap_err().check,
            FieldCheck::Required
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"next_stop": null}));

        assert_eq!(
            validator.validate_field("next_stop", &rec).unwrap_err().check,
            FieldCheck::Required
        );
    }

    #[test]
    fn test_type_mismatch() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"bus_id": "128", "stop_name": 5}));

        let violation = validator.validate_field("bus_id", &rec).unwrap_err();
        assert_eq!(violation.check, FieldCheck::Type);
        assert_eq!(violation.expected, "int");
        assert_eq!(violation.actual, "string");

        let violation = validator.validate_field("stop_name", &rec).unwrap_err();
        assert_eq!(violation.check, FieldCheck::Type);
    }

    #[test]
    fn test_format_mismatch() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({
            "stop_name": "main street",
            "stop_type": "X",
            "arrival_time": "8:12"
        }));

        for field in ["stop_name", "stop_type", "arrival_time"] {
            let violation = validator.validate_field(field, &rec).unwrap_err();
            assert_eq!(violation.check, FieldCheck::Format, "field {}", field);
        }
    }

    #[test]
    fn test_optional_field_absent_or_empty_passes() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);

        let absent = record(json!({}));
        assert!(validator.validate_field("stop_type", &absent).is_ok());

        let empty = record(json!({"stop_type": ""}));
        assert!(validator.validate_field("stop_type", &empty).is_ok());

        let null = record(json!({"stop_type": null}));
        assert!(validator.validate_field("stop_type", &null).is_ok());
    }

    #[test]
    fn test_one_violation_per_field() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        // wrong type would also fail format; only the type check is reported
        let rec = record(json!({
            "bus_id": 1,
            "stop_id": 1,
            "stop_name": 42,
            "next_stop": 2,
            "arrival_time": "08:00"
        }));

        let violations = validator.validate_record(&rec);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "stop_name");
        assert_eq!(violations[0].check, FieldCheck::Type);
    }

    #[test]
    fn test_several_fields_fail_independently() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"stop_name": "lowercase road", "stop_type": "S"}));

        let fields: Vec<_> = validator
            .validate_record(&rec)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(
            fields,
            vec!["bus_id", "stop_id", "stop_name", "next_stop", "arrival_time"]
        );
    }

    #[test]
    fn test_undeclared_field_is_ignored() {
        let schema = Schema::stop_records().unwrap();
        let validator = SchemaValidator::new(&schema);
        let rec = record(json!({"color": 7}));
        assert!(validator.validate_field("color", &rec).is_ok());
    }

    #[test]
    fn test_full_match_only() {
        let pattern = regex::Regex::new("[SOF]").unwrap();
        assert!(full_match(&pattern, "S"));
        assert!(!full_match(&pattern, "SS"));
        assert!(!full_match(&pattern, "xS"));
    }

    #[test]
    fn test_check_order() {
        assert_eq!(
            FieldCheck::ORDER,
            [FieldCheck::Required, FieldCheck::Type, FieldCheck::Format]
        );
    }
}
