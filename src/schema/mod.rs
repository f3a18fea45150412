//! Stop record schema
//!
//! The schema is built once at startup and consulted read-only.
//!
//! # Rules
//!
//! - Checks run in order: required, type, format
//! - A field fails at most one check per record
//! - `null` is the same as absent
//! - Empty strings fail the required check
//! - No implicit type coercion

mod errors;
mod types;
mod validator;

pub use errors::{FieldViolation, SchemaError, SchemaResult};
pub use types::{patterns, FieldDef, FieldType, Schema};
pub use validator::{check_field, FieldCheck, SchemaValidator};
