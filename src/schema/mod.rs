//! Schema Validator
//!
//! JSON-Schema documents for known entity kinds, loaded once at startup
//! into a [`SchemaRegistry`] and passed explicitly to whoever validates.
//!
//! # Rules
//!
//! - A kind without a schema file validates successfully, with a note
//! - A broken schema file disables validation for its kind; startup continues
//! - Only the first validation error is reported

mod errors;
mod registry;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use registry::{schema_path, RegisteredSchema, SchemaRegistry, SCHEMA_SUFFIX};
pub use validator::{SchemaValidator, ValidationOutcome};
