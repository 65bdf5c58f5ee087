//! Catalog data model.

pub mod types;

pub use types::{Category, FieldValue, Record, RecordId, Tab};
