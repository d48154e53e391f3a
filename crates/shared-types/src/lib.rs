//! Shared data model for the FormDoc workspace
//!
//! This crate holds the types every other crate speaks in: field schemas,
//! template descriptions, normalized value sets, and the derived totals
//! produced by the computation engine. It deliberately contains no behavior
//! beyond construction helpers and typed accessors.

pub mod field;
pub mod template;
pub mod totals;
pub mod value;

pub use field::{FieldSchema, FieldType, SelectOption};
pub use template::{RowFormula, SectionSchema, Template, TemplateInfo};
pub use totals::{ComputedTotals, SectionTotals};
pub use value::{parse_number, FieldErrors, FieldValue, RowValues, ValueSet};
