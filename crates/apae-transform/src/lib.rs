//! Field normalization and row transformation for assistido records.
//!
//! - **normalization**: one rule per semantic field type (text, date,
//!   document number, categorical codes, yes/no, medication usage, disability
//!   category, observations, city)
//! - **fields**: accepted header spellings per field
//! - **row**: turns one [`RawRecord`](apae_model::RawRecord) into an
//!   [`OutputRow`](apae_model::OutputRow) aligned to the target table
//! - **pipeline**: batch conversion with a [`ConversionReport`](apae_model::ConversionReport)
//! - **audit**: city coverage check against the lookup table

pub mod audit;
pub mod error;
pub mod fields;
pub mod normalization;
pub mod pipeline;
pub mod row;

pub use audit::{CityAudit, audit_cities};
pub use error::{FieldError, RowError, TransformError};
pub use normalization::{CityState, Conversion, MedicationUsage};
pub use pipeline::{ConversionOutput, ConversionPipeline};
pub use row::{RowTransformer, TransformedRow};
