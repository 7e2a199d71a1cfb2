//! TKG Extractor - Person record extraction
//!
//! Turns cleaned text lines into deduplicated `(name, email, organization)`
//! records using an email pattern and a fixed set of name-cleaning rules.

use tkg_core::{PersonRecord, Result};

/// Trait for record extractors
pub trait EntityExtractor: Send + Sync {
    /// Extract unique records from lines, in first-seen order
    fn extract(&self, lines: &[String]) -> Result<Vec<PersonRecord>>;
}

pub mod clean;
pub mod email;
pub mod stats;

pub use clean::{clean_name, derive_organization, MIN_NAME_LEN};
pub use email::EmailExtractor;
pub use stats::ExtractionStats;
