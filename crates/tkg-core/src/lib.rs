//! TKG Core - Domain models, errors, and shared types
//!
//! This crate defines the core abstractions used throughout the TKG pipeline:
//! - Person records produced by entity extraction
//! - Node kinds and positions used by the graph and layout stages
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, InputConfig, LayoutConfig, LoggingConfig, OutputConfig, OutputFormat,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for TKG operations
#[derive(Error, Debug)]
pub enum TkgError {
    /// The input document cannot be opened, parsed, or yields no text
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for TkgError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TkgError>;

// ============================================================================
// Extraction Records
// ============================================================================

/// A resolved (name, email, organization) triple extracted from one line.
///
/// Records are created once by the extractor and never mutated. The email is
/// the identity of a record: two records with the same email are duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Cleaned person name (at least 3 characters)
    pub name: String,

    /// Email address as matched in the source text
    pub email: String,

    /// Organization derived from the first label of the email domain
    pub organization: String,
}

impl PersonRecord {
    /// Create a new record
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            organization: organization.into(),
        }
    }
}

/// Renders the record as a quoted tuple, e.g. `('Bob Lee', 'bob@beta.io', 'Beta')`
impl std::fmt::Display for PersonRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        write_quoted(f, &self.name)?;
        f.write_str(", ")?;
        write_quoted(f, &self.email)?;
        f.write_str(", ")?;
        write_quoted(f, &self.organization)?;
        f.write_str(")")
    }
}

/// Quote a field with single quotes, or double quotes when the text contains
/// a single quote and no double quote.
fn write_quoted(f: &mut std::fmt::Formatter<'_>, text: &str) -> std::fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    write!(f, "{quote}")?;
    for c in text.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

// ============================================================================
// Graph Models
// ============================================================================

/// The three entity kinds a graph node can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Person,
    Email,
    Organization,
}

impl NodeKind {
    /// All kinds, in legend order
    pub const ALL: [NodeKind; 3] = [Self::Organization, Self::Person, Self::Email];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Email => "Email",
            Self::Organization => "Organization",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A 2-D position in layout units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Tests
// ============================================================================
