//! Extraction statistics
//!
//! Counts what happened to every line and candidate during one extraction
//! pass. None of the discarded cases is an error.

use serde::{Deserialize, Serialize};

/// Per-pass extraction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Lines inspected
    pub lines_scanned: usize,
    /// Lines without any email match
    pub lines_without_match: usize,
    /// Email matches found across all lines
    pub emails_matched: usize,
    /// Candidates whose cleaned name was too short
    pub candidates_rejected: usize,
    /// Records dropped because their email was already seen
    pub duplicates_dropped: usize,
    /// Unique records emitted
    pub records_emitted: usize,
}

impl ExtractionStats {
    /// Fraction of matched emails that became records (0.0 when none matched)
    pub fn yield_rate(&self) -> f32 {
        if self.emails_matched == 0 {
            0.0
        } else {
            self.records_emitted as f32 / self.emails_matched as f32
        }
    }

    /// Every matched email is accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.emails_matched
            == self.candidates_rejected + self.duplicates_dropped + self.records_emitted
    }
}
