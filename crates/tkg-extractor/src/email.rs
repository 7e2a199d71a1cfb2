//! Email-anchored person extraction
//!
//! Every email found on a line anchors one candidate record: the text in
//! front of the email is cleaned into a name, and the email domain gives the
//! organization. Records are deduplicated by email, first occurrence wins.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, trace};

use crate::clean::{clean_name, derive_organization, MIN_NAME_LEN};
use crate::stats::ExtractionStats;
use crate::EntityExtractor;
use tkg_core::{PersonRecord, Result};

/// Local part, `@`, domain labels, then a dot and a word suffix
pub const EMAIL_PATTERN: &str = r"[\w\.-]+@[\w\.-]+\.\w+";

/// Outcome of resolving one email match on a line
enum Candidate {
    Accepted(PersonRecord),
    Rejected,
}

/// Rule-based extractor anchored on email addresses
pub struct EmailExtractor {
    pattern: Regex,
    min_name_len: usize,
}

impl EmailExtractor {
    /// Create an extractor with the default email pattern
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).expect("valid email pattern"),
            min_name_len: MIN_NAME_LEN,
        }
    }

    /// Resolve each email on a line into a candidate, in match order
    fn candidates(&self, line: &str) -> Vec<Candidate> {
        self.pattern
            .find_iter(line)
            .map(|mat| {
                let name = clean_name(&line[..mat.start()]);
                let email = mat.as_str();

                if name.chars().count() < self.min_name_len {
                    trace!(email, name = %name, "Rejected short name candidate");
                    return Candidate::Rejected;
                }

                Candidate::Accepted(PersonRecord::new(name, email, derive_organization(email)))
            })
            .collect()
    }

    /// Extract the records of a single line, without deduplication
    pub fn extract_line(&self, line: &str) -> Vec<PersonRecord> {
        self.candidates(line)
            .into_iter()
            .filter_map(|candidate| match candidate {
                Candidate::Accepted(record) => Some(record),
                Candidate::Rejected => None,
            })
            .collect()
    }

    /// Extract unique records and report what was discarded along the way
    pub fn extract_with_stats<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> (Vec<PersonRecord>, ExtractionStats) {
        let mut stats = ExtractionStats::default();
        let mut seen_emails: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for line in lines {
            let line = line.as_ref();
            stats.lines_scanned += 1;

            let candidates = self.candidates(line);
            if candidates.is_empty() {
                stats.lines_without_match += 1;
                continue;
            }
            stats.emails_matched += candidates.len();

            for candidate in candidates {
                match candidate {
                    Candidate::Rejected => stats.candidates_rejected += 1,
                    Candidate::Accepted(record) => {
                        if seen_emails.insert(record.email.clone()) {
                            records.push(record);
                        } else {
                            trace!(email = %record.email, "Dropped duplicate email");
                            stats.duplicates_dropped += 1;
                        }
                    }
                }
            }
        }

        stats.records_emitted = records.len();
        debug!(
            lines = stats.lines_scanned,
            without_match = stats.lines_without_match,
            matched = stats.emails_matched,
            rejected = stats.candidates_rejected,
            duplicates = stats.duplicates_dropped,
            records = stats.records_emitted,
            "Extraction pass complete"
        );

        (records, stats)
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor for EmailExtractor {
    fn extract(&self, lines: &[String]) -> Result<Vec<PersonRecord>> {
        let (records, _) = self.extract_with_stats(lines);
        Ok(records)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    fn triple(record: &PersonRecord) -> (&str, &str, &str) {
        (&record.name, &record.email, &record.organization)
    }

    #[test]
    fn test_example_scenario() {
        let extractor = EmailExtractor::new();
        let records = extractor
            .extract(&lines(&[
                "From: Alice Smith <alice@acme.com>",
                "Bob Lee bob@beta.io, regards",
            ]))
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(triple(&records[0]), ("Alice Smith", "alice@acme.com", "Acme"));
        assert_eq!(triple(&records[1]), ("Bob Lee", "bob@beta.io", "Beta"));
    }

    #[test]
    fn test_duplicate_email_first_wins() {
        let extractor = EmailExtractor::new();
        let (records, stats) = extractor.extract_with_stats(&[
            "From: Ann a@x.com",
            "From: Ann Two a@x.com",
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(triple(&records[0]), ("Ann", "a@x.com", "X"));
        assert_eq!(stats.duplicates_dropped, 1);
    }

    #[test]
    fn test_single_letter_name_rejected() {
        let extractor = EmailExtractor::new();
        let (records, stats) = extractor.extract_with_stats(&["From: A a@x.com"]);

        assert!(records.is_empty());
        assert_eq!(stats.candidates_rejected, 1);
    }

    #[test]
    fn test_short_candidate_rejected() {
        let extractor = EmailExtractor::new();
        assert!(extractor.extract(&lines(&["zz a@x.com"])).unwrap().is_empty());
    }

    #[test]
    fn test_punctuation_only_candidate_rejected() {
        let extractor = EmailExtractor::new();
        assert!(extractor.extract_line("<, carol@acme.com").is_empty());
        assert!(extractor.extract_line("carol@acme.com").is_empty());
    }

    #[test]
    fn test_lines_without_email_skipped() {
        let extractor = EmailExtractor::new();
        let (records, stats) = extractor.extract_with_stats(&[
            "Quarterly report",
            "No contact details here",
            "To: Dana Scully dana@fbi.gov",
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(stats.lines_scanned, 3);
        assert_eq!(stats.lines_without_match, 2);
        assert!(stats.is_balanced());
    }

    #[test]
    fn test_multiple_emails_use_preceding_text() {
        let extractor = EmailExtractor::new();
        let records = extractor.extract_line("Alice alice@acme.com, Bob bob@beta.io");

        assert_eq!(records.len(), 2);
        assert_eq!(triple(&records[0]), ("Alice", "alice@acme.com", "Acme"));
        // The second candidate spans everything before its own email
        assert_eq!(
            triple(&records[1]),
            ("Alice alice@acme.com, Bob", "bob@beta.io", "Beta")
        );
    }

    #[test]
    fn test_email_pattern_boundaries() {
        let extractor = EmailExtractor::new();
        let records = extractor.extract_line("Frank Castle <frank.castle@mail.punisher.org>.");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "frank.castle@mail.punisher.org");
        assert_eq!(records[0].organization, "Mail");
    }

    #[test]
    fn test_empty_first_domain_label() {
        let extractor = EmailExtractor::new();
        let records = extractor.extract_line("Grace Hopper grace@.navy.mil");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "grace@.navy.mil");
        assert_eq!(records[0].organization, "");
    }

    #[test]
    fn test_trailing_space_before_comma_kept() {
        let extractor = EmailExtractor::new();
        let records = extractor.extract_line("Bob Lee , bob@beta.io");
        assert_eq!(records[0].name, "Bob Lee ");
    }

    proptest! {
        #[test]
        fn prop_dedup_keeps_first_per_email(
            entries in prop::collection::vec(("[A-Z][a-z]{2,6}", 0usize..5), 0..20),
        ) {
            let input: Vec<String> = entries
                .iter()
                .map(|(name, idx)| format!("From: {name} user{idx}@corp.com"))
                .collect();

            let (records, stats) = EmailExtractor::new().extract_with_stats(&input);

            let mut seen = HashSet::new();
            for record in &records {
                prop_assert!(seen.insert(record.email.clone()));
                prop_assert!(record.name.chars().count() >= MIN_NAME_LEN);
            }

            for record in &records {
                let (first_name, _) = entries
                    .iter()
                    .find(|(_, idx)| format!("user{idx}@corp.com") == record.email)
                    .unwrap();
                prop_assert_eq!(&record.name, first_name);
            }
            prop_assert!(stats.is_balanced());
        }

        #[test]
        fn prop_records_respect_length_filter(line in "[ -~]{0,60}") {
            for record in EmailExtractor::new().extract_line(&line) {
                prop_assert!(record.name.chars().count() >= MIN_NAME_LEN);
                prop_assert!(record.email.contains('@'));
            }
        }
    }
}
