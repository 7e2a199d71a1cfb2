//! Name candidate cleaning and organization derivation

use std::sync::OnceLock;

use regex::Regex;

/// Minimum length (in characters) of a cleaned name
pub const MIN_NAME_LEN: usize = 3;

fn header_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^(From:|To:)\s*").expect("valid header prefix pattern")
    })
}

/// Clean a name candidate taken from the text preceding an email.
///
/// Rules, in order: trim, strip one leading `From:`/`To:` header
/// (case-insensitive) with following whitespace, drop every `<`, trim, then
/// strip trailing `,` and `:`. Whitespace exposed by the last step is kept.
pub fn clean_name(candidate: &str) -> String {
    let name = header_prefix().replace(candidate.trim(), "");
    let name = name.replace('<', "");
    name.trim()
        .trim_end_matches(&[',', ':'][..])
        .to_string()
}

/// Derive the organization from an email: the first dot-separated label of
/// the domain, with its first character upper-cased and the rest unchanged.
///
/// A domain starting with a dot yields an empty organization.
pub fn derive_organization(email: &str) -> String {
    let domain = email.split('@').nth(1).unwrap_or_default();
    let label = domain.split('.').next().unwrap_or_default();

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
