//! Recipient normalization — splitting, parsing, validation, dedup.
//!
//! Raw recipient text from tabular sources is messy: mixed comma/semicolon
//! delimiters, `Display Name <email>` and bare-email tokens side by side,
//! duplicate addresses differing only in case. Normalization turns any
//! number of such chunks into one ordered, deduplicated set of validated
//! entries. Malformed tokens are collected, never raised.

use regex::Regex;
use tracing::warn;

/// One validated recipient.
///
/// The email keeps its original casing for display; comparison and dedup
/// are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressEntry {
    /// Optional display name, e.g. `Jane Doe` from `Jane Doe <jane@acme.com>`.
    pub display: Option<String>,
    /// The address itself, original casing preserved.
    pub email: String,
}

impl AddressEntry {
    /// Case-insensitive dedup/comparison key.
    pub fn dedup_key(&self) -> String {
        self.email.to_lowercase()
    }

    /// Header-style rendering: `Jane Doe <jane@acme.com>` or bare email.
    pub fn to_header(&self) -> String {
        match &self.display {
            Some(name) => format!("{name} <{}>", self.email),
            None => self.email.clone(),
        }
    }
}

/// Result of normalizing one or more raw recipient chunks.
///
/// Entries are unique by case-insensitive email, in order of first
/// appearance. `rejected` holds the raw tokens that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSet {
    pub entries: Vec<AddressEntry>,
    pub rejected: Vec<String>,
}

impl RecipientSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A copy of this set without the entries already present in `other`
    /// (case-insensitive on email). Used to keep CC free of To duplicates.
    pub fn excluding(&self, other: &RecipientSet) -> RecipientSet {
        let taken: Vec<String> = other.entries.iter().map(AddressEntry::dedup_key).collect();
        RecipientSet {
            entries: self
                .entries
                .iter()
                .filter(|e| !taken.contains(&e.dedup_key()))
                .cloned()
                .collect(),
            rejected: self.rejected.clone(),
        }
    }
}

/// Splits, parses, validates and deduplicates raw recipient text.
pub struct AddressNormalizer {
    email_re: Regex,
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressNormalizer {
    pub fn new() -> Self {
        // Conservative shape: local@domain, domain contains a dot, final
        // label is letters, no whitespace and no second '@' anywhere.
        Self {
            email_re: Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]+$").unwrap(),
        }
    }

    /// Normalize any number of raw chunks into one RecipientSet.
    ///
    /// Chunks are concatenated in order before deduplication, so a later
    /// chunk's duplicate of an earlier address is dropped, not re-added.
    /// Never fails: malformed tokens land in `rejected`.
    pub fn normalize<I, S>(&self, chunks: I) -> RecipientSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = RecipientSet::default();
        let mut seen: Vec<String> = Vec::new();

        for chunk in chunks {
            for token in split_tokens(chunk.as_ref()) {
                match self.parse_token(token) {
                    Some(entry) => {
                        let key = entry.dedup_key();
                        if seen.contains(&key) {
                            continue;
                        }
                        seen.push(key);
                        set.entries.push(entry);
                    }
                    None => {
                        warn!(token, "Rejected malformed recipient token");
                        set.rejected.push(token.to_string());
                    }
                }
            }
        }

        set
    }

    /// Parse one trimmed token as `Display Name <email>` or a bare email.
    fn parse_token(&self, token: &str) -> Option<AddressEntry> {
        let (display, email) = match (token.find('<'), token.rfind('>')) {
            (Some(open), Some(close)) if open < close => {
                let name = token[..open].trim().trim_matches('"').trim();
                let email = token[open + 1..close].trim();
                let display = (!name.is_empty()).then(|| name.to_string());
                (display, email)
            }
            _ => (None, token),
        };

        if !self.email_re.is_match(email) {
            return None;
        }

        Some(AddressEntry {
            display,
            email: email.to_string(),
        })
    }
}

/// Split raw text on commas or semicolons (mixed usage allowed), trimming
/// whitespace and dropping empty tokens.
fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Derive a display name from an email's local part.
///
/// `jane.doe@acme.com` → `Jane Doe`. Falls back to `POC` when nothing
/// usable remains.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    let pretty = local.replace(['.', '_', '-'], " ");
    let name = pretty
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() { "POC".to_string() } else { name }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(chunks: &[&str]) -> RecipientSet {
        AddressNormalizer::new().normalize(chunks.iter().copied())
    }

    // ── Splitting ───────────────────────────────────────────────────

    #[test]
    fn splits_on_either_delimiter() {
        let commas = normalize(&["a@x.com, b@y.com, c@z.com"]);
        let semis = normalize(&["a@x.com; b@y.com; c@z.com"]);
        let mixed = normalize(&["a@x.com, b@y.com; c@z.com"]);
        assert_eq!(commas, semis);
        assert_eq!(commas, mixed);
        assert_eq!(commas.len(), 3);
    }

    #[test]
    fn drops_empty_tokens_and_whitespace() {
        let set = normalize(&["  a@x.com ;; , b@y.com  ,"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries[0].email, "a@x.com");
        assert!(set.rejected.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let set = normalize(&[""]);
        assert!(set.is_empty());
        assert!(set.rejected.is_empty());

        let none: Vec<&str> = vec![];
        assert!(AddressNormalizer::new().normalize(none).is_empty());
    }

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn parses_display_name_form() {
        let set = normalize(&["Jane Doe <jane@acme.com>"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries[0].display.as_deref(), Some("Jane Doe"));
        assert_eq!(set.entries[0].email, "jane@acme.com");
    }

    #[test]
    fn parses_quoted_display_name() {
        let set = normalize(&["\"Doe, Jane\" <jane@acme.com>"]);
        // The comma inside quotes splits the token; the email half survives.
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries[0].email, "jane@acme.com");
    }

    #[test]
    fn parses_bare_email() {
        let set = normalize(&["jane@acme.com"]);
        assert_eq!(set.entries[0].display, None);
        assert_eq!(set.entries[0].email, "jane@acme.com");
    }

    // ── Validation ──────────────────────────────────────────────────

    #[test]
    fn rejects_malformed_tokens_without_error() {
        let set = normalize(&["not-an-email; missing@domain; @nodomain.com; ok@x.com"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries[0].email, "ok@x.com");
        assert_eq!(
            set.rejected,
            vec!["not-an-email", "missing@domain", "@nodomain.com"]
        );
    }

    #[test]
    fn rejects_double_at_and_numeric_tld() {
        let set = normalize(&["a@@x.com; a@x.123"]);
        assert!(set.is_empty());
        assert_eq!(set.rejected.len(), 2);
    }

    #[test]
    fn rejects_bad_email_inside_angle_brackets() {
        let set = normalize(&["Jane <not-an-email>"]);
        assert!(set.is_empty());
        assert_eq!(set.rejected, vec!["Jane <not-an-email>"]);
    }

    // ── Dedup ───────────────────────────────────────────────────────

    #[test]
    fn dedup_is_case_insensitive_first_seen_wins() {
        let set = normalize(&["Jane Doe <jane@acme.com>; jane@ACME.com"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries[0].display.as_deref(), Some("Jane Doe"));
        assert_eq!(set.entries[0].email, "jane@acme.com");
    }

    #[test]
    fn dedup_preserves_first_appearance_order() {
        let set = normalize(&["b@y.com; a@x.com; B@Y.com; c@z.com; a@X.com"]);
        let emails: Vec<&str> = set.entries.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["b@y.com", "a@x.com", "c@z.com"]);
    }

    #[test]
    fn later_chunks_merge_after_earlier_ones() {
        let set = normalize(&["a@x.com", "b@y.com; A@X.com", "c@z.com"]);
        let emails: Vec<&str> = set.entries.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@y.com", "c@z.com"]);
    }

    // ── Exclusion ───────────────────────────────────────────────────

    #[test]
    fn excluding_drops_overlap_case_insensitively() {
        let to = normalize(&["jane@acme.com"]);
        let cc = normalize(&["lead@acme.com; JANE@acme.com; team@acme.com"]);
        let cc = cc.excluding(&to);
        let emails: Vec<&str> = cc.entries.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["lead@acme.com", "team@acme.com"]);
    }

    // ── Display name derivation ─────────────────────────────────────

    #[test]
    fn derives_display_name_from_local_part() {
        assert_eq!(display_name_from_email("jane.doe@acme.com"), "Jane Doe");
        assert_eq!(display_name_from_email("jane_doe@acme.com"), "Jane Doe");
        assert_eq!(display_name_from_email("jane-van-dam@acme.com"), "Jane Van Dam");
    }

    #[test]
    fn display_name_falls_back_to_poc() {
        assert_eq!(display_name_from_email(""), "POC");
        assert_eq!(display_name_from_email("@acme.com"), "POC");
    }

    #[test]
    fn header_rendering() {
        let entry = AddressEntry {
            display: Some("Jane Doe".into()),
            email: "jane@acme.com".into(),
        };
        assert_eq!(entry.to_header(), "Jane Doe <jane@acme.com>");

        let bare = AddressEntry {
            display: None,
            email: "jane@acme.com".into(),
        };
        assert_eq!(bare.to_header(), "jane@acme.com");
    }
}
