//! Shared types for the batch generation pipeline.

use std::collections::BTreeMap;

use crate::recipients::AddressEntry;
use crate::session::ArtifactRef;

// ── Input row ───────────────────────────────────────────────────────

/// One record of input tabular case data.
///
/// Every field is raw text exactly as loaded; the pipeline never mutates a
/// row and never coerces values to numbers or dates. Unknown columns are
/// carried along untouched.
#[derive(Debug, Clone)]
pub struct Row {
    fields: BTreeMap<String, String>,
}

impl Row {
    /// Columns that must exist in the input (values may still be blank;
    /// blank values are per-row data handled by the pipeline).
    pub const REQUIRED_COLUMNS: [&'static str; 5] = [
        "client_name",
        "case_code",
        "case_manager_name",
        "poc_display_name",
        "to",
    ];

    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Field value, trimmed; empty string when the column is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(|v| v.trim()).unwrap_or("")
    }

    pub fn client_name(&self) -> &str {
        self.get("client_name")
    }

    pub fn case_code(&self) -> &str {
        self.get("case_code")
    }

    pub fn case_manager_name(&self) -> &str {
        self.get("case_manager_name")
    }

    pub fn poc_display_name(&self) -> &str {
        self.get("poc_display_name")
    }

    pub fn to(&self) -> &str {
        self.get("to")
    }

    pub fn cc(&self) -> &str {
        self.get("cc")
    }

    pub fn bcc(&self) -> &str {
        self.get("bcc")
    }

    pub fn poc_email(&self) -> &str {
        self.get("poc_email")
    }
}

// ── Rendered message ────────────────────────────────────────────────

/// One fully rendered message: subject, escaped HTML body, resolved
/// recipients. Consumed by the artifact session and the preview surface.
#[derive(Debug, Clone)]
pub struct RenderedMessage {
    pub variant_key: String,
    /// Plain text; never contains untrusted markup, never escaped.
    pub subject: String,
    /// HTML with every substituted value escaped.
    pub html_body: String,
    pub to: Vec<AddressEntry>,
    pub cc: Vec<AddressEntry>,
    pub bcc: Vec<AddressEntry>,
}

// ── Row outcome ─────────────────────────────────────────────────────

/// Outcome of processing one row. Produced exactly once per row, never
/// retried, immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// All variants rendered and materialized.
    Ok { client: String, code: String },
    /// Nothing attempted; the reason is display-ready.
    Skipped { reason: String },
    /// Rendering started but an artifact could not be created; earlier
    /// artifacts from the same row stay on disk.
    Failed { error: String },
}

impl RowOutcome {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok { .. } => "ok",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

// ── Per-row report ──────────────────────────────────────────────────

/// What one row's processing produced: the outcome, the rendered messages
/// (successful rows only), and refs to every artifact that materialized.
#[derive(Debug)]
pub struct RowReport {
    pub outcome: RowOutcome,
    pub rendered: Option<Vec<RenderedMessage>>,
    pub artifacts: Vec<ArtifactRef>,
}

impl RowReport {
    pub fn skipped(reason: &str) -> Self {
        Self {
            outcome: RowOutcome::Skipped {
                reason: reason.to_string(),
            },
            rendered: None,
            artifacts: Vec::new(),
        }
    }
}

// ── Batch result ────────────────────────────────────────────────────

/// Aggregate result of one batch run.
#[derive(Debug)]
pub struct BatchResult {
    /// One outcome per input row, index-aligned.
    pub outcomes: Vec<RowOutcome>,
    /// Rendered messages of the first row that reached `Ok`, for preview.
    pub preview: Option<Vec<RenderedMessage>>,
    /// Every artifact created this run, in creation order (includes
    /// artifacts from rows that later failed on a subsequent variant).
    pub artifacts: Vec<ArtifactRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_get_trims_and_defaults_to_empty() {
        let row = Row::from_fields(BTreeMap::from([
            ("client_name".to_string(), "  Acme  ".to_string()),
            ("case_code".to_string(), "A123".to_string()),
        ]));
        assert_eq!(row.client_name(), "Acme");
        assert_eq!(row.case_code(), "A123");
        assert_eq!(row.cc(), "");
        assert_eq!(row.get("nonexistent"), "");
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(
            RowOutcome::Ok {
                client: "Acme".into(),
                code: "A1".into()
            }
            .label(),
            "ok"
        );
        assert_eq!(
            RowOutcome::Skipped {
                reason: "x".into()
            }
            .label(),
            "skipped"
        );
        assert_eq!(
            RowOutcome::Failed {
                error: "y".into()
            }
            .label(),
            "failed"
        );
    }
}
