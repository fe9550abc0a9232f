//! Human-readable batch status reporting.

use crate::pipeline::types::{BatchResult, RowOutcome};

/// One display line for a row outcome. `index` is zero-based; display is
/// one-based to match the input spreadsheet.
pub fn status_line(index: usize, outcome: &RowOutcome) -> String {
    let row = index + 1;
    match outcome {
        RowOutcome::Ok { client, code } => format!("Row {row}: OK – {client} - {code}"),
        RowOutcome::Skipped { reason } => format!("Row {row}: SKIPPED – {reason}"),
        RowOutcome::Failed { error } => format!("Row {row}: FAILED – {error}"),
    }
}

/// The full report: one line per input row, index-aligned.
pub fn render_report(result: &BatchResult) -> String {
    result
        .outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| status_line(index, outcome))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_outcome_kind() {
        assert_eq!(
            status_line(
                0,
                &RowOutcome::Ok {
                    client: "Acme Corp".into(),
                    code: "A123".into()
                }
            ),
            "Row 1: OK – Acme Corp - A123"
        );
        assert_eq!(
            status_line(
                1,
                &RowOutcome::Skipped {
                    reason: "no valid recipient".into()
                }
            ),
            "Row 2: SKIPPED – no valid recipient"
        );
        assert_eq!(
            status_line(
                2,
                &RowOutcome::Failed {
                    error: "disk full".into()
                }
            ),
            "Row 3: FAILED – disk full"
        );
    }

    #[test]
    fn report_is_index_aligned() {
        let result = BatchResult {
            outcomes: vec![
                RowOutcome::Skipped {
                    reason: "no valid recipient".into(),
                },
                RowOutcome::Ok {
                    client: "Acme".into(),
                    code: "A1".into(),
                },
            ],
            preview: None,
            artifacts: Vec::new(),
        };
        let report = render_report(&result);
        assert_eq!(
            report,
            "Row 1: SKIPPED – no valid recipient\nRow 2: OK – Acme - A1"
        );
    }
}
