//! Row processor — one row in, one outcome out.

use std::path::Path;

use tracing::{debug, error, warn};

use crate::error::TemplateError;
use crate::pipeline::types::{RenderedMessage, Row, RowOutcome, RowReport};
use crate::recipients::{AddressNormalizer, display_name_from_email};
use crate::render::{RenderContext, TemplateRenderer};
use crate::session::ArtifactSession;
use crate::templates::Category;

/// Processes a single row: normalize recipients, render every variant,
/// create one artifact per variant through the shared session.
///
/// All row-level problems become a [`RowOutcome`]; the only error that
/// escapes is [`TemplateError`], which is a configuration bug and fatal
/// for the whole run.
pub struct RowProcessor {
    normalizer: AddressNormalizer,
}

impl Default for RowProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RowProcessor {
    pub fn new() -> Self {
        Self {
            normalizer: AddressNormalizer::new(),
        }
    }

    pub fn process(
        &self,
        row: &Row,
        category: &Category,
        renderer: &TemplateRenderer,
        today: &str,
        dest_root: &Path,
        session: &mut dyn ArtifactSession,
    ) -> Result<RowReport, TemplateError> {
        let client = row.client_name();
        let code = row.case_code();
        if client.is_empty() || code.is_empty() {
            return Ok(RowReport::skipped("missing client name or case code"));
        }

        let to = self.normalizer.normalize([row.to()]);
        if !to.rejected.is_empty() {
            warn!(client, code, rejected = ?to.rejected, "Dropped invalid To tokens");
        }
        if to.is_empty() {
            return Ok(RowReport::skipped("no valid recipient"));
        }

        // Row CC, the POC's own address, and the category's extra CCs merge
        // into one set; anything already in To is dropped, not re-added.
        let mut cc_chunks: Vec<&str> = vec![row.cc(), row.poc_email()];
        cc_chunks.extend(category.extra_cc.iter().map(String::as_str));
        let cc = self.normalizer.normalize(cc_chunks).excluding(&to);
        let bcc = self.normalizer.normalize([row.bcc()]);

        let context = RenderContext {
            client_name: client.to_string(),
            case_code: code.to_string(),
            case_manager_name: row.case_manager_name().to_string(),
            poc_display_name: self.poc_display_name(row),
            function_label: category.name.clone(),
            today: today.to_string(),
        };

        let stem = sanitize_file_stem(&format!("{client} - {code}"));
        let category_dir = dest_root.join(category.slug());

        let mut rendered = Vec::with_capacity(category.variants.len());
        let mut artifacts = Vec::with_capacity(category.variants.len());

        for (position, variant) in category.variants.iter().enumerate() {
            let (subject, html_body) = renderer.render(&variant.key, &context)?;
            let message = RenderedMessage {
                variant_key: variant.key.clone(),
                subject,
                html_body,
                to: to.entries.clone(),
                cc: cc.entries.clone(),
                bcc: bcc.entries.clone(),
            };

            let dest = category_dir
                .join(format!("{}_{}", position + 1, variant.key))
                .join(format!("{stem}.{}", session.file_extension()));

            match session.create_artifact(&message, &dest) {
                Ok(artifact) => {
                    debug!(client, code, variant = %variant.key, "Artifact created");
                    artifacts.push(artifact);
                    rendered.push(message);
                }
                Err(e) => {
                    // Earlier artifacts from this row stay on disk; the row
                    // is reported failed so a re-run can target it.
                    error!(client, code, variant = %variant.key, error = %e, "Row failed");
                    return Ok(RowReport {
                        outcome: RowOutcome::Failed {
                            error: e.to_string(),
                        },
                        rendered: None,
                        artifacts,
                    });
                }
            }
        }

        Ok(RowReport {
            outcome: RowOutcome::Ok {
                client: client.to_string(),
                code: code.to_string(),
            },
            rendered: Some(rendered),
            artifacts,
        })
    }

    /// The row's POC display name, falling back to a name derived from the
    /// POC's email when the column is blank.
    fn poc_display_name(&self, row: &Row) -> String {
        let given = row.poc_display_name();
        if !given.is_empty() {
            return given.to_string();
        }
        let poc = self.normalizer.normalize([row.poc_email()]);
        poc.entries
            .first()
            .map(|e| {
                e.display
                    .clone()
                    .unwrap_or_else(|| display_name_from_email(&e.email))
            })
            .unwrap_or_else(|| "POC".to_string())
    }
}

/// Replace filesystem-hostile characters with dashes and collapse runs of
/// whitespace, so `client - code` always yields a usable file stem.
pub fn sanitize_file_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
