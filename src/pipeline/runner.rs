//! Batch runner — drives the whole run over one shared session.

use chrono::Local;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{Error, TemplateError};
use crate::pipeline::row::RowProcessor;
use crate::pipeline::types::{BatchResult, RenderedMessage, Row, RowOutcome};
use crate::render::TemplateRenderer;
use crate::session::{ArtifactBackend, ArtifactRef, ArtifactSession};
use crate::templates::Category;

/// Runs one batch: acquires a single artifact session, processes rows
/// strictly in input order, and guarantees the session is released exactly
/// once — including when a fatal template error surfaces mid-run.
pub struct BatchRunner<'a> {
    backend: &'a dyn ArtifactBackend,
    category: &'a Category,
    renderer: TemplateRenderer,
    processor: RowProcessor,
    config: GeneratorConfig,
}

impl<'a> BatchRunner<'a> {
    /// Build a runner, validating the category's templates up front so a
    /// malformed template aborts before any session or row is touched.
    pub fn new(
        backend: &'a dyn ArtifactBackend,
        category: &'a Category,
        config: GeneratorConfig,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            backend,
            category,
            renderer: TemplateRenderer::for_category(category)?,
            processor: RowProcessor::new(),
            config,
        })
    }

    /// Process every row, in order. The batch always completes over all
    /// rows; per-row failures become outcomes, never early exits.
    pub fn run(&self, rows: &[Row]) -> Result<BatchResult, Error> {
        // Fixed once here so every row in the run shares one date.
        let today = Local::now().format(&self.config.date_format).to_string();

        info!(
            rows = rows.len(),
            category = %self.category.name,
            "Starting batch run"
        );

        let mut session = self.backend.acquire()?;
        let outcome = self.process_rows(session.as_mut(), rows, &today);
        if let Err(e) = session.release() {
            warn!(error = %e, "Session release failed");
        }
        let (outcomes, preview, artifacts) = outcome?;

        let ok = outcomes
            .iter()
            .filter(|o| matches!(o, RowOutcome::Ok { .. }))
            .count();
        info!(
            rows = outcomes.len(),
            ok,
            artifacts = artifacts.len(),
            "Batch run complete"
        );

        Ok(BatchResult {
            outcomes,
            preview,
            artifacts,
        })
    }

    #[allow(clippy::type_complexity)]
    fn process_rows(
        &self,
        session: &mut dyn ArtifactSession,
        rows: &[Row],
        today: &str,
    ) -> Result<(Vec<RowOutcome>, Option<Vec<RenderedMessage>>, Vec<ArtifactRef>), TemplateError>
    {
        let mut outcomes = Vec::with_capacity(rows.len());
        let mut preview: Option<Vec<RenderedMessage>> = None;
        let mut artifacts = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            let report = self.processor.process(
                row,
                self.category,
                &self.renderer,
                today,
                &self.config.output_dir,
                session,
            )?;

            debug!(row = index + 1, outcome = report.outcome.label(), "Row done");

            // First successful row wins the preview slot.
            if preview.is_none() {
                preview = report.rendered;
            }
            artifacts.extend(report.artifacts);
            outcomes.push(report.outcome);
        }

        Ok((outcomes, preview, artifacts))
    }
}
