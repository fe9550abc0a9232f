//! Template rendering with mandatory HTML escaping.
//!
//! Two handlebars registries back one renderer: bodies render with the
//! default HTML escape function so every substituted value is escaped,
//! subjects render with `no_escape` because a subject is plain text, never
//! interpreted as markup downstream. Both run in strict mode, so a template
//! referencing a field the context does not supply fails loudly instead of
//! rendering an empty string. Template syntax is validated at construction,
//! before any row is processed.

use handlebars::{Handlebars, no_escape};
use serde::Serialize;

use crate::error::TemplateError;
use crate::templates::Category;

/// Per-row rendering context. Read-only input to rendering.
///
/// `today` is fixed once per batch run, not per row, so every row in one
/// run shares the same date.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub client_name: String,
    pub case_code: String,
    pub case_manager_name: String,
    pub poc_display_name: String,
    pub function_label: String,
    pub today: String,
}

/// Renders a category's template variants against per-row contexts.
///
/// Rendering is pure: the same (variant, context) pair always yields the
/// same output.
pub struct TemplateRenderer {
    bodies: Handlebars<'static>,
    subjects: Handlebars<'static>,
    variant_keys: Vec<String>,
}

impl TemplateRenderer {
    /// Build a renderer for one category, validating every template.
    ///
    /// A malformed template is a configuration bug and fails here, before
    /// any row is touched.
    pub fn for_category(category: &Category) -> Result<Self, TemplateError> {
        let mut bodies = Handlebars::new();
        bodies.set_strict_mode(true);

        let mut subjects = Handlebars::new();
        subjects.set_strict_mode(true);
        subjects.register_escape_fn(no_escape);

        let mut variant_keys = Vec::with_capacity(category.variants.len());
        for variant in &category.variants {
            bodies
                .register_template_string(&variant.key, &variant.body)
                .map_err(|e| TemplateError::Syntax {
                    name: format!("{}.body", variant.key),
                    reason: e.to_string(),
                })?;
            subjects
                .register_template_string(&variant.key, &variant.subject)
                .map_err(|e| TemplateError::Syntax {
                    name: format!("{}.subject", variant.key),
                    reason: e.to_string(),
                })?;
            variant_keys.push(variant.key.clone());
        }

        Ok(Self {
            bodies,
            subjects,
            variant_keys,
        })
    }

    /// Render one variant: `(subject, html_body)`.
    pub fn render(
        &self,
        variant_key: &str,
        context: &RenderContext,
    ) -> Result<(String, String), TemplateError> {
        if !self.variant_keys.iter().any(|k| k == variant_key) {
            return Err(TemplateError::UnknownVariant {
                key: variant_key.to_string(),
            });
        }

        let subject =
            self.subjects
                .render(variant_key, context)
                .map_err(|e| TemplateError::Render {
                    name: format!("{variant_key}.subject"),
                    reason: e.to_string(),
                })?;

        let body = self
            .bodies
            .render(variant_key, context)
            .map_err(|e| TemplateError::Render {
                name: format!("{variant_key}.body"),
                reason: e.to_string(),
            })?;

        Ok((subject, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{CategorySet, TemplateVariant};

    fn context() -> RenderContext {
        RenderContext {
            client_name: "Acme Corp".into(),
            case_code: "A123".into(),
            case_manager_name: "Pat".into(),
            poc_display_name: "Jane Doe".into(),
            function_label: "ER&D".into(),
            today: "07 Aug 2026".into(),
        }
    }

    fn category(subject: &str, body: &str) -> Category {
        Category {
            name: "Test".into(),
            extra_cc: Vec::new(),
            variants: vec![TemplateVariant {
                key: "initial".into(),
                label: "Initial".into(),
                subject: subject.into(),
                body: body.into(),
            }],
        }
    }

    #[test]
    fn renders_subject_and_body() {
        let category = category(
            "{{function_label}} - {{case_code}} ({{client_name}})",
            "<p>Hi {{case_manager_name}}, re {{client_name}} on {{today}}</p>",
        );
        let renderer = TemplateRenderer::for_category(&category).unwrap();
        let (subject, body) = renderer.render("initial", &context()).unwrap();
        assert_eq!(subject, "ER&D - A123 (Acme Corp)");
        assert_eq!(body, "<p>Hi Pat, re Acme Corp on 07 Aug 2026</p>");
    }

    #[test]
    fn rendering_is_idempotent() {
        let set = CategorySet::builtin();
        let category = set.get("ER&D").unwrap();
        let renderer = TemplateRenderer::for_category(category).unwrap();
        let first = renderer.render("followup", &context()).unwrap();
        let second = renderer.render("followup", &context()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn body_substitutions_are_html_escaped() {
        let category = category("{{client_name}}", "<p>{{client_name}}</p>");
        let renderer = TemplateRenderer::for_category(&category).unwrap();

        let mut ctx = context();
        ctx.client_name = r#"<script>alert("x")</script> & Sons"#.into();
        let (_, body) = renderer.render("initial", &ctx).unwrap();

        assert!(!body.contains("<script>"));
        assert!(!body.contains(r#"alert("x")"#));
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("&quot;x&quot;"));
        assert!(body.contains("&amp; Sons"));
        // Trusted template structure survives untouched.
        assert!(body.starts_with("<p>"));
        assert!(body.ends_with("</p>"));
    }

    #[test]
    fn subject_is_not_escaped() {
        let category = category("{{function_label}} update", "<p>{{function_label}}</p>");
        let renderer = TemplateRenderer::for_category(&category).unwrap();
        let (subject, body) = renderer.render("initial", &context()).unwrap();
        assert_eq!(subject, "ER&D update");
        assert_eq!(body, "<p>ER&amp;D</p>");
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let category = category("s", "b");
        let renderer = TemplateRenderer::for_category(&category).unwrap();
        let err = renderer.render("reminder", &context()).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownVariant { .. }));
    }

    #[test]
    fn missing_context_field_fails_in_strict_mode() {
        let category = category("s", "<p>{{not_a_field}}</p>");
        let renderer = TemplateRenderer::for_category(&category).unwrap();
        let err = renderer.render("initial", &context()).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn malformed_template_fails_at_construction() {
        let category = category("s", "<p>{{#if}}</p>");
        assert!(matches!(
            TemplateRenderer::for_category(&category),
            Err(TemplateError::Syntax { .. })
        ));
    }
}
