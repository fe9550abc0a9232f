//! Category and template registry.
//!
//! A category (outreach function) owns an ordered set of template variants
//! and optional extra CC addresses. Categories are data, not code: the
//! built-in set ships as defaults and a custom set can be loaded from JSON,
//! so categories differ only by registered templates, never by branching
//! logic in the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

mod builtin;

/// One message template: stable key, subject pattern, HTML body template.
///
/// Subject and body use handlebars placeholders (`{{client_name}}`,
/// `{{case_code}}`, `{{case_manager_name}}`, `{{poc_display_name}}`,
/// `{{function_label}}`, `{{today}}`). Body substitutions are HTML-escaped
/// at render time; the template structure itself is trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariant {
    /// Stable key, e.g. `initial`, `followup`, `escalation`.
    pub key: String,
    /// Human-readable label for reports and previews.
    pub label: String,
    /// Subject pattern (plain text, never escaped).
    pub subject: String,
    /// HTML body template.
    pub body: String,
}

/// One outreach function: its templates plus function-specific CC rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Display name, e.g. `ER&D` or `Supply Chain`.
    pub name: String,
    /// Addresses merged into every row's CC for this category.
    #[serde(default)]
    pub extra_cc: Vec<String>,
    /// Ordered template variants, one artifact per variant per row.
    pub variants: Vec<TemplateVariant>,
}

impl Category {
    /// Filesystem-safe identifier derived from the display name.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// The set of categories available for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// The built-in category set.
    pub fn builtin() -> Self {
        builtin::category_set()
    }

    /// Load a custom category set from JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let set: CategorySet =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        set.validate()?;
        Ok(set)
    }

    /// Look up a category by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Category names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::ParseError("no categories defined".into()));
        }
        for category in &self.categories {
            if category.variants.is_empty() {
                return Err(ConfigError::ParseError(format!(
                    "category {} has no variants",
                    category.name
                )));
            }
            let mut keys: Vec<&str> = category.variants.iter().map(|v| v.key.as_str()).collect();
            keys.sort_unstable();
            keys.dedup();
            if keys.len() != category.variants.len() {
                return Err(ConfigError::ParseError(format!(
                    "category {} has duplicate variant keys",
                    category.name
                )));
            }
        }
        Ok(())
    }
}

/// Lowercase, alphanumerics kept, everything else collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
