//! Generator configuration.

use std::path::PathBuf;

/// Batch generator configuration.
///
/// Defaults are overridable from `OUTREACH_*` environment variables and,
/// above that, from CLI flags (see the binary).
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root directory artifacts are written under.
    pub output_dir: PathBuf,
    /// From address stamped on every generated template.
    pub from_address: String,
    /// strftime format for the batch-wide `today` context value.
    pub date_format: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./out"),
            from_address: "outreach@localhost".to_string(),
            date_format: "%d %b %Y".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let output_dir = std::env::var("OUTREACH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let from_address =
            std::env::var("OUTREACH_FROM_ADDRESS").unwrap_or(defaults.from_address);

        let date_format =
            std::env::var("OUTREACH_DATE_FORMAT").unwrap_or(defaults.date_format);

        Self {
            output_dir,
            from_address,
            date_format,
        }
    }
}
