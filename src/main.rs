use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use outreach_gen::config::GeneratorConfig;
use outreach_gen::error::ConfigError;
use outreach_gen::pipeline::runner::BatchRunner;
use outreach_gen::pipeline::types::RowOutcome;
use outreach_gen::session::EmlBackend;
use outreach_gen::templates::CategorySet;
use outreach_gen::{input, report};

/// Batch-generate outreach message templates from tabular case data.
#[derive(Debug, Parser)]
#[command(name = "outreach-gen", version)]
struct Cli {
    /// Outreach function, e.g. "ER&D" or "Supply Chain"
    category: String,

    /// Input CSV file (header row required)
    input: PathBuf,

    /// Output directory root (default: OUTREACH_OUTPUT_DIR or ./out)
    #[arg(long)]
    output: Option<PathBuf>,

    /// From address stamped on generated templates
    #[arg(long)]
    from: Option<String>,

    /// Custom category set (JSON) instead of the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = GeneratorConfig::from_env();
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(from) = cli.from {
        config.from_address = from;
    }

    let categories = match &cli.templates {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading template pack {}", path.display()))?;
            CategorySet::from_json(&raw)?
        }
        None => CategorySet::builtin(),
    };

    let category = categories
        .get(&cli.category)
        .ok_or_else(|| ConfigError::UnknownCategory {
            name: cli.category.clone(),
            available: categories.names().join(", "),
        })?;

    let rows = input::read_rows_from_path(&cli.input)
        .with_context(|| format!("reading input {}", cli.input.display()))?;

    eprintln!("outreach-gen v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Category: {}", category.name);
    eprintln!("   Rows: {}", rows.len());
    eprintln!("   Output: {}\n", config.output_dir.display());

    let backend = EmlBackend::new(config.output_dir.clone(), config.from_address.clone());
    let runner = BatchRunner::new(&backend, category, config)?;
    let result = runner.run(&rows)?;

    println!("{}", report::render_report(&result));

    let ok = result
        .outcomes
        .iter()
        .filter(|o| matches!(o, RowOutcome::Ok { .. }))
        .count();
    eprintln!(
        "\n{} of {} rows generated, {} artifacts written",
        ok,
        result.outcomes.len(),
        result.artifacts.len()
    );

    Ok(())
}
