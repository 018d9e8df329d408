mod cli;
mod prompts;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use reqtrace_core::{
    export_csv, export_json, ExtractorConfig, FirstTextResolver, RequirementExtractor, Resolver,
    Workbook,
};

use crate::cli::{Cli, ExportFormat};
use crate::prompts::ConsoleResolver;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the level picked here
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = ExtractorConfig::resolve(cli.config.as_deref())
        .context("Failed to load column configuration")?;

    let workbook = Workbook::open(&cli.workbook)
        .with_context(|| format!("Failed to read workbook {:?}", cli.workbook))?;

    let mut extractor = RequirementExtractor::new(config);
    extractor.ingest_workbook(&workbook);

    let mut resolver: Box<dyn Resolver> = if cli.first {
        Box::new(FirstTextResolver)
    } else {
        Box::new(ConsoleResolver::default())
    };
    let report = extractor.finalize(&mut *resolver)?;
    if cli.first && !report.multiple_parents.is_empty() {
        println!(
            "{} {}",
            "Requirements with multiple parents:".yellow(),
            report.multiple_parents.join(", ")
        );
    }

    let output = match &cli.output {
        Some(path) => path.clone(),
        None => prompts::prompt_export_path()?,
    };

    let registry = extractor.registry();
    let count = match cli.format {
        ExportFormat::Csv => export_csv(registry, &output, cli.quoting()),
        ExportFormat::Json => export_json(registry, &output),
    }
    .with_context(|| format!("Failed to export to {:?}", output))?;

    let stats = extractor.stats();
    println!("{}", "Export complete!".green());
    println!("  File: {}", output.display());
    println!("  Requirements: {}", count);
    println!("  Rows read: {} ({} without ID)", stats.rows, stats.skipped_rows);
    println!("  Texts resolved: {}", report.resolved.len());

    Ok(())
}
