//! Run a step sequence over a bookmarks file
//!
//! The input is only touched after the whole sequence succeeded. Before it is
//! replaced, a timestamped copy is written next to it.

use anyhow::{Context, Result};
use cli_lib::diff_utils::{diff_stats, generate_unified_diff};
use cli_lib::{util, PbmConfig};
use owo_colors::OwoColorize;
use pbm_pipeline::{transform, StepRegistry};
use std::path::PathBuf;
use tracing::info;

pub struct OrganizeArgs {
    pub path: PathBuf,
    pub steps: Option<Vec<String>>,
    pub config: Option<PathBuf>,
    pub options: Vec<String>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub yes: bool,
    pub context: usize,
}

pub fn run(args: OrganizeArgs) -> Result<()> {
    let mut config = PbmConfig::load_or_default(args.config.as_deref())?;
    config.apply_overrides(args.steps, &args.options)?;

    let registry = StepRegistry::with_builtin_steps();
    let document = util::read_document(&args.path)?;
    let before = pretty(&document)?;

    let (output, report) = transform(
        document,
        &registry,
        &config.pipeline.steps,
        &config.options,
        config.filter.clone(),
    )
    .with_context(|| format!("Pipeline failed; {} left untouched", args.path.display()))?;
    let after = pretty(&output)?;

    info!(
        steps = report.steps,
        cleared = report.cleared,
        repaired = report.repaired,
        "sequence finished"
    );

    let stats = diff_stats(&before, &after);
    let label = args.path.display().to_string();

    if args.dry_run {
        print!("{}", generate_unified_diff(&before, &after, &label, args.context));
        println!(
            "\n{} {} {}, {} {} {}",
            "Dry run:".bold(),
            stats.inserted.to_string().green(),
            "insertions".dimmed(),
            stats.deleted.to_string().red(),
            "deletions".dimmed(),
            "(nothing written)".dimmed()
        );
        return Ok(());
    }

    let destination = args.output.unwrap_or_else(|| args.path.clone());

    if stats.is_empty() && destination == args.path {
        println!("{} {} is already organized", "✓".green(), label);
        return Ok(());
    }

    if destination.exists() && !args.yes {
        let prompt = format!(
            "Write {} insertions and {} deletions to {}?",
            stats.inserted,
            stats.deleted,
            destination.display()
        );
        if !util::confirm(&prompt)? {
            println!("{}", "Aborted; nothing written".yellow());
            return Ok(());
        }
    }

    if destination.exists() {
        let backup = util::backup_file(&destination)?;
        println!("{} {}", "Backup:".dimmed(), backup.display());
    }

    util::write_atomic(&destination, &after)?;

    println!(
        "{} Wrote {} ({} steps, {} ids repaired)",
        "✓".green(),
        destination.display().to_string().cyan(),
        report.steps,
        report.repaired
    );

    Ok(())
}

fn pretty(document: &serde_json::Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(document).context("Failed to serialize bookmarks")?;
    text.push('\n');
    Ok(text)
}
