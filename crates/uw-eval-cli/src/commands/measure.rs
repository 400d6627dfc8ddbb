//! Single-metric measurement commands.

use std::path::Path;

use anyhow::{Context, Result};
use uw_eval::{measure_no_reference, measure_paired, BatchConfig, BatchOutcome, MetricKind, Summary};

pub fn run_paired(
    gtr_dir: &Path,
    gen_dir: &Path,
    suffix: &str,
    kind: MetricKind,
    config: &BatchConfig,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!(
            "Comparing {} against {} (suffix {suffix})",
            gen_dir.display(),
            gtr_dir.display()
        );
    }

    let outcome = measure_paired(gtr_dir, gen_dir, suffix, kind, config)
        .with_context(|| format!("{kind} batch failed"))?;
    print_outcome(&outcome, verbose);
    Ok(())
}

pub fn run_uiqm(
    dir: &Path,
    filter: Option<&str>,
    config: &BatchConfig,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("Scoring {}", dir.display());
    }

    let outcome = measure_no_reference(dir, filter, MetricKind::Uiqm, config)
        .context("UIQM batch failed")?;
    print_outcome(&outcome, verbose);
    Ok(())
}

/// Print unmatched/skipped files, then the aggregate line or an explicit
/// empty-data message.
pub fn print_outcome(outcome: &BatchOutcome, verbose: bool) {
    for name in &outcome.unmatched {
        println!("Generated image not found for {name}");
    }
    for skip in &outcome.skipped {
        println!("Skipped {}: {}", skip.file, skip.reason);
    }

    if verbose {
        for sample in &outcome.samples {
            println!("{} {} {:.6}", sample.kind, sample.file, sample.value);
        }
    }

    match Summary::compute(&outcome.values()) {
        Some(summary) => println!(
            "{} >> Mean: {:.6} Std: {:.6} ({} samples)",
            outcome.kind, summary.mean, summary.std_dev, summary.count
        ),
        None => println!(
            "{} measures are empty. Cannot compute mean and std.",
            outcome.kind
        ),
    }
}
