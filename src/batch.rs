//! Batch measurement across image directories.
//!
//! One measurer drives every metric kind in two modes: paired (SSIM, PSNR),
//! which resolves ground-truth/generated correspondence first, and
//! single-directory (UIQM), which scans one directory of generated images.
//! Per-image scoring fans out over rayon; results are collected back in input
//! order, so a batch over an unchanged filesystem reproduces the identical
//! sample sequence.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::{self, MetricKind, ScoreSample};
use crate::normalize::{self, EvalDims};
use crate::pairing::{self, CorrespondencePair};

/// Configuration for a batch run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Evaluation dimensions every image is resampled to.
    pub dims: EvalDims,
}

/// An image excluded from the sample set, with the reason it was skipped.
///
/// One undecodable file must not invalidate an entire evaluation run, but it
/// must be surfaced rather than silently shrinking the sample set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedImage {
    /// File name that was skipped.
    pub file: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Ordered result of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Metric this batch computed.
    pub kind: MetricKind,
    /// Per-image scores, in sorted input-file-name order.
    pub samples: Vec<ScoreSample>,
    /// Ground-truth files with no generated counterpart (paired mode only).
    pub unmatched: Vec<String>,
    /// Files skipped because they could not be scored.
    pub skipped: Vec<SkippedImage>,
}

impl BatchOutcome {
    /// The raw score values, in sample order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }
}

/// Measure a paired metric over every resolved ground-truth/generated pair.
///
/// Unmatched ground-truth files are reported in the outcome, never an error.
/// A pair whose images cannot be loaded is skipped and reported.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if either directory cannot be listed (fatal
/// before the measurement loop) and [`Error::MetricCalculation`] if `kind`
/// is not a paired metric.
pub fn measure_paired(
    gtr_dir: &Path,
    gen_dir: &Path,
    suffix: &str,
    kind: MetricKind,
    config: &BatchConfig,
) -> Result<BatchOutcome> {
    if !kind.is_paired() {
        return Err(Error::MetricCalculation {
            metric: kind.to_string(),
            reason: "no-reference metric cannot run in paired mode".to_string(),
        });
    }

    let pairing = pairing::resolve_pairs(gtr_dir, gen_dir, suffix)?;

    let scored: Vec<_> = pairing
        .pairs
        .par_iter()
        .map(|pair| score_pair(pair, kind, config.dims))
        .collect();

    let mut outcome = BatchOutcome {
        kind,
        samples: Vec::new(),
        unmatched: pairing.unmatched,
        skipped: Vec::new(),
    };
    for result in scored {
        match result {
            Ok(sample) => outcome.samples.push(sample),
            Err(skip) => outcome.skipped.push(skip),
        }
    }
    Ok(outcome)
}

/// Measure a no-reference metric over every file in a directory.
///
/// With `filter` set, only file names ending in the filter token are scored.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if the directory cannot be listed and
/// [`Error::MetricCalculation`] if `kind` requires a ground-truth pair.
pub fn measure_no_reference(
    dir: &Path,
    filter: Option<&str>,
    kind: MetricKind,
    config: &BatchConfig,
) -> Result<BatchOutcome> {
    if kind.is_paired() {
        return Err(Error::MetricCalculation {
            metric: kind.to_string(),
            reason: "paired metric cannot run in single-directory mode".to_string(),
        });
    }

    let mut files = pairing::list_images(dir)?;
    if let Some(token) = filter {
        files.retain(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(token))
        });
    }

    let scored: Vec<_> = files
        .par_iter()
        .map(|path| {
            let file = display_name(path);
            let score = normalize::load_normalized(path, kind.channel_mode(), config.dims)
                .and_then(|img| metrics::compute_no_reference(kind, &img));
            match score {
                Ok(value) => Ok(ScoreSample { kind, file, value }),
                Err(e) => Err(SkippedImage {
                    file,
                    reason: e.to_string(),
                }),
            }
        })
        .collect();

    let mut outcome = BatchOutcome {
        kind,
        samples: Vec::new(),
        unmatched: Vec::new(),
        skipped: Vec::new(),
    };
    for result in scored {
        match result {
            Ok(sample) => outcome.samples.push(sample),
            Err(skip) => outcome.skipped.push(skip),
        }
    }
    Ok(outcome)
}

fn score_pair(
    pair: &CorrespondencePair,
    kind: MetricKind,
    dims: EvalDims,
) -> std::result::Result<ScoreSample, SkippedImage> {
    let file = display_name(&pair.ground_truth);
    let mode = kind.channel_mode();

    let score = normalize::load_normalized(&pair.ground_truth, mode, dims).and_then(|gtr| {
        let generated = normalize::load_normalized(&pair.generated, mode, dims)?;
        metrics::compute_paired(kind, &gtr, &generated)
    });

    match score {
        Ok(value) => Ok(ScoreSample { kind, file, value }),
        Err(e) => Err(SkippedImage {
            file,
            reason: e.to_string(),
        }),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
