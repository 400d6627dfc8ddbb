//! Evaluation report assembly and export.
//!
//! A report collects the batch outcomes of an evaluation run, attaches the
//! aggregate statistics, and serializes to pretty JSON plus a flat per-sample
//! CSV.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::batch::BatchOutcome;
use crate::error::Result;
use crate::stats::Summary;

/// Outcome of one metric batch with its aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricReport {
    /// The batch outcome (samples, unmatched, skipped).
    pub outcome: BatchOutcome,
    /// Aggregate statistics; `None` when the batch produced no samples.
    pub summary: Option<Summary>,
}

impl MetricReport {
    /// Wrap a batch outcome, computing its summary.
    #[must_use]
    pub fn from_outcome(outcome: BatchOutcome) -> Self {
        let summary = Summary::compute(&outcome.values());
        Self { outcome, summary }
    }
}

/// A full evaluation run across one or more metric batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Report name, used as the output file stem.
    pub name: String,
    /// One entry per metric batch, in run order.
    pub metrics: Vec<MetricReport>,
    /// When this report was generated.
    pub generated_at: DateTime<Utc>,
}

impl EvalReport {
    /// Create an empty report.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    /// Add a batch outcome to the report.
    pub fn push(&mut self, outcome: BatchOutcome) {
        self.metrics.push(MetricReport::from_outcome(outcome));
    }

    /// Write the report as pretty JSON into `dir`, returning the file path.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", self.name));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Write every sample as a CSV row into `dir`, returning the file path.
    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.csv", self.name));
        let mut wtr = csv::Writer::from_path(&path)?;

        wtr.write_record(["metric", "file", "score"])?;
        for metric in &self.metrics {
            for sample in &metric.outcome.samples {
                let score = format!("{:.6}", sample.value);
                wtr.write_record([sample.kind.code(), sample.file.as_str(), score.as_str()])?;
            }
        }

        wtr.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricKind, ScoreSample};

    fn outcome_with(kind: MetricKind, values: &[f64]) -> BatchOutcome {
        BatchOutcome {
            kind,
            samples: values
                .iter()
                .enumerate()
                .map(|(i, &value)| ScoreSample {
                    kind,
                    file: format!("img{i}.png"),
                    value,
                })
                .collect(),
            unmatched: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_report_summarizes_outcomes() {
        let mut report = EvalReport::new("run");
        report.push(outcome_with(MetricKind::Ssim, &[1.0, 2.0, 3.0]));

        let summary = report.metrics[0].summary.as_ref().unwrap();
        assert_eq!(summary.count, 3);
        assert!((summary.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_outcome_has_no_summary() {
        let mut report = EvalReport::new("run");
        report.push(outcome_with(MetricKind::Uiqm, &[]));
        assert!(report.metrics[0].summary.is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut report = EvalReport::new("run");
        report.push(outcome_with(MetricKind::Psnr, &[28.5, 31.0]));

        let json = serde_json::to_string(&report).unwrap();
        let back: EvalReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics.len(), 1);
        assert_eq!(back.metrics[0].outcome.samples.len(), 2);
        assert_eq!(back.metrics[0].summary.as_ref().unwrap().count, 2);
    }

    #[test]
    fn test_write_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = EvalReport::new("eval");
        report.push(outcome_with(MetricKind::Ssim, &[0.9, 0.8]));
        report.push(outcome_with(MetricKind::Uiqm, &[2.5]));

        let json_path = report.write_json(dir.path()).unwrap();
        let csv_path = report.write_csv(dir.path()).unwrap();
        assert!(json_path.exists());
        assert!(csv_path.exists());

        let csv_text = fs::read_to_string(csv_path).unwrap();
        // Header plus three sample rows
        assert_eq!(csv_text.lines().count(), 4);
        assert!(csv_text.lines().nth(1).unwrap().starts_with("SSIM,img0.png"));
    }
}
