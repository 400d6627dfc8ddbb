//! # uw-eval
//!
//! Quantitative evaluation of underwater image enhancement output.
//!
//! Generated images are compared against ground truth with SSIM and PSNR, and
//! scored standalone with UIQM, over batches of images discovered in
//! directories. Ground-truth and generated directories are populated
//! independently; correspondence is established by derived filename
//! (`<base name><suffix>`, e.g. `img1.png` -> `img1_En.png`), never by
//! directory position.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uw_eval::{measure_paired, BatchConfig, MetricKind, Summary};
//!
//! let config = BatchConfig::default(); // 320x240 evaluation dimensions
//! let outcome = measure_paired(
//!     "data/test/hr".as_ref(),
//!     "data/output".as_ref(),
//!     "_En.png",
//!     MetricKind::Ssim,
//!     &config,
//! )?;
//!
//! match Summary::compute(&outcome.values()) {
//!     Some(s) => println!("SSIM >> Mean: {} Std: {}", s.mean, s.std_dev),
//!     None => println!("SSIM measures are empty."),
//! }
//! for name in &outcome.unmatched {
//!     println!("no generated image for {name}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`normalize`]: Image loading and normalization to the evaluation size
//! - [`pairing`]: Ground-truth to generated-image correspondence
//! - [`metrics`]: Quality metrics (SSIM, PSNR, UIQM)
//! - [`batch`]: Batch measurement across directories
//! - [`stats`]: Aggregate statistics
//! - [`report`]: Report assembly and JSON/CSV export

pub mod batch;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod pairing;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub use batch::{measure_no_reference, measure_paired, BatchConfig, BatchOutcome, SkippedImage};
pub use error::{Error, Result};
pub use metrics::{MetricKind, ScoreSample};
pub use normalize::{load_normalized, ChannelMode, EvalDims, NormalizedImage};
pub use pairing::{resolve_pairs, CorrespondencePair, Pairing};
pub use report::{EvalReport, MetricReport};
pub use stats::Summary;
