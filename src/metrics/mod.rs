//! Quality metrics for enhancement evaluation.
//!
//! Three metric kinds with fixed numeric contracts:
//!
//! - **SSIM**: structural similarity over RGB, in [-1, 1], 1.0 = identical
//! - **PSNR**: peak signal-to-noise ratio over the lightness channel, in dB,
//!   `f64::INFINITY` for identical inputs
//! - **UIQM**: no-reference underwater image quality measure over RGB
//!
//! Each scoring function is pure, with no shared state between calls. The
//! [`compute_paired`] / [`compute_no_reference`] entry points are the single
//! dispatch seam the batch measurer drives, so adding a metric kind never
//! grows another hand-written directory loop.

pub mod psnr;
pub mod ssim;
pub mod uiqm;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::{ChannelMode, NormalizedImage};

/// The metric a batch run computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// Structural similarity (paired, RGB).
    Ssim,
    /// Peak signal-to-noise ratio (paired, lightness).
    Psnr,
    /// Underwater image quality measure (no-reference, RGB).
    Uiqm,
}

impl MetricKind {
    /// The channel mode this metric's inputs are normalized into.
    #[must_use]
    pub fn channel_mode(self) -> ChannelMode {
        match self {
            Self::Ssim | Self::Uiqm => ChannelMode::Rgb,
            Self::Psnr => ChannelMode::Lightness,
        }
    }

    /// Whether this metric compares a ground-truth/generated pair.
    #[must_use]
    pub fn is_paired(self) -> bool {
        match self {
            Self::Ssim | Self::Psnr => true,
            Self::Uiqm => false,
        }
    }

    /// Short display code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ssim => "SSIM",
            Self::Psnr => "PSNR",
            Self::Uiqm => "UIQM",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A scalar metric result tagged with the kind that produced it and the
/// ground-truth (or scanned) file name it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSample {
    /// Metric kind that produced this score.
    pub kind: MetricKind,
    /// File name the score belongs to.
    pub file: String,
    /// Scalar score.
    pub value: f64,
}

/// Compute a paired metric over a ground-truth/generated image pair.
///
/// The two inputs are never reordered: `ground_truth` is always the reference.
///
/// # Errors
///
/// Returns [`Error::MetricCalculation`] if `kind` is not a paired metric or
/// the images are not in the channel mode the metric requires, and
/// [`Error::DimensionMismatch`] if the planes differ in size.
pub fn compute_paired(
    kind: MetricKind,
    ground_truth: &NormalizedImage,
    generated: &NormalizedImage,
) -> Result<f64> {
    match kind {
        MetricKind::Ssim => {
            let a = require_rgb(kind, ground_truth)?;
            let b = require_rgb(kind, generated)?;
            ssim::structural_similarity(a, b)
        }
        MetricKind::Psnr => {
            let a = require_lightness(kind, ground_truth)?;
            let b = require_lightness(kind, generated)?;
            psnr::peak_signal_to_noise(a, b)
        }
        MetricKind::Uiqm => Err(Error::MetricCalculation {
            metric: kind.to_string(),
            reason: "not a paired metric".to_string(),
        }),
    }
}

/// Compute a no-reference metric over a single image.
///
/// # Errors
///
/// Returns [`Error::MetricCalculation`] if `kind` requires a ground-truth
/// pair or the image is not RGB.
pub fn compute_no_reference(kind: MetricKind, image: &NormalizedImage) -> Result<f64> {
    match kind {
        MetricKind::Uiqm => {
            let rgb = require_rgb(kind, image)?;
            Ok(uiqm::underwater_quality(rgb))
        }
        MetricKind::Ssim | MetricKind::Psnr => Err(Error::MetricCalculation {
            metric: kind.to_string(),
            reason: "paired metric requires a ground-truth image".to_string(),
        }),
    }
}

fn require_rgb<'a>(
    kind: MetricKind,
    image: &'a NormalizedImage,
) -> Result<&'a imgref::ImgVec<rgb::RGB8>> {
    image.as_rgb().ok_or_else(|| Error::MetricCalculation {
        metric: kind.to_string(),
        reason: "expected an RGB-normalized image".to_string(),
    })
}

fn require_lightness<'a>(
    kind: MetricKind,
    image: &'a NormalizedImage,
) -> Result<&'a imgref::ImgVec<u8>> {
    image.as_lightness().ok_or_else(|| Error::MetricCalculation {
        metric: kind.to_string(),
        reason: "expected a lightness-normalized image".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgref::ImgVec;
    use rgb::RGB8;

    fn flat_rgb(value: u8, w: usize, h: usize) -> NormalizedImage {
        let pixels = vec![RGB8::new(value, value, value); w * h];
        NormalizedImage::Rgb(ImgVec::new(pixels, w, h))
    }

    #[test]
    fn test_channel_modes() {
        assert_eq!(MetricKind::Ssim.channel_mode(), ChannelMode::Rgb);
        assert_eq!(MetricKind::Psnr.channel_mode(), ChannelMode::Lightness);
        assert_eq!(MetricKind::Uiqm.channel_mode(), ChannelMode::Rgb);
    }

    #[test]
    fn test_pairedness() {
        assert!(MetricKind::Ssim.is_paired());
        assert!(MetricKind::Psnr.is_paired());
        assert!(!MetricKind::Uiqm.is_paired());
    }

    #[test]
    fn test_paired_dispatch_rejects_uiqm() {
        let img = flat_rgb(128, 16, 16);
        let err = compute_paired(MetricKind::Uiqm, &img, &img).unwrap_err();
        assert!(matches!(err, Error::MetricCalculation { .. }));
    }

    #[test]
    fn test_no_reference_dispatch_rejects_paired_kinds() {
        let img = flat_rgb(128, 16, 16);
        let err = compute_no_reference(MetricKind::Ssim, &img).unwrap_err();
        assert!(matches!(err, Error::MetricCalculation { .. }));
    }

    #[test]
    fn test_channel_mode_mismatch_is_an_error() {
        let rgb = flat_rgb(128, 16, 16);
        let err = compute_paired(MetricKind::Psnr, &rgb, &rgb).unwrap_err();
        assert!(matches!(err, Error::MetricCalculation { .. }));
    }
}
