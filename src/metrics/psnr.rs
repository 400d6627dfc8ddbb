//! Peak signal-to-noise ratio over the lightness channel.

use imgref::ImgVec;

use crate::error::{Error, Result};

const PEAK: f64 = 255.0;

/// Compute PSNR in decibels between two lightness planes of equal dimensions.
///
/// Returns `f64::INFINITY` for identical inputs; the degenerate zero-MSE case
/// is a valid result, never an error.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the planes differ in size.
pub fn peak_signal_to_noise(a: &ImgVec<u8>, b: &ImgVec<u8>) -> Result<f64> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        });
    }

    let mut sum = 0.0_f64;
    for (x, y) in a.pixels().zip(b.pixels()) {
        let diff = f64::from(x) - f64::from(y);
        sum += diff * diff;
    }
    let mse = sum / (a.width() * a.height()) as f64;

    if mse == 0.0 {
        Ok(f64::INFINITY)
    } else {
        Ok(10.0 * (PEAK * PEAK / mse).log10())
    }
}
