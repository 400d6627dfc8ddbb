//! Structural similarity (SSIM) over RGB channels.
//!
//! Gaussian-weighted local statistics per channel (Wang et al. 2004), with
//! the per-channel scores averaged. Scores fall in [-1, 1]; identical inputs
//! score exactly 1.0.

use imgref::ImgVec;
use rgb::RGB8;

use crate::error::{Error, Result};

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DYNAMIC_RANGE: f64 = 255.0;
const SIGMA: f64 = 1.5;
// Local statistics window; variances use the unbiased N/(N-1) normalization.
const WIN_SIZE: usize = 5;

/// Compute SSIM between two RGB images of equal dimensions.
///
/// `a` is the ground truth, `b` the generated image; the score is symmetric
/// but the argument order is kept fixed by callers.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the images differ in size.
pub fn structural_similarity(a: &ImgVec<RGB8>, b: &ImgVec<RGB8>) -> Result<f64> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        });
    }

    let (width, height) = (a.width(), a.height());
    let mut total = 0.0;
    for channel in 0..3 {
        let x = plane(a, channel);
        let y = plane(b, channel);
        total += channel_ssim(&x, &y, width, height);
    }
    Ok(total / 3.0)
}

fn plane(img: &ImgVec<RGB8>, channel: usize) -> Vec<f64> {
    img.pixels()
        .map(|p| {
            f64::from(match channel {
                0 => p.r,
                1 => p.g,
                _ => p.b,
            })
        })
        .collect()
}

/// Mean of the per-pixel SSIM map for one channel.
fn channel_ssim(x: &[f64], y: &[f64], width: usize, height: usize) -> f64 {
    let ux = gaussian_filter(x, width, height);
    let uy = gaussian_filter(y, width, height);
    let uxx = gaussian_filter(&pointwise_mul(x, x), width, height);
    let uyy = gaussian_filter(&pointwise_mul(y, y), width, height);
    let uxy = gaussian_filter(&pointwise_mul(x, y), width, height);

    let n = (WIN_SIZE * WIN_SIZE) as f64;
    let unbiased_norm = n / (n - 1.0);
    let c1 = (K1 * DYNAMIC_RANGE).powi(2);
    let c2 = (K2 * DYNAMIC_RANGE).powi(2);

    let mut sum = 0.0;
    for i in 0..x.len() {
        let vx = (uxx[i] - ux[i] * ux[i]) * unbiased_norm;
        let vy = (uyy[i] - uy[i] * uy[i]) * unbiased_norm;
        let vxy = (uxy[i] - ux[i] * uy[i]) * unbiased_norm;

        let numerator = (2.0 * ux[i] * uy[i] + c1) * (2.0 * vxy + c2);
        let denominator = (ux[i] * ux[i] + uy[i] * uy[i] + c1) * (vx + vy + c2);
        sum += numerator / denominator;
    }
    sum / x.len() as f64
}

fn pointwise_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x * y).collect()
}

/// Separable Gaussian blur with reflected boundaries.
fn gaussian_filter(src: &[f64], width: usize, height: usize) -> Vec<f64> {
    let kernel = gaussian_kernel(SIGMA);
    let radius = (kernel.len() / 2) as isize;

    let mut horizontal = vec![0.0; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect(x as isize + k as isize - radius, width as isize);
                acc += weight * row[sx];
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = vec![0.0; src.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect(y as isize + k as isize - radius, height as isize);
                acc += weight * horizontal[sy * width + x];
            }
            out[y * width + x] = acc;
        }
    }
    out
}

fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma + 0.5) as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|i| (-((i * i) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Reflect an out-of-range index back into [0, n): (d c b a | a b c d | d c b a).
fn reflect(mut i: isize, n: isize) -> usize {
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}
