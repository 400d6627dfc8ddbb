//! Underwater image quality measure (UIQM).
//!
//! No-reference score from Panetta, Gao and Agaian (2016): a linear
//! combination of a colourfulness measure (UICM), a sharpness measure (UISM)
//! and a contrast measure (UIConM), with coefficients tuned for underwater
//! imagery. Computed over 8-bit RGB values in the 0-255 range.

use imgref::ImgVec;
use rgb::RGB8;

const UICM_WEIGHT: f64 = 0.0282;
const UISM_WEIGHT: f64 = 0.2953;
const UICONM_WEIGHT: f64 = 3.5753;

/// Block size for the EME / logAMEE windowed measures.
const BLOCK_SIZE: usize = 10;

/// Fraction trimmed from each tail of the opponent-colour distributions.
const TRIM_ALPHA: f64 = 0.1;

/// Compute UIQM for a single RGB image.
#[must_use]
pub fn underwater_quality(img: &ImgVec<RGB8>) -> f64 {
    let (width, height) = (img.width(), img.height());
    let r = plane(img, 0);
    let g = plane(img, 1);
    let b = plane(img, 2);

    let uicm = colourfulness(&r, &g, &b);
    let uism = sharpness(&r, &g, &b, width, height);
    let uiconm = contrast(&r, &g, &b, width, height);

    UICM_WEIGHT * uicm + UISM_WEIGHT * uism + UICONM_WEIGHT * uiconm
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

/// UICM: opponent-colour statistics with asymmetric alpha-trimmed means.
fn colourfulness(r: &[f64], g: &[f64], b: &[f64]) -> f64 {
    let rg: Vec<f64> = r.iter().zip(g).map(|(x, y)| x - y).collect();
    let yb: Vec<f64> = r
        .iter()
        .zip(g)
        .zip(b)
        .map(|((x, y), z)| (x + y) / 2.0 - z)
        .collect();

    let mu_rg = trimmed_mean(&rg);
    let mu_yb = trimmed_mean(&yb);
    let var_rg = mean_squared_deviation(&rg, mu_rg);
    let var_yb = mean_squared_deviation(&yb, mu_yb);

    let magnitude = (mu_rg * mu_rg + mu_yb * mu_yb).sqrt();
    let spread = (var_rg + var_yb).sqrt();
    -0.0268 * magnitude + 0.1586 * spread
}

/// Alpha-trimmed mean discarding `TRIM_ALPHA` of samples from each tail.
fn trimmed_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let k = sorted.len();
    let trim_low = (TRIM_ALPHA * k as f64).ceil() as usize;
    let trim_high = (TRIM_ALPHA * k as f64).floor() as usize;
    if trim_low + trim_high >= k {
        return sorted[k / 2];
    }
    let kept = &sorted[trim_low..k - trim_high];
    kept.iter().sum::<f64>() / kept.len() as f64
}

fn mean_squared_deviation(values: &[f64], mu: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64
}

/// UISM: EME over Sobel-edge-gated channel planes, channels weighted
/// 0.299 / 0.587 / 0.144.
fn sharpness(r: &[f64], g: &[f64], b: &[f64], width: usize, height: usize) -> f64 {
    let eme_of = |chan: &[f64]| {
        let edges = sobel_magnitude(chan, width, height);
        let gated: Vec<f64> = edges.iter().zip(chan).map(|(e, v)| e * v).collect();
        eme(&gated, width, height)
    };

    0.299 * eme_of(r) + 0.587 * eme_of(g) + 0.144 * eme_of(b)
}

/// Sobel gradient magnitude with reflected boundaries.
fn sobel_magnitude(src: &[f64], width: usize, height: usize) -> Vec<f64> {
    let at = |x: isize, y: isize| {
        let xi = reflect(x, width as isize);
        let yi = reflect(y, height as isize);
        src[yi * width + xi]
    };

    let mut out = vec![0.0; src.len()];
    for y in 0..height as isize {
        for x in 0..width as isize {
            let gx = at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1)
                - at(x + 1, y - 1)
                - 2.0 * at(x + 1, y)
                - at(x + 1, y + 1);
            let gy = at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1)
                - at(x - 1, y + 1)
                - 2.0 * at(x, y + 1)
                - at(x + 1, y + 1);
            out[y as usize * width + x as usize] = (gx * gx + gy * gy).sqrt();
        }
    }
    out
}

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

/// EME: mean log max/min contrast over non-overlapping blocks. Blocks where
/// either extreme is zero contribute nothing.
fn eme(src: &[f64], width: usize, height: usize) -> f64 {
    let cols = width / BLOCK_SIZE;
    let rows = height / BLOCK_SIZE;
    if cols == 0 || rows == 0 {
        return 0.0;
    }

    let mut acc = 0.0;
    for by in 0..rows {
        for bx in 0..cols {
            let (min_v, max_v) = block_extremes(src, width, bx, by, &[]);
            if min_v > 0.0 && max_v > 0.0 {
                acc += (max_v / min_v).ln();
            }
        }
    }
    2.0 / (cols * rows) as f64 * acc
}

/// UIConM: logAMEE contrast over non-overlapping blocks spanning all three
/// channels.
fn contrast(r: &[f64], g: &[f64], b: &[f64], width: usize, height: usize) -> f64 {
    let cols = width / BLOCK_SIZE;
    let rows = height / BLOCK_SIZE;
    if cols == 0 || rows == 0 {
        return 0.0;
    }

    let mut acc = 0.0;
    for by in 0..rows {
        for bx in 0..cols {
            let (min_v, max_v) = block_extremes(r, width, bx, by, &[g, b]);
            let top = max_v - min_v;
            let bot = max_v + min_v;
            if bot != 0.0 && top > 0.0 {
                let ratio = top / bot;
                acc += ratio * ratio.ln();
            }
        }
    }
    -1.0 / (cols * rows) as f64 * acc
}

/// Min and max over one block, optionally spanning extra channel planes.
fn block_extremes(
    first: &[f64],
    width: usize,
    bx: usize,
    by: usize,
    extra: &[&[f64]],
) -> (f64, f64) {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for y in by * BLOCK_SIZE..(by + 1) * BLOCK_SIZE {
        for x in bx * BLOCK_SIZE..(bx + 1) * BLOCK_SIZE {
            let idx = y * width + x;
            min_v = min_v.min(first[idx]);
            max_v = max_v.max(first[idx]);
            for chan in extra {
                min_v = min_v.min(chan[idx]);
                max_v = max_v.max(chan[idx]);
            }
        }
    }
    (min_v, max_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: u8, w: usize, h: usize) -> ImgVec<RGB8> {
        ImgVec::new(vec![RGB8::new(value, value, value); w * h], w, h)
    }

    fn checkerboard(w: usize, h: usize) -> ImgVec<RGB8> {
        let pixels: Vec<RGB8> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                if (x + y) % 2 == 0 {
                    RGB8::new(220, 40, 90)
                } else {
                    RGB8::new(30, 180, 60)
                }
            })
            .collect();
        ImgVec::new(pixels, w, h)
    }

    #[test]
    fn test_flat_image_scores_zero() {
        let img = flat(128, 40, 30);
        let score = underwater_quality(&img);
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn test_textured_image_scores_finite_nonzero() {
        let img = checkerboard(40, 30);
        let score = underwater_quality(&img);
        assert!(score.is_finite());
        assert!(score != 0.0);
    }

    #[test]
    fn test_deterministic() {
        let img = checkerboard(40, 30);
        let a = underwater_quality(&img);
        let b = underwater_quality(&img);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_trimmed_mean_discards_tails() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        // ceil(1.0) = 1 low, floor(1.0) = 1 high: mean of 1..=8
        assert!((trimmed_mean(&values) - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_trimmed_mean_ignores_outlier() {
        let mut values: Vec<f64> = vec![5.0; 20];
        values.push(10_000.0);
        let tm = trimmed_mean(&values);
        assert!((tm - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_colourfulness_zero_for_gray() {
        let n = 64;
        let gray = vec![128.0; n];
        assert!(colourfulness(&gray, &gray, &gray).abs() < 1e-12);
    }

    #[test]
    fn test_colourfulness_positive_for_varied_opponents() {
        // Half saturated red, half saturated green: large RG spread
        let mut r = vec![255.0; 50];
        r.extend(vec![0.0; 50]);
        let mut g = vec![0.0; 50];
        g.extend(vec![255.0; 50]);
        let b = vec![0.0; 100];
        assert!(colourfulness(&r, &g, &b) > 0.0);
    }

    #[test]
    fn test_eme_zero_for_uniform_blocks() {
        let src = vec![7.0; 20 * 20];
        assert!(eme(&src, 20, 20).abs() < 1e-12);
    }

    #[test]
    fn test_eme_zero_for_undersized_image() {
        let src = vec![7.0; 8 * 8];
        assert_eq!(eme(&src, 8, 8), 0.0);
    }

    #[test]
    fn test_sharpness_positive_for_edges() {
        let img = checkerboard(40, 30);
        let r = plane(&img, 0);
        let g = plane(&img, 1);
        let b = plane(&img, 2);
        assert!(sharpness(&r, &g, &b, 40, 30) > 0.0);
    }

    #[test]
    fn test_contrast_positive_for_varied_blocks() {
        let img = checkerboard(40, 30);
        let r = plane(&img, 0);
        let g = plane(&img, 1);
        let b = plane(&img, 2);
        // top/bot in (0, 1) makes each term negative; the -1/(k1*k2)
        // coefficient flips the sum positive
        assert!(contrast(&r, &g, &b, 40, 30) > 0.0);
    }
}
