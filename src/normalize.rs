//! Image loading and normalization.
//!
//! Every measurement runs over images brought into a common comparable
//! representation: fixed spatial dimensions and a declared channel layout.
//! [`load_normalized`] is the single entry point; it decodes, resamples and
//! converts in one step and never caches across calls.

use std::path::Path;

use image::imageops::FilterType;
use imgref::ImgVec;
use rgb::RGB8;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Spatial dimensions every image is resampled to before measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalDims {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

impl EvalDims {
    /// Create evaluation dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for EvalDims {
    /// The common measurement dimension, 320x240.
    fn default() -> Self {
        Self::new(320, 240)
    }
}

/// Channel layout requested from the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelMode {
    /// Tri-channel RGB.
    Rgb,
    /// Single-channel lightness (BT.601 weighting).
    Lightness,
}

/// An image resampled to the evaluation dimensions in a declared channel mode.
///
/// Produced fresh per measurement and owned solely by the call that created it.
#[derive(Clone, Debug)]
pub enum NormalizedImage {
    /// RGB8 pixels.
    Rgb(ImgVec<RGB8>),
    /// Lightness plane.
    Lightness(ImgVec<u8>),
}

impl NormalizedImage {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Rgb(img) => img.width(),
            Self::Lightness(img) => img.width(),
        }
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Rgb(img) => img.height(),
            Self::Lightness(img) => img.height(),
        }
    }

    /// The channel mode this image was normalized into.
    #[must_use]
    pub fn mode(&self) -> ChannelMode {
        match self {
            Self::Rgb(_) => ChannelMode::Rgb,
            Self::Lightness(_) => ChannelMode::Lightness,
        }
    }

    /// Borrow the RGB plane, if this image was normalized as RGB.
    #[must_use]
    pub fn as_rgb(&self) -> Option<&ImgVec<RGB8>> {
        match self {
            Self::Rgb(img) => Some(img),
            Self::Lightness(_) => None,
        }
    }

    /// Borrow the lightness plane, if this image was normalized as lightness.
    #[must_use]
    pub fn as_lightness(&self) -> Option<&ImgVec<u8>> {
        match self {
            Self::Lightness(img) => Some(img),
            Self::Rgb(_) => None,
        }
    }
}

/// Load an image and normalize it to `dims` in the requested channel mode.
///
/// Resampling uses a triangle (bilinear) filter, which is deterministic:
/// repeated loads of an unchanged file produce byte-identical planes.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be opened or decoded. The
/// caller decides whether that aborts the batch or is skipped and reported.
pub fn load_normalized(path: &Path, mode: ChannelMode, dims: EvalDims) -> Result<NormalizedImage> {
    let decoded = image::open(path).map_err(|e| Error::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let resized = decoded.resize_exact(dims.width, dims.height, FilterType::Triangle);
    let rgb = resized.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    Ok(match mode {
        ChannelMode::Rgb => {
            let pixels: Vec<RGB8> = rgb
                .pixels()
                .map(|p| RGB8::new(p.0[0], p.0[1], p.0[2]))
                .collect();
            NormalizedImage::Rgb(ImgVec::new(pixels, width, height))
        }
        ChannelMode::Lightness => {
            let pixels: Vec<u8> = rgb
                .pixels()
                .map(|p| bt601_lightness(p.0[0], p.0[1], p.0[2]))
                .collect();
            NormalizedImage::Lightness(ImgVec::new(pixels, width, height))
        }
    })
}

/// BT.601 lightness: L = 0.299 R + 0.587 G + 0.114 B.
#[inline]
fn bt601_lightness(r: u8, g: u8, b: u8) -> u8 {
    let l = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    l.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_png(dir: &Path, name: &str, w: u32, h: u32, rgb: [u8; 3]) -> std::path::PathBuf {
        let img = image::RgbImage::from_pixel(w, h, image::Rgb(rgb));
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_resamples_to_eval_dims() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "a.png", 64, 48, [10, 20, 30]);

        let img = load_normalized(&path, ChannelMode::Rgb, EvalDims::default()).unwrap();
        assert_eq!(img.width(), 320);
        assert_eq!(img.height(), 240);
        assert_eq!(img.mode(), ChannelMode::Rgb);
    }

    #[test]
    fn test_lightness_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "red.png", 8, 8, [255, 0, 0]);

        let img = load_normalized(&path, ChannelMode::Lightness, EvalDims::new(4, 4)).unwrap();
        let plane = img.as_lightness().unwrap();
        // 0.299 * 255 = 76.245
        assert!(plane.pixels().all(|p| p == 76));
    }

    #[test]
    fn test_flat_image_stays_flat() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "gray.png", 100, 100, [128, 128, 128]);

        let img = load_normalized(&path, ChannelMode::Rgb, EvalDims::default()).unwrap();
        let rgb = img.as_rgb().unwrap();
        assert!(rgb.pixels().all(|p| p == RGB8::new(128, 128, 128)));
    }

    #[test]
    fn test_undecodable_file_is_image_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = load_normalized(&path, ChannelMode::Rgb, EvalDims::default()).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[test]
    fn test_missing_file_is_image_load_error() {
        let err = load_normalized(
            Path::new("/nonexistent/nope.png"),
            ChannelMode::Rgb,
            EvalDims::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
