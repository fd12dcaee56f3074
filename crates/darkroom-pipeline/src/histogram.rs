//! Per-channel intensity histograms.
//!
//! Pure calculation over an in-memory image: 256-bucket counts for the
//! red, green, and blue planes plus a fourth for the grayscale
//! conversion of the same image. Non-RGB input is converted to RGB
//! first (intensity replicated across channels), so the shape of the
//! result never depends on the source mode.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Number of intensity buckets per channel (one per 8-bit value).
pub const BUCKETS: usize = 256;

/// Intensity distributions for one image.
///
/// Each vector holds exactly [`BUCKETS`] counts; the counts in each
/// channel sum to the image's pixel count (width × height).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    /// Red plane counts.
    pub red: Vec<u32>,
    /// Green plane counts.
    pub green: Vec<u32>,
    /// Blue plane counts.
    pub blue: Vec<u32>,
    /// Counts for the grayscale (luminance) conversion.
    pub grayscale: Vec<u32>,
}

/// Compute the four channel histograms of an image.
#[must_use = "returns the computed histograms"]
pub fn channel_histograms(image: &DynamicImage) -> Histogram {
    let rgb = image.to_rgb8();
    let mut red = vec![0u32; BUCKETS];
    let mut green = vec![0u32; BUCKETS];
    let mut blue = vec![0u32; BUCKETS];
    for p in rgb.pixels() {
        red[usize::from(p.0[0])] += 1;
        green[usize::from(p.0[1])] += 1;
        blue[usize::from(p.0[2])] += 1;
    }

    let mut grayscale = vec![0u32; BUCKETS];
    for p in image.to_luma8().pixels() {
        grayscale[usize::from(p.0[0])] += 1;
    }

    Histogram {
        red,
        green,
        blue,
        grayscale,
    }
}
