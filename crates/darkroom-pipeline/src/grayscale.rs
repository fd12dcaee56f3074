//! Grayscale conversion and binary thresholding.
//!
//! Both operations collapse the working image to a single luminance
//! channel using the standard weighting `0.299*R + 0.587*G + 0.114*B`
//! (what [`image::DynamicImage::to_luma8`] implements).

use image::{DynamicImage, GrayImage, Luma};

/// Convert any image to single-channel luminance.
#[must_use = "returns the converted image"]
pub fn to_luminance(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageLuma8(image.to_luma8())
}

/// Convert to grayscale, then binarize: pixel > `threshold` becomes
/// white (255), everything else black (0).
///
/// The cutoff is taken as a wide integer and saturated into the 0–255
/// pixel domain rather than rejected: a threshold below 0 yields an
/// all-white image (every pixel exceeds it except exact zeros), one of
/// 255 or above yields all black.
#[must_use = "returns the binarized image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn binarize(image: &DynamicImage, threshold: i64) -> DynamicImage {
    let cutoff = threshold.clamp(0, 255) as u8;
    let gray = image.to_luma8();
    let out = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] > cutoff {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    DynamicImage::ImageLuma8(out)
}
