//! Point-wise intensity adjustments: brightness, contrast, saturation.
//!
//! All three are linear per-pixel maps. Brightness and contrast apply
//! to whatever channels the working image has (grayscale included);
//! saturation blends color channels toward per-pixel luminance and is
//! an identity on single-channel images.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Mid-gray pivot for contrast scaling.
const MID_GRAY: f32 = 128.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Apply a per-channel linear map to every pixel of an image.
fn map_channels(image: &DynamicImage, f: impl Fn(u8) -> u8) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
                Luma([f(gray.get_pixel(x, y).0[0])])
            }))
        }
        other => {
            let rgb = other.to_rgb8();
            DynamicImage::ImageRgb8(RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let p = rgb.get_pixel(x, y).0;
                Rgb([f(p[0]), f(p[1]), f(p[2])])
            }))
        }
    }
}

/// Scale pixel intensity linearly: 1.0 unchanged, 0 black, >1 brighter.
#[must_use = "returns the adjusted image"]
pub fn brightness(image: &DynamicImage, factor: f32) -> DynamicImage {
    map_channels(image, |v| saturate(f32::from(v) * factor))
}

/// Scale pixel intensity around mid-gray: 1.0 unchanged, 0 flat gray.
#[must_use = "returns the adjusted image"]
pub fn contrast(image: &DynamicImage, factor: f32) -> DynamicImage {
    map_channels(image, |v| {
        saturate((f32::from(v) - MID_GRAY).mul_add(factor, MID_GRAY))
    })
}

/// Blend each pixel between its luminance and its full color:
/// 0 yields grayscale, 1.0 is unchanged, >1 over-saturates.
///
/// Single-channel images have no color to scale and pass through
/// untouched.
#[must_use = "returns the adjusted image"]
pub fn saturation(image: &DynamicImage, factor: f32) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) => image.clone(),
        other => {
            let rgb = other.to_rgb8();
            DynamicImage::ImageRgb8(RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let p = rgb.get_pixel(x, y).0;
                let luma = 0.114f32.mul_add(
                    f32::from(p[2]),
                    0.299f32.mul_add(f32::from(p[0]), 0.587 * f32::from(p[1])),
                );
                Rgb([
                    saturate((f32::from(p[0]) - luma).mul_add(factor, luma)),
                    saturate((f32::from(p[1]) - luma).mul_add(factor, luma)),
                    saturate((f32::from(p[2]) - luma).mul_add(factor, luma)),
                ])
            }))
        }
    }
}
