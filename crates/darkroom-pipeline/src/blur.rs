//! Gaussian blur.
//!
//! Wraps [`imageproc::filter::gaussian_blur_f32`], which operates on a
//! single channel. Color images are split into R/G/B planes, blurred
//! independently, and reassembled — Gaussian blur is a linear,
//! per-channel operation, so this is equivalent to blurring in color
//! space.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Apply Gaussian blur with the given radius (sigma).
///
/// Non-positive radii return the image unchanged, since the underlying
/// filter panics on `sigma <= 0.0`.
#[must_use = "returns the blurred image"]
pub fn gaussian(image: &DynamicImage, radius: f32) -> DynamicImage {
    if radius <= 0.0 {
        return image.clone();
    }

    match image {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(imageproc::filter::gaussian_blur_f32(gray, radius))
        }
        other => {
            let rgb = other.to_rgb8();
            let (w, h) = (rgb.width(), rgb.height());

            let channels: [GrayImage; 3] = std::array::from_fn(|c| {
                GrayImage::from_fn(w, h, |x, y| Luma([rgb.get_pixel(x, y).0[c]]))
            });
            let blurred: [GrayImage; 3] =
                std::array::from_fn(|c| imageproc::filter::gaussian_blur_f32(&channels[c], radius));

            DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
                Rgb([
                    blurred[0].get_pixel(x, y).0[0],
                    blurred[1].get_pixel(x, y).0[0],
                    blurred[2].get_pixel(x, y).0[0],
                ])
            }))
        }
    }
}
