//! Dynamic-range operations: per-channel normalization and histogram
//! equalization.
//!
//! Normalization linearly stretches each channel's observed [min, max]
//! to the full [0, 255] range. Equalization delegates the per-channel
//! work to [`imageproc::contrast::equalize_histogram`], applied to each
//! RGB plane independently and recombined.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Stretch each channel's observed value range to [0, 255].
///
/// Channels with zero dynamic range (min == max) are left unchanged;
/// there is no contrast to recover and a stretch would divide by zero.
/// Grayscale images are treated as a single channel.
#[must_use = "returns the normalized image"]
pub fn normalize(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let range = channel_range(gray.pixels().map(|p| p.0[0]));
            DynamicImage::ImageLuma8(GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
                Luma([stretch(gray.get_pixel(x, y).0[0], range)])
            }))
        }
        other => {
            let rgb = other.to_rgb8();
            let ranges: [(u8, u8); 3] =
                std::array::from_fn(|c| channel_range(rgb.pixels().map(|p| p.0[c])));
            DynamicImage::ImageRgb8(RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let p = rgb.get_pixel(x, y).0;
                Rgb([
                    stretch(p[0], ranges[0]),
                    stretch(p[1], ranges[1]),
                    stretch(p[2], ranges[2]),
                ])
            }))
        }
    }
}

/// Equalize the histogram of each RGB channel independently, then
/// recombine. Non-RGB input is converted to RGB first.
#[must_use = "returns the equalized image"]
pub fn equalize(image: &DynamicImage) -> DynamicImage {
    let rgb = image.to_rgb8();
    let (w, h) = (rgb.width(), rgb.height());

    let planes: [GrayImage; 3] = std::array::from_fn(|c| {
        GrayImage::from_fn(w, h, |x, y| Luma([rgb.get_pixel(x, y).0[c]]))
    });
    let equalized: [GrayImage; 3] =
        std::array::from_fn(|c| imageproc::contrast::equalize_histogram(&planes[c]));

    DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        Rgb([
            equalized[0].get_pixel(x, y).0[0],
            equalized[1].get_pixel(x, y).0[0],
            equalized[2].get_pixel(x, y).0[0],
        ])
    }))
}

fn channel_range(values: impl Iterator<Item = u8>) -> (u8, u8) {
    values.fold((u8::MAX, u8::MIN), |(min, max), v| {
        (min.min(v), max.max(v))
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stretch(value: u8, (min, max): (u8, u8)) -> u8 {
    if max <= min {
        return value;
    }
    let scaled =
        f32::from(value - min) / f32::from(max - min) * 255.0;
    scaled.round().clamp(0.0, 255.0) as u8
}
