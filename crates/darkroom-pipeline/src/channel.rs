//! Channel isolation.
//!
//! Keeps a single named plane of an RGB image, zeroing the other two.
//! The kept channel stays in its own plane — isolating red produces an
//! image that renders red, not a grayscale intensity map.

use image::{DynamicImage, Rgb, RgbImage};

use crate::params::Channel;

/// Zero every channel except `channel`. Non-RGB input is converted to
/// RGB first (a grayscale image contributes its intensity to the kept
/// plane).
#[must_use = "returns the isolated-channel image"]
pub fn isolate(image: &DynamicImage, channel: Channel) -> DynamicImage {
    let rgb = image.to_rgb8();
    let keep = channel.index();
    DynamicImage::ImageRgb8(RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let mut p = [0u8; 3];
        p[keep] = rgb.get_pixel(x, y).0[keep];
        Rgb(p)
    }))
}
