//! Geometric operations: rotation with canvas expansion, mirroring,
//! and exact-dimension resampling.
//!
//! Rotation is implemented as an inverse mapping with bilinear
//! sampling: every output pixel is projected back into the source and
//! blended from its four surrounding pixels. The output canvas is the
//! bounding box of the rotated source, so no content is ever clipped;
//! regions the source does not cover come out black.

use image::{DynamicImage, ImageBuffer, Pixel, imageops::FilterType};

use crate::params::ResizeTarget;

/// Below this magnitude a sine/cosine is treated as exactly zero, so
/// right-angle rotations produce exact pixel grids instead of being
/// smeared by floating-point residue (cos 90° ≈ 6e-17).
const TRIG_SNAP: f64 = 1e-9;

/// Rotate counter-clockwise by `degrees`, expanding the canvas to the
/// rotated bounding box. Uncovered corners fill black.
#[must_use = "returns the rotated image"]
pub fn rotate_expanded(image: &DynamicImage, degrees: f32) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            DynamicImage::ImageLuma8(rotate_buffer(gray, degrees))
        }
        other => DynamicImage::ImageRgb8(rotate_buffer(&other.to_rgb8(), degrees)),
    }
}

/// Mirror left-right.
#[must_use = "returns the mirrored image"]
pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Mirror top-bottom.
#[must_use = "returns the mirrored image"]
pub fn flip_vertical(image: &DynamicImage) -> DynamicImage {
    image.flipv()
}

/// Resample to exactly `target` dimensions with a Lanczos3 filter.
#[must_use = "returns the resized image"]
pub fn resize_exact(image: &DynamicImage, target: ResizeTarget) -> DynamicImage {
    image.resize_exact(target.width, target.height, FilterType::Lanczos3)
}

fn snap(value: f64) -> f64 {
    if value.abs() < TRIG_SNAP { 0.0 } else { value }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rotate_buffer<P>(src: &ImageBuffer<P, Vec<u8>>, degrees: f32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let theta = f64::from(degrees).to_radians();
    let (sin_t, cos_t) = (snap(theta.sin()), snap(theta.cos()));

    let (src_w, src_h) = (f64::from(src.width()), f64::from(src.height()));
    let out_w = src_w.mul_add(cos_t.abs(), src_h * sin_t.abs()).ceil() as u32;
    let out_h = src_w.mul_add(sin_t.abs(), src_h * cos_t.abs()).ceil() as u32;

    let (in_cx, in_cy) = (src_w / 2.0, src_h / 2.0);
    let (out_cx, out_cy) = (f64::from(out_w) / 2.0, f64::from(out_h) / 2.0);

    let channels = usize::from(P::CHANNEL_COUNT);
    ImageBuffer::from_fn(out_w, out_h, |ox, oy| {
        // Offset of the output pixel center from the output center.
        let u = f64::from(ox) + 0.5 - out_cx;
        let v = f64::from(oy) + 0.5 - out_cy;
        // Inverse rotation back into source coordinates. Positive
        // angles rotate counter-clockwise in the y-down image plane.
        let sx = u.mul_add(cos_t, -(v * sin_t)) + in_cx;
        let sy = u.mul_add(sin_t, v * cos_t) + in_cy;
        sample_bilinear(src, sx, sy, channels)
    })
}

/// Bilinear sample at continuous source coordinates, treating anything
/// outside the image as black.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_bilinear<P>(src: &ImageBuffer<P, Vec<u8>>, sx: f64, sy: f64, channels: usize) -> P
where
    P: Pixel<Subpixel = u8>,
{
    // Shift to the pixel-center grid: pixel (i, j) sits at (i+0.5, j+0.5).
    let fx = sx - 0.5;
    let fy = sy - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let mut acc = [0.0f64; 4];
    let neighbors = [
        (x0, y0, (1.0 - tx) * (1.0 - ty)),
        (x0 + 1.0, y0, tx * (1.0 - ty)),
        (x0, y0 + 1.0, (1.0 - tx) * ty),
        (x0 + 1.0, y0 + 1.0, tx * ty),
    ];
    for (nx, ny, weight) in neighbors {
        if weight == 0.0
            || nx < 0.0
            || ny < 0.0
            || nx >= f64::from(src.width())
            || ny >= f64::from(src.height())
        {
            continue;
        }
        let pixel = src.get_pixel(nx as u32, ny as u32);
        for (c, slot) in acc.iter_mut().enumerate().take(channels) {
            *slot += weight * f64::from(pixel.channels()[c]);
        }
    }

    let mut bytes = [0u8; 4];
    for (c, value) in acc.iter().enumerate().take(channels) {
        bytes[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    *P::from_slice(&bytes[..channels])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, GrayImage, Luma, Rgb, RgbImage};

    fn red_blue_strip() -> DynamicImage {
        // 2x1: red on the left, blue on the right.
        DynamicImage::ImageRgb8(RgbImage::from_fn(2, 1, |x, _y| {
            if x == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        }))
    }

    #[test]
    fn rotate_zero_degrees_is_identity() {
        let img = red_blue_strip();
        let out = rotate_expanded(&img, 0.0);
        assert_eq!(out.to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn rotate_90_swaps_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(7, 3));
        let out = rotate_expanded(&img, 90.0);
        assert_eq!(out.dimensions(), (3, 7));
    }

    #[test]
    fn rotate_90_moves_right_edge_to_top() {
        // Counter-clockwise: the blue pixel on the right ends up on top.
        let out = rotate_expanded(&red_blue_strip(), 90.0).to_rgb8();
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [255, 0, 0]);
    }

    #[test]
    fn rotate_180_reverses_strip() {
        let out = rotate_expanded(&red_blue_strip(), 180.0).to_rgb8();
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn rotate_45_expands_canvas() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([255, 255, 255])));
        let out = rotate_expanded(&img, 45.0);
        // Bounding box of a rotated 10x10 square: 10*sqrt(2) ~ 14.14.
        assert_eq!(out.dimensions(), (15, 15));
        // Corners are uncovered and filled black.
        assert_eq!(out.to_rgb8().get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn rotate_preserves_grayscale_mode() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([200])));
        let out = rotate_expanded(&gray, 90.0);
        assert!(matches!(out, DynamicImage::ImageLuma8(_)));
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn negative_rotation_goes_clockwise() {
        let out = rotate_expanded(&red_blue_strip(), -90.0).to_rgb8();
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 0, 255]);
    }

    #[test]
    fn flip_horizontal_mirrors_left_right() {
        let out = flip_horizontal(&red_blue_strip()).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn flip_vertical_mirrors_top_bottom() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(1, 2, |_x, y| {
            if y == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        }));
        let out = flip_vertical(&img).to_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [255, 0, 0]);
    }

    #[test]
    fn resize_hits_exact_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, Rgb([40, 80, 120])));
        let out = resize_exact(
            &img,
            ResizeTarget {
                width: 3,
                height: 7,
            },
        );
        assert_eq!(out.dimensions(), (3, 7));
    }

    #[test]
    fn resize_of_uniform_image_stays_uniform() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([40, 80, 120])));
        let out = resize_exact(
            &img,
            ResizeTarget {
                width: 4,
                height: 4,
            },
        )
        .to_rgb8();
        for pixel in out.pixels() {
            for (c, &expected) in [40u8, 80, 120].iter().enumerate() {
                let diff = i16::from(pixel.0[c]) - i16::from(expected);
                assert!(diff.abs() <= 1, "channel {c} drifted: {}", pixel.0[c]);
            }
        }
    }
}
