//! darkroom-pipeline: pure image transformation engine (sans-IO).
//!
//! Applies a configurable set of named pixel-level operations to an
//! in-memory image and reports back exactly what ran. This crate has
//! **no I/O dependencies** — it operates on decoded [`DynamicImage`]
//! values and returns structured data. Encoding, HTTP, and record
//! storage live in `darkroom-server` and `darkroom-store`.
//!
//! # Operation order
//!
//! Operations are applied in a fixed catalog order regardless of how
//! the request was written, because visual results are order-dependent
//! (blur-then-threshold differs from threshold-then-blur):
//!
//! 1. grayscale
//! 2. blur
//! 3. brightness
//! 4. contrast
//! 5. saturation
//! 6. threshold
//! 7. rotate
//! 8. `flip_horizontal`
//! 9. `flip_vertical`
//! 10. resize
//! 11. normalize
//! 12. `histogram_equalization`
//! 13. `channel_split`
//!
//! Each step consumes the previous step's output; the input image is
//! never mutated.

pub mod adjust;
pub mod blur;
pub mod channel;
pub mod geometry;
pub mod grayscale;
pub mod histogram;
pub mod levels;
pub mod params;

pub use histogram::{BUCKETS, Histogram, channel_histograms};
pub use params::{AppliedParams, Channel, EngineError, ResizeSpec, ResizeTarget, TransformParams};

/// Re-export `DynamicImage` so downstream crates can hold pixel data
/// without depending on `image` directly.
pub use image::DynamicImage;

/// Run the requested operations against `image` in catalog order.
///
/// Returns the transformed image together with the normalized record
/// of the operations that were applied ([`AppliedParams`]), arguments
/// coerced to canonical form — resize echoes integer dimensions even
/// when floats were requested, `channel_split` echoes the lowercased
/// channel name.
///
/// Boolean operations run only when their field is `true`. Numeric
/// arguments are handed to the underlying primitives unvalidated; only
/// the `channel_split` target is checked, up front, so a bad channel
/// name aborts the call before any pixel work.
///
/// # Errors
///
/// Returns [`EngineError::InvalidChannel`] when `channel_split` names
/// anything other than red, green, or blue. No partial result is
/// produced.
pub fn apply(
    image: &DynamicImage,
    params: &TransformParams,
) -> Result<(DynamicImage, AppliedParams), EngineError> {
    let split = params
        .channel_split
        .as_deref()
        .map(Channel::from_name)
        .transpose()?;

    let mut out = image.clone();
    let mut applied = AppliedParams::default();

    if params.grayscale == Some(true) {
        out = grayscale::to_luminance(&out);
        applied.grayscale = Some(true);
    }
    if let Some(radius) = params.blur {
        out = blur::gaussian(&out, radius);
        applied.blur = Some(radius);
    }
    if let Some(factor) = params.brightness {
        out = adjust::brightness(&out, factor);
        applied.brightness = Some(factor);
    }
    if let Some(factor) = params.contrast {
        out = adjust::contrast(&out, factor);
        applied.contrast = Some(factor);
    }
    if let Some(factor) = params.saturation {
        out = adjust::saturation(&out, factor);
        applied.saturation = Some(factor);
    }
    if let Some(cutoff) = params.threshold {
        out = grayscale::binarize(&out, cutoff);
        applied.threshold = Some(cutoff);
    }
    if let Some(degrees) = params.rotate {
        out = geometry::rotate_expanded(&out, degrees);
        applied.rotate = Some(degrees);
    }
    if params.flip_horizontal == Some(true) {
        out = geometry::flip_horizontal(&out);
        applied.flip_horizontal = Some(true);
    }
    if params.flip_vertical == Some(true) {
        out = geometry::flip_vertical(&out);
        applied.flip_vertical = Some(true);
    }
    if let Some(spec) = params.resize {
        let target = spec.to_target();
        out = geometry::resize_exact(&out, target);
        applied.resize = Some(target);
    }
    if params.normalize == Some(true) {
        out = levels::normalize(&out);
        applied.normalize = Some(true);
    }
    if params.histogram_equalization == Some(true) {
        out = levels::equalize(&out);
        applied.histogram_equalization = Some(true);
    }
    if let Some(chan) = split {
        out = channel::isolate(&out, chan);
        applied.channel_split = Some(chan);
    }

    Ok((out, applied))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn gradient() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, y| {
            Rgb([
                u8::try_from(x * 30).unwrap_or(255),
                u8::try_from(y * 30).unwrap_or(255),
                u8::try_from((x + y) * 15).unwrap_or(255),
            ])
        }))
    }

    #[test]
    fn empty_params_return_unchanged_copy() {
        let img = gradient();
        let (out, applied) = apply(&img, &TransformParams::default()).unwrap();
        assert_eq!(out.to_rgb8(), img.to_rgb8());
        assert_eq!(applied, AppliedParams::default());
    }

    #[test]
    fn input_image_is_never_mutated() {
        let img = gradient();
        let before = img.to_rgb8();
        let params = TransformParams {
            grayscale: Some(true),
            blur: Some(2.0),
            rotate: Some(90.0),
            ..TransformParams::default()
        };
        apply(&img, &params).unwrap();
        assert_eq!(img.to_rgb8(), before);
    }

    #[test]
    fn applied_params_echo_exactly_what_ran() {
        let params = TransformParams {
            grayscale: Some(true),
            threshold: Some(100),
            flip_vertical: Some(false),
            ..TransformParams::default()
        };
        let (_, applied) = apply(&gradient(), &params).unwrap();
        assert_eq!(applied.grayscale, Some(true));
        assert_eq!(applied.threshold, Some(100));
        // An explicit `false` is not an application.
        assert_eq!(applied.flip_vertical, None);
        assert_eq!(applied.blur, None);
    }

    #[test]
    fn resize_echoes_integer_dimensions() {
        let params = TransformParams {
            resize: Some(ResizeSpec::Pair(4.9, 6.2)),
            ..TransformParams::default()
        };
        let (out, applied) = apply(&gradient(), &params).unwrap();
        assert_eq!(out.dimensions(), (4, 6));
        assert_eq!(
            applied.resize,
            Some(ResizeTarget {
                width: 4,
                height: 6,
            }),
        );
    }

    #[test]
    fn blur_runs_before_threshold() {
        // Half-black half-white image: thresholding first leaves the
        // sharp boundary intact, so the result of the engine must match
        // blur-then-threshold, not the reverse.
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(16, 16, |x, _y| {
            if x < 8 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        }));
        let params = TransformParams {
            blur: Some(3.0),
            threshold: Some(128),
            ..TransformParams::default()
        };
        let (engine_out, _) = apply(&img, &params).unwrap();

        let blurred = blur::gaussian(&img, 3.0);
        let expected = grayscale::binarize(&blurred, 128);
        assert_eq!(engine_out.to_luma8(), expected.to_luma8());

        // And it must differ from threshold-then-blur.
        let reversed = blur::gaussian(&grayscale::binarize(&img, 128), 3.0);
        assert_ne!(engine_out.to_luma8(), reversed.to_luma8());
    }

    #[test]
    fn grayscale_is_idempotent_across_invocations() {
        let params = TransformParams {
            grayscale: Some(true),
            ..TransformParams::default()
        };
        let (once, _) = apply(&gradient(), &params).unwrap();
        let (twice, _) = apply(&once, &params).unwrap();
        assert_eq!(once.to_luma8(), twice.to_luma8());
    }

    #[test]
    fn invalid_channel_aborts_whole_call() {
        let params = TransformParams {
            grayscale: Some(true),
            channel_split: Some("purple".to_owned()),
            ..TransformParams::default()
        };
        let err = apply(&gradient(), &params).unwrap_err();
        assert_eq!(err, EngineError::InvalidChannel("purple".to_owned()));
    }

    #[test]
    fn channel_split_accepts_mixed_case() {
        let params = TransformParams {
            channel_split: Some("Red".to_owned()),
            ..TransformParams::default()
        };
        let (out, applied) = apply(&gradient(), &params).unwrap();
        assert_eq!(applied.channel_split, Some(Channel::Red));
        for pixel in out.to_rgb8().pixels() {
            assert_eq!(pixel.0[1], 0);
            assert_eq!(pixel.0[2], 0);
        }
    }

    #[test]
    fn all_operations_compose_in_one_call() {
        let params = TransformParams {
            grayscale: Some(true),
            blur: Some(1.0),
            brightness: Some(1.1),
            contrast: Some(1.2),
            saturation: Some(0.5),
            threshold: Some(90),
            rotate: Some(45.0),
            flip_horizontal: Some(true),
            flip_vertical: Some(true),
            resize: Some(ResizeSpec::Pair(12.0, 10.0)),
            normalize: Some(true),
            histogram_equalization: Some(true),
            channel_split: Some("blue".to_owned()),
        };
        let (out, applied) = apply(&gradient(), &params).unwrap();
        assert_eq!(out.dimensions(), (12, 10));
        assert_eq!(applied.channel_split, Some(Channel::Blue));
        assert_eq!(applied.grayscale, Some(true));
        assert_eq!(applied.threshold, Some(90));
        assert_eq!(
            applied.resize,
            Some(ResizeTarget {
                width: 12,
                height: 10,
            }),
        );
    }

    #[test]
    fn white_image_survives_mid_threshold() {
        // 4x4 all-white through threshold 128: every pixel exceeds the
        // cutoff and stays white.
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));
        let params = TransformParams {
            threshold: Some(128),
            ..TransformParams::default()
        };
        let (out, _) = apply(&img, &params).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        for pixel in out.to_luma8().pixels() {
            assert_eq!(pixel.0[0], 255);
        }
    }
}
