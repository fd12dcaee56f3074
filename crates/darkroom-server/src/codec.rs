//! Wire codecs for pixel payloads.
//!
//! Uploads arrive as raw raster bytes in any format the `image` crate
//! can sniff; responses carry a single canonical encoding — lossless
//! PNG wrapped in a self-describing `data:` URI — so clients never
//! have to guess at plain binary.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};

use crate::error::ApiError;

/// Prefix of every encoded image payload.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Decode uploaded bytes into an image.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the buffer is empty or not a
/// recognizable raster format.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::Decode("uploaded file is empty".to_owned()));
    }
    image::load_from_memory(bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Encode an image as a PNG data URI.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if PNG encoding fails (it cannot for
/// the pixel formats the engine produces, but the encoder's contract
/// is fallible).
pub fn encode_data_uri(image: &DynamicImage) -> Result<String, ApiError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|err| ApiError::Internal(format!("failed to encode image: {err}")))?;
    Ok(format!(
        "{DATA_URI_PREFIX}{}",
        STANDARD.encode(buf.into_inner()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 200, 30])))
    }

    #[test]
    fn empty_upload_is_a_decode_error() {
        assert!(matches!(decode(&[]), Err(ApiError::Decode(_))));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(matches!(decode(&[0xDE, 0xAD, 0xBE, 0xEF]), Err(ApiError::Decode(_))));
    }

    #[test]
    fn encoded_payload_is_a_png_data_uri() {
        let uri = encode_data_uri(&sample()).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));
    }

    #[test]
    fn encode_then_decode_preserves_pixels() {
        let uri = encode_data_uri(&sample()).unwrap();
        let b64 = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.to_rgb8(), sample().to_rgb8());
    }

    #[test]
    fn grayscale_images_encode_too() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(2, 2, image::Luma([7])));
        assert!(encode_data_uri(&gray).is_ok());
    }
}
