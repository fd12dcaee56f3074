//! Transformation parameter sets and their normalized echo form.
//!
//! A [`TransformParams`] is the client-supplied request: one explicitly
//! optional field per catalog operation, where presence of a field means
//! "apply this operation". The engine walks the fields in its fixed
//! catalog order (see [`crate::apply`]), never in request order.
//!
//! An [`AppliedParams`] is the normalized record the engine echoes back:
//! exactly the operations that ran, with arguments coerced to canonical
//! form (e.g. resize dimensions as integers even when floats were sent).
//! This is the value stored in an image's commit history.

use serde::{Deserialize, Serialize};

/// Errors produced by the transformation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `channel_split` named something other than red, green, or blue.
    #[error("invalid channel for channel_split: {0:?}")]
    InvalidChannel(String),
}

/// One color plane of an RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Parse a channel name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidChannel`] for any name outside
    /// red/green/blue.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            _ => Err(EngineError::InvalidChannel(name.to_owned())),
        }
    }

    /// Index of this channel within an RGB pixel.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Requested resize target, accepted as either a `[width, height]` pair
/// or a `{"width": w, "height": h}` object. Values may be floats; they
/// are truncated to integers when applied.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResizeSpec {
    /// `[width, height]` positional form.
    Pair(f64, f64),
    /// `{"width": ..., "height": ...}` named form.
    Dims {
        /// Target width in pixels.
        width: f64,
        /// Target height in pixels.
        height: f64,
    },
}

impl ResizeSpec {
    /// Canonical integer dimensions: floats truncate, negatives clamp
    /// to zero (zero-dimension targets fail at the resample primitive).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_target(self) -> ResizeTarget {
        let (width, height) = match self {
            Self::Pair(w, h) => (w, h),
            Self::Dims { width, height } => (width, height),
        };
        ResizeTarget {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        }
    }
}

/// Normalized resize dimensions, as echoed in [`AppliedParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeTarget {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The client-supplied parameter set for one engine invocation.
///
/// Every field is independently optional; any subset of the catalog,
/// including all thirteen operations, may be requested in one call.
/// Boolean operations are applied only when the value is `true` —
/// an explicit `false` is equivalent to omitting the field.
///
/// Numeric arguments are deliberately not range-validated here beyond
/// what the underlying primitives enforce; only `channel_split` is
/// checked, because an unknown channel name has no sensible fallback.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransformParams {
    /// Convert to single-channel luminance.
    pub grayscale: Option<bool>,
    /// Gaussian blur radius (sigma); non-positive values are a no-op.
    pub blur: Option<f32>,
    /// Linear intensity scale: 1.0 unchanged, 0 black, >1 brighter.
    pub brightness: Option<f32>,
    /// Linear scale around mid-gray (128): 1.0 unchanged.
    pub contrast: Option<f32>,
    /// Color blend toward luminance: 0 grayscale, 1.0 unchanged.
    pub saturation: Option<f32>,
    /// Binarization cutoff; pixel > threshold becomes white, else black.
    pub threshold: Option<i64>,
    /// Rotation in degrees, positive counter-clockwise, canvas expanded.
    pub rotate: Option<f32>,
    /// Mirror left-right.
    pub flip_horizontal: Option<bool>,
    /// Mirror top-bottom.
    pub flip_vertical: Option<bool>,
    /// Exact-dimension Lanczos resample.
    pub resize: Option<ResizeSpec>,
    /// Per-channel linear stretch of observed [min, max] to [0, 255].
    pub normalize: Option<bool>,
    /// Independent per-channel histogram equalization (RGB).
    pub histogram_equalization: Option<bool>,
    /// Keep one channel of an RGB image, zeroing the other two.
    pub channel_split: Option<String>,
}

/// The normalized record of the operations an engine run applied.
///
/// Fields absent from the request (or boolean fields sent as `false`)
/// stay `None` and are omitted from serialized output, so the record
/// lists exactly what ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedParams {
    /// Grayscale conversion ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<bool>,
    /// Blur radius as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
    /// Brightness factor as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
    /// Contrast factor as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f32>,
    /// Saturation factor as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f32>,
    /// Threshold cutoff as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    /// Rotation degrees as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f32>,
    /// Horizontal mirror ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_horizontal: Option<bool>,
    /// Vertical mirror ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flip_vertical: Option<bool>,
    /// Integer resize dimensions as applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize: Option<ResizeTarget>,
    /// Normalization ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalize: Option<bool>,
    /// Histogram equalization ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram_equalization: Option<bool>,
    /// Channel kept by the split, lowercased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_split: Option<Channel>,
}
