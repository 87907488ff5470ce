//! Shipped role implementations and the pipelines built from them.
//!
//! | Pipeline | Pixel | Work | Blending space |
//! |----------|-------|------|----------------|
//! | [`LinearRgbaPipeline`] | [`Rgba8`] | [`Rgbaf`] | linear light |
//! | [`UnormRgbaPipeline`] | [`Rgba8`] | [`Rgbaf`] | encoded values |
//! | [`LinearGrayPipeline`] | [`Gray8`] | `f32` | linear light |
//! | [`UnormGrayPipeline`] | [`Gray8`] | `f32` | encoded values |
//!
//! Alpha is always straight and always linear; only color channels go
//! through the gamma tables.

use std::fmt;
use std::str::FromStr;

use super::lut::{linear_to_srgb, srgb8_to_linear, unit_to_u8};
use super::pixel::{Gray8, PackedRgba, Pixel, Rgba8, Rgbaf};
use super::roles::{ColorPipeline, Decode, Encode, Project};
use crate::error::ScaleError;

/// Plain unit-range normalization: `byte / 255` and back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unorm8;

impl Decode<Rgba8, Rgbaf> for Unorm8 {
    #[inline]
    fn decode(&self, p: Rgba8) -> Rgbaf {
        Rgbaf::new(
            p.r as f32 / 255.0,
            p.g as f32 / 255.0,
            p.b as f32 / 255.0,
            p.a as f32 / 255.0,
        )
    }
}

impl Encode<Rgbaf, Rgba8> for Unorm8 {
    #[inline]
    fn encode(&self, w: Rgbaf) -> Rgba8 {
        Rgba8::new(
            unit_to_u8(w.r),
            unit_to_u8(w.g),
            unit_to_u8(w.b),
            unit_to_u8(w.a),
        )
    }
}

impl Decode<Gray8, f32> for Unorm8 {
    #[inline]
    fn decode(&self, p: Gray8) -> f32 {
        p.0 as f32 / 255.0
    }
}

impl Encode<f32, Gray8> for Unorm8 {
    #[inline]
    fn encode(&self, w: f32) -> Gray8 {
        Gray8(unit_to_u8(w))
    }
}

/// sRGB gamma decode to linear light (IEC 61966-2-1, table driven).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SrgbToLinear;

impl Decode<Rgba8, Rgbaf> for SrgbToLinear {
    #[inline]
    fn decode(&self, p: Rgba8) -> Rgbaf {
        Rgbaf::new(
            srgb8_to_linear(p.r),
            srgb8_to_linear(p.g),
            srgb8_to_linear(p.b),
            p.a as f32 / 255.0,
        )
    }
}

impl Decode<Gray8, f32> for SrgbToLinear {
    #[inline]
    fn decode(&self, p: Gray8) -> f32 {
        srgb8_to_linear(p.0)
    }
}

/// Linear light back to 8-bit sRGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearToSrgb;

impl Encode<Rgbaf, Rgba8> for LinearToSrgb {
    #[inline]
    fn encode(&self, w: Rgbaf) -> Rgba8 {
        Rgba8::new(
            unit_to_u8(linear_to_srgb(w.r)),
            unit_to_u8(linear_to_srgb(w.g)),
            unit_to_u8(linear_to_srgb(w.b)),
            unit_to_u8(w.a),
        )
    }
}

impl Encode<f32, Gray8> for LinearToSrgb {
    #[inline]
    fn encode(&self, w: f32) -> Gray8 {
        Gray8(unit_to_u8(linear_to_srgb(w)))
    }
}

/// Key = the storage pixel the wrapped encoder would write, packed.
///
/// Two working colors compare equal exactly when they would be stored as
/// the same bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackEncoded<E>(pub E);

impl<E: Encode<Rgbaf, Rgba8>> Project<Rgbaf, PackedRgba> for PackEncoded<E> {
    #[inline]
    fn project(&self, work: &Rgbaf) -> PackedRgba {
        PackedRgba::from(self.0.encode(*work))
    }
}

/// Gray key: the stored byte the wrapped encoder would write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantizeGray<E>(pub E);

impl<E: Encode<f32, Gray8>> Project<f32, u8> for QuantizeGray<E> {
    #[inline]
    fn project(&self, work: &f32) -> u8 {
        self.0.encode(*work).0
    }
}

/// RGBA blended in linear light.
pub type LinearRgbaPipeline =
    ColorPipeline<Rgbaf, PackedRgba, Rgba8, SrgbToLinear, PackEncoded<LinearToSrgb>, LinearToSrgb>;

/// RGBA blended on encoded values.
pub type UnormRgbaPipeline =
    ColorPipeline<Rgbaf, PackedRgba, Rgba8, Unorm8, PackEncoded<Unorm8>, Unorm8>;

/// Gray blended in linear light.
pub type LinearGrayPipeline =
    ColorPipeline<f32, u8, Gray8, SrgbToLinear, QuantizeGray<LinearToSrgb>, LinearToSrgb>;

/// Gray blended on encoded values.
pub type UnormGrayPipeline = ColorPipeline<f32, u8, Gray8, Unorm8, QuantizeGray<Unorm8>, Unorm8>;

impl Default for LinearRgbaPipeline {
    fn default() -> Self {
        Self::new(SrgbToLinear, PackEncoded(LinearToSrgb), LinearToSrgb)
            .named(PipelineKind::LinearRgba.name())
    }
}

impl Default for UnormRgbaPipeline {
    fn default() -> Self {
        Self::new(Unorm8, PackEncoded(Unorm8), Unorm8).named(PipelineKind::UnormRgba.name())
    }
}

impl Default for LinearGrayPipeline {
    fn default() -> Self {
        Self::new(SrgbToLinear, QuantizeGray(LinearToSrgb), LinearToSrgb)
            .named(PipelineKind::LinearGray.name())
    }
}

impl Default for UnormGrayPipeline {
    fn default() -> Self {
        Self::new(Unorm8, QuantizeGray(Unorm8), Unorm8).named(PipelineKind::UnormGray.name())
    }
}

/// Speed/quality tradeoff for color blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityMode {
    /// Blend encoded values directly. Cheaper, darkens mixed edges.
    Fast,
    /// Blend in linear light.
    #[default]
    Accurate,
}

impl QualityMode {
    pub fn name(self) -> &'static str {
        match self {
            QualityMode::Fast => "fast",
            QualityMode::Accurate => "accurate",
        }
    }
}

impl fmt::Display for QualityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QualityMode {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(QualityMode::Fast),
            "accurate" => Ok(QualityMode::Accurate),
            other => Err(ScaleError::InvalidArgument(format!(
                "unknown quality mode '{other}' (expected fast or accurate)"
            ))),
        }
    }
}

/// Runtime name for one of the shipped pipelines.
///
/// Hosts pick a pipeline from configuration; binding it to a bitmap checks
/// the pixel layout before any pixel work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    LinearRgba,
    UnormRgba,
    LinearGray,
    UnormGray,
}

impl PipelineKind {
    pub const ALL: [PipelineKind; 4] = [
        PipelineKind::LinearRgba,
        PipelineKind::UnormRgba,
        PipelineKind::LinearGray,
        PipelineKind::UnormGray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PipelineKind::LinearRgba => "linear-rgba",
            PipelineKind::UnormRgba => "unorm-rgba",
            PipelineKind::LinearGray => "linear-gray",
            PipelineKind::UnormGray => "unorm-gray",
        }
    }

    /// Name of the storage layout this pipeline decodes.
    pub fn pixel_name(self) -> &'static str {
        match self {
            PipelineKind::LinearRgba | PipelineKind::UnormRgba => Rgba8::NAME,
            PipelineKind::LinearGray | PipelineKind::UnormGray => Gray8::NAME,
        }
    }

    /// Default pipeline for a quality mode and storage layout.
    pub fn for_quality(mode: QualityMode, pixel_name: &str) -> Self {
        let gray = pixel_name == Gray8::NAME;
        match (mode, gray) {
            (QualityMode::Accurate, false) => PipelineKind::LinearRgba,
            (QualityMode::Fast, false) => PipelineKind::UnormRgba,
            (QualityMode::Accurate, true) => PipelineKind::LinearGray,
            (QualityMode::Fast, true) => PipelineKind::UnormGray,
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineKind {
    type Err = ScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PipelineKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScaleError::InvalidArgument(format!("unknown pipeline '{s}'")))
    }
}
