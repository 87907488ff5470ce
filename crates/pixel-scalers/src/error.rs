//! Error type for the pixel-scalers public API.
//!
//! Every failure this crate reports is detected before any pixel is read:
//! scale factors, supported-set membership and color role bindings are all
//! validated up front, so a returned error never comes with partial output.

use thiserror::Error;

/// Errors reported by scalers, the orchestrator and pipeline binding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// A scale factor component was zero, negative, NaN or infinite, or a
    /// textual factor could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested factor is not in the algorithm's supported set, or
    /// lies outside a resampler's declared range.
    #[error("Unsupported scale {scale} for {algorithm}")]
    UnsupportedScale {
        algorithm: &'static str,
        scale: String,
    },

    /// The requested reduction ratio is not in the downscaler's supported set.
    #[error("Unsupported ratio {ratio} for {algorithm}")]
    UnsupportedRatio {
        algorithm: &'static str,
        ratio: String,
    },

    /// A color pipeline was bound to a bitmap whose pixel layout it does
    /// not decode.
    #[error("Incompatible role types: pipeline {pipeline} cannot bind {pixel} pixels")]
    IncompatibleRoleTypes {
        pipeline: &'static str,
        pixel: &'static str,
    },

    /// No algorithm is registered under this name.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A pixel vector does not hold `width * height` pixels.
    #[error("Pixel buffer holds {len} pixels, expected {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Result type for scaling operations
pub type ScaleResult<T> = Result<T, ScaleError>;
