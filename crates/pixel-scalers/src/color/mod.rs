//! Color types and pipeline roles
//!
//! This module separates the three jobs a color value does during scaling:
//!
//! - **Pixel**: what a bitmap stores ([`Rgba8`], [`Gray8`]). Use for I/O.
//! - **Work**: what blending math runs on ([`Rgbaf`], `f32`).
//! - **Key**: what pattern matching compares ([`PackedRgba`], `u8`).
//!
//! [`Decode`], [`Project`] and [`Encode`] convert between them, and
//! [`ColorRoles`] ties one implementation of each into a pipeline that
//! kernels are compiled against.
//!
//! # Example
//!
//! ```
//! use pixel_scalers::color::{ColorRoles, LinearRgbaPipeline, Rgba8};
//!
//! let pipeline = LinearRgbaPipeline::default();
//!
//! // Decode to linear light for blending
//! let work = pipeline.decode(Rgba8::opaque(128, 64, 32));
//!
//! // Encode back for storage
//! assert_eq!(pipeline.encode(work), Rgba8::opaque(128, 64, 32));
//! ```

mod lut;
mod pipelines;
mod pixel;
mod roles;

pub use pipelines::{
    LinearGrayPipeline, LinearRgbaPipeline, LinearToSrgb, PackEncoded, PipelineKind, QualityMode,
    QuantizeGray, SrgbToLinear, Unorm8, UnormGrayPipeline, UnormRgbaPipeline,
};
pub use pixel::{Gray8, PackedRgba, Pixel, Rgba8, Rgbaf};
pub use roles::{ColorPipeline, ColorRoles, Decode, Encode, Project, WorkColor};
