// Generated LUT tables carry more digits than f32 holds
#![allow(clippy::excessive_precision)]

//! pixel-scalers: pixel-art scalers, downscalers and resamplers with
//! statically dispatched kernels.
//!
//! # Quick Start
//!
//! Hosts that learn the algorithm and pixel layout at runtime use
//! [`AnyScaler`]:
//!
//! ```
//! use pixel_scalers::color::{QualityMode, Rgba8};
//! use pixel_scalers::{AnyBitmap, AnyScaler, Bitmap};
//!
//! let source: AnyBitmap = Bitmap::filled(4, 4, Rgba8::opaque(10, 20, 30)).into();
//! let scaler = AnyScaler::from_name("lanczos3", "1.5").unwrap();
//! let output = scaler.run(&source, QualityMode::Accurate, None).unwrap();
//! assert_eq!(output.dimensions(), (6, 6));
//! ```
//!
//! Code that knows its types at compile time calls the algorithms directly
//! and gets a fully monomorphized kernel:
//!
//! ```
//! use pixel_scalers::color::{Gray8, LinearGrayPipeline};
//! use pixel_scalers::{resample, Bicubic, Bitmap, ScaleFactor};
//!
//! let source = Bitmap::filled(8, 8, Gray8(100));
//! let roles = LinearGrayPipeline::default();
//! let output = resample::<Bicubic, _, _>(ScaleFactor::new(0.5, 2.0).unwrap(), &roles, &source)
//!     .unwrap();
//! assert_eq!(output.dimensions(), (4, 16));
//! ```
//!
//! # Capabilities
//!
//! Every algorithm implements exactly one of three capability traits:
//!
//! - [`PixelScaler`]: fixed integer upscales that copy source pixels
//!   ([`NearestNeighbor`], [`ScaleNx`])
//! - [`Downscaler`]: fixed integer reductions ([`BoxDownscaler`])
//! - [`Resampler`]: continuous scales through a convolution kernel
//!   ([`Bilinear`], [`Bicubic`], [`Lanczos3`])
//!
//! The capability is fixed by the scaler's [`ScalerInfo::Class`], so an
//! algorithm cannot implement two.
//!
//! # Color Roles
//!
//! Kernels never touch stored bytes directly. A [`ColorRoles`](color::ColorRoles)
//! bundle decodes pixels into a working color for blending, projects working
//! colors into keys for equality tests, and encodes results back. The
//! shipped pipelines are listed in [`color`]; the linear ones blend in
//! linear light and are the default ([`QualityMode::Accurate`](color::QualityMode)).
//!
//! # Dispatch
//!
//! ```text
//!   AnyScaler::run(AnyBitmap, QualityMode, Option<PipelineKind>)
//!       |
//!       |  one match: algorithm x pipeline x pixel layout
//!       v
//!   S::scale_image::<LinearRgbaPipeline, Bitmap<Rgba8>>   (static from here down)
//!       |
//!       v
//!   Resampler::invoke_kernel(ResampleOp) -> ResampleOp::invoke::<CatmullRomKernel>
//! ```
//!
//! Runtime choices are resolved once per image. Per-pixel code is generic
//! over the kernel and the color roles and compiles to direct calls.
//!
//! # Concurrency
//!
//! Scalers split output rows across the rayon thread pool. Inputs are only
//! read, and every output row is written by exactly one worker, so results
//! do not depend on the number of threads.

pub mod algorithms;
pub mod bitmap;
pub mod color;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod orchestrator;
pub mod scaler;

mod dispatch;


pub use algorithms::{Bicubic, Bilinear, BoxDownscaler, Lanczos3, NearestNeighbor, ScaleNx};
pub use bitmap::{AnyBitmap, Bitmap, PixelBuffer};
pub use error::{ScaleError, ScaleResult};
pub use geometry::{ScaleComponent, ScaleFactor};
pub use orchestrator::{
    best_fit, list_algorithms, possible_targets, scale_to_fit, AlgorithmInfo, AnyScaler, FitCandidate,
    ScaleRange, TargetSet,
};
pub use scaler::{
    downscale, resample, upscale, Continuous, Discrete, Downscaler, FactorOf, PixelScaler,
    Reduction, Resampler, ScalerClass, ScalerInfo, ScalerKind,
};
