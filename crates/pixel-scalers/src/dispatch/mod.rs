//! Runtime-to-static binding.
//!
//! Hosts hold an [`AnyBitmap`] and a [`PipelineKind`] chosen at runtime.
//! [`ScalerDispatch::apply`] checks the pair is compatible, then enters a
//! fully monomorphized call for the concrete pipeline and pixel type. This
//! is the only place runtime selection happens; everything below it is
//! static.
//!
//! The module is private. Hosts go through [`AnyScaler`](crate::AnyScaler).

use tracing::debug;

use crate::algorithms::{Bicubic, Bilinear, BoxDownscaler, Lanczos3, NearestNeighbor, ScaleNx};
use crate::bitmap::{AnyBitmap, Bitmap, PixelBuffer};
use crate::color::{
    ColorRoles, LinearGrayPipeline, LinearRgbaPipeline, PipelineKind, QualityMode,
    UnormGrayPipeline, UnormRgbaPipeline,
};
use crate::error::{ScaleError, ScaleResult};
use crate::scaler::{Downscaler, PixelScaler, Resampler, ScalerInfo};

/// Uniform entry point implemented by every shipped scaler.
pub trait ScalerDispatch {
    /// Scale `source`, using `pipeline` or the default for `quality`.
    fn apply(
        &self,
        source: &AnyBitmap,
        quality: QualityMode,
        pipeline: Option<PipelineKind>,
    ) -> ScaleResult<AnyBitmap>;
}

/// A scaling operation generic over the bound color roles.
trait BoundOp {
    fn run<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>;
}

struct Upscale<'a, S>(&'a S);
struct Reduce<'a, S>(&'a S);
struct Resample<'a, S>(&'a S);

impl<S: PixelScaler> BoundOp for Upscale<'_, S> {
    fn run<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        self.0.scale_image(roles, source)
    }
}

impl<S: Downscaler> BoundOp for Reduce<'_, S> {
    fn run<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        self.0.downscale_image(roles, source)
    }
}

impl<S: Resampler> BoundOp for Resample<'_, S> {
    fn run<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        self.0.resample_image(roles, source)
    }
}

/// Pipeline to use for `source`: the explicit choice, else the quality default.
pub(crate) fn resolve_pipeline(
    source: &AnyBitmap,
    quality: QualityMode,
    pipeline: Option<PipelineKind>,
) -> PipelineKind {
    pipeline.unwrap_or_else(|| PipelineKind::for_quality(quality, source.pixel_name()))
}

/// Bind `kind` to the bitmap's pixel type and run `op`.
///
/// A pipeline whose pixel layout differs from the bitmap's fails here,
/// before any pixel is read.
fn run_bound<O: BoundOp>(op: &O, source: &AnyBitmap, kind: PipelineKind) -> ScaleResult<AnyBitmap> {
    match (kind, source) {
        (PipelineKind::LinearRgba, AnyBitmap::Rgba8(bitmap)) => {
            Ok(op.run(&LinearRgbaPipeline::default(), bitmap).into())
        }
        (PipelineKind::UnormRgba, AnyBitmap::Rgba8(bitmap)) => {
            Ok(op.run(&UnormRgbaPipeline::default(), bitmap).into())
        }
        (PipelineKind::LinearGray, AnyBitmap::Gray8(bitmap)) => {
            Ok(op.run(&LinearGrayPipeline::default(), bitmap).into())
        }
        (PipelineKind::UnormGray, AnyBitmap::Gray8(bitmap)) => {
            Ok(op.run(&UnormGrayPipeline::default(), bitmap).into())
        }
        _ => Err(ScaleError::IncompatibleRoleTypes {
            pipeline: kind.name(),
            pixel: source.pixel_name(),
        }),
    }
}

macro_rules! dispatch_via {
    ($op:ident: $($scaler:ty),+ $(,)?) => {
        $(
            impl ScalerDispatch for $scaler {
                fn apply(
                    &self,
                    source: &AnyBitmap,
                    quality: QualityMode,
                    pipeline: Option<PipelineKind>,
                ) -> ScaleResult<AnyBitmap> {
                    let kind = resolve_pipeline(source, quality, pipeline);
                    debug!(
                        algorithm = self.name(),
                        scale = %self.scale(),
                        pipeline = kind.name(),
                        width = source.width(),
                        height = source.height(),
                        "Dispatching scaler"
                    );
                    run_bound(&$op(self), source, kind)
                }
            }
        )+
    };
}

dispatch_via!(Upscale: NearestNeighbor, ScaleNx);
dispatch_via!(Reduce: BoxDownscaler);
dispatch_via!(Resample: Bilinear, Bicubic, Lanczos3);
