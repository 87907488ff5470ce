//! Scaler capability contracts.
//!
//! Every algorithm implements [`ScalerInfo`] plus exactly one capability:
//!
//! | Capability        | Class          | Factor  | Accepts                        |
//! |-------------------|----------------|---------|--------------------------------|
//! | [`PixelScaler`]   | [`Discrete`]   | `u32`   | a fixed table of scales        |
//! | [`Downscaler`]    | [`Reduction`]  | `u32`   | a fixed table of ratios        |
//! | [`Resampler`]     | [`Continuous`] | `f32`   | any scale in `[MIN, MAX]`      |
//!
//! Each capability requires a specific `ScalerInfo::Class`, and a type has
//! only one `Class`, so no algorithm can claim two capabilities.
//!
//! Construction goes through `with_scale` / `with_ratio`, which rejects
//! unsupported factors, so a constructed scaler is always valid. The free
//! functions [`upscale`], [`downscale`] and [`resample`] validate and run in
//! one step, failing before any pixel is read.

use std::fmt;

use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::ColorRoles;
use crate::error::{ScaleError, ScaleResult};
use crate::geometry::{ScaleComponent, ScaleFactor};
use crate::kernel::{ResampleKernel, ResampleKernelCallback, ResampleOp};

mod sealed {
    pub trait Sealed {}
}

/// Which capability a scaler implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalerKind {
    PixelScaler,
    Downscaler,
    Resampler,
}

impl ScalerKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalerKind::PixelScaler => "pixel-scaler",
            ScalerKind::Downscaler => "downscaler",
            ScalerKind::Resampler => "resampler",
        }
    }
}

impl fmt::Display for ScalerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-level scaler class. Sealed: the three classes below are the only ones.
pub trait ScalerClass: sealed::Sealed + 'static {
    /// Component type of this class's scale factor.
    type Factor: ScaleComponent;
    const KIND: ScalerKind;
}

/// Class of [`PixelScaler`]s: discrete integer upscales.
#[derive(Debug)]
pub enum Discrete {}

/// Class of [`Downscaler`]s: discrete integer reductions.
#[derive(Debug)]
pub enum Reduction {}

/// Class of [`Resampler`]s: continuous scales.
#[derive(Debug)]
pub enum Continuous {}

impl sealed::Sealed for Discrete {}
impl sealed::Sealed for Reduction {}
impl sealed::Sealed for Continuous {}

impl ScalerClass for Discrete {
    type Factor = u32;
    const KIND: ScalerKind = ScalerKind::PixelScaler;
}

impl ScalerClass for Reduction {
    type Factor = u32;
    const KIND: ScalerKind = ScalerKind::Downscaler;
}

impl ScalerClass for Continuous {
    type Factor = f32;
    const KIND: ScalerKind = ScalerKind::Resampler;
}

/// Scale factor type of scaler `S`.
pub type FactorOf<S> = ScaleFactor<<<S as ScalerInfo>::Class as ScalerClass>::Factor>;

/// Metadata common to all scalers.
pub trait ScalerInfo {
    type Class: ScalerClass;

    /// Stable identifier, used by hosts to select the algorithm.
    const NAME: &'static str;

    /// The factor this instance was configured with.
    fn scale(&self) -> FactorOf<Self>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn kind(&self) -> ScalerKind {
        <Self::Class as ScalerClass>::KIND
    }
}

/// Discrete upscaler with a fixed table of supported scales.
///
/// Pattern-matching scalers compare neighbors by [`ColorRoles::Key`] and
/// copy source pixels, so their output only contains source colors.
pub trait PixelScaler: ScalerInfo<Class = Discrete> + Sized {
    const SUPPORTED_SCALES: &'static [ScaleFactor<u32>];

    fn supports(scale: ScaleFactor<u32>) -> bool {
        Self::SUPPORTED_SCALES.contains(&scale)
    }

    fn ensure_supported(scale: ScaleFactor<u32>) -> ScaleResult<()> {
        if Self::supports(scale) {
            Ok(())
        } else {
            Err(ScaleError::UnsupportedScale {
                algorithm: Self::NAME,
                scale: scale.to_string(),
            })
        }
    }

    /// Output size for every supported scale, in table order.
    fn possible_targets(width: u32, height: u32) -> Vec<(u32, u32)> {
        Self::SUPPORTED_SCALES
            .iter()
            .map(|scale| scale.apply(width, height))
            .collect()
    }

    fn with_scale(scale: ScaleFactor<u32>) -> ScaleResult<Self>;

    /// Upscale `source` by the configured factor.
    fn scale_image<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>;
}

/// Discrete box reducer with a fixed table of supported ratios.
///
/// Output dimensions truncate: a trailing partial block is dropped.
pub trait Downscaler: ScalerInfo<Class = Reduction> + Sized {
    const SUPPORTED_RATIOS: &'static [ScaleFactor<u32>];

    fn ratio_x(&self) -> u32 {
        self.scale().x()
    }

    fn ratio_y(&self) -> u32 {
        self.scale().y()
    }

    fn supports(ratio: ScaleFactor<u32>) -> bool {
        Self::SUPPORTED_RATIOS.contains(&ratio)
    }

    fn ensure_supported(ratio: ScaleFactor<u32>) -> ScaleResult<()> {
        if Self::supports(ratio) {
            Ok(())
        } else {
            Err(ScaleError::UnsupportedRatio {
                algorithm: Self::NAME,
                ratio: ratio.to_string(),
            })
        }
    }

    /// Output size for every supported ratio, in table order.
    fn possible_targets(width: u32, height: u32) -> Vec<(u32, u32)> {
        Self::SUPPORTED_RATIOS
            .iter()
            .map(|ratio| (width / ratio.x(), height / ratio.y()))
            .collect()
    }

    fn with_ratio(ratio: ScaleFactor<u32>) -> ScaleResult<Self>;

    fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        (width / self.ratio_x(), height / self.ratio_y())
    }

    /// Reduce `source` by the configured ratio.
    fn downscale_image<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>;
}

/// Continuous resampler driven by a convolution kernel.
///
/// The kernel type is an associated type generic over the color roles, so
/// `invoke_kernel` hands callers a concrete kernel compiled for their
/// pipeline. See [`crate::kernel`] for the protocol.
pub trait Resampler: ScalerInfo<Class = Continuous> + Sized {
    const MIN_SCALE: f32;
    const MAX_SCALE: f32;

    type Kernel<R: ColorRoles>: ResampleKernel<R>;

    fn scale_x(&self) -> f32 {
        self.scale().x()
    }

    fn scale_y(&self) -> f32 {
        self.scale().y()
    }

    fn supports(scale: ScaleFactor<f32>) -> bool {
        let range = Self::MIN_SCALE..=Self::MAX_SCALE;
        range.contains(&scale.x()) && range.contains(&scale.y())
    }

    fn ensure_supported(scale: ScaleFactor<f32>) -> ScaleResult<()> {
        if Self::supports(scale) {
            Ok(())
        } else {
            Err(ScaleError::UnsupportedScale {
                algorithm: Self::NAME,
                scale: scale.to_string(),
            })
        }
    }

    fn with_scale(scale: ScaleFactor<f32>) -> ScaleResult<Self>;

    /// The concrete kernel for roles `R`.
    fn kernel<R: ColorRoles>(&self) -> Self::Kernel<R>;

    /// Run `callback` exactly once with this resampler's kernel and return
    /// its result unchanged.
    fn invoke_kernel<R, C>(&self, callback: C) -> C::Output
    where
        R: ColorRoles,
        C: ResampleKernelCallback<R>,
    {
        callback.invoke(self.kernel::<R>())
    }

    /// Resample `source` by the configured scale.
    fn resample_image<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        let (width, height) = self.scale().apply(source.width(), source.height());
        self.invoke_kernel::<R, _>(ResampleOp::new(roles, source, width, height))
    }
}

/// Upscale with pixel scaler `S`, rejecting unsupported scales up front.
///
/// ```
/// use pixel_scalers::color::{Gray8, UnormGrayPipeline};
/// use pixel_scalers::{upscale, Bitmap, ScaleError, ScaleFactor, ScaleNx};
///
/// let source = Bitmap::filled(2, 2, Gray8(7));
/// let roles = UnormGrayPipeline::default();
///
/// let out = upscale::<ScaleNx, _, _>(ScaleFactor::integer(3, 3), &roles, &source).unwrap();
/// assert_eq!(out.dimensions(), (6, 6));
///
/// let err = upscale::<ScaleNx, _, _>(ScaleFactor::integer(5, 5), &roles, &source);
/// assert!(matches!(err, Err(ScaleError::UnsupportedScale { .. })));
/// ```
pub fn upscale<S, R, B>(scale: ScaleFactor<u32>, roles: &R, source: &B) -> ScaleResult<Bitmap<R::Pixel>>
where
    S: PixelScaler,
    R: ColorRoles,
    B: PixelBuffer<Pixel = R::Pixel>,
{
    let scaler = S::with_scale(scale)?;
    Ok(scaler.scale_image(roles, source))
}

/// Downscale with `S`, rejecting unsupported ratios up front.
pub fn downscale<S, R, B>(ratio: ScaleFactor<u32>, roles: &R, source: &B) -> ScaleResult<Bitmap<R::Pixel>>
where
    S: Downscaler,
    R: ColorRoles,
    B: PixelBuffer<Pixel = R::Pixel>,
{
    let scaler = S::with_ratio(ratio)?;
    Ok(scaler.downscale_image(roles, source))
}

/// Resample with `S`, rejecting out-of-range scales up front.
pub fn resample<S, R, B>(scale: ScaleFactor<f32>, roles: &R, source: &B) -> ScaleResult<Bitmap<R::Pixel>>
where
    S: Resampler,
    R: ColorRoles,
    B: PixelBuffer<Pixel = R::Pixel>,
{
    let scaler = S::with_scale(scale)?;
    Ok(scaler.resample_image(roles, source))
}
