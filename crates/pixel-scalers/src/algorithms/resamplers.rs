//! Convolution resamplers.
//!
//! Each resampler only pairs a kernel with a supported scale range; the
//! convolution itself lives in [`ResampleOp`](crate::kernel::ResampleOp).

use crate::color::ColorRoles;
use crate::error::ScaleResult;
use crate::geometry::ScaleFactor;
use crate::kernel::{CatmullRomKernel, Lanczos3Kernel, TriangleKernel};
use crate::scaler::{Continuous, Resampler, ScalerInfo};

macro_rules! resampler {
    (
        $(#[$meta:meta])*
        $name:ident, $id:literal, $kernel:ident, $min:expr, $max:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            scale: ScaleFactor<f32>,
        }

        impl ScalerInfo for $name {
            type Class = Continuous;
            const NAME: &'static str = $id;

            fn scale(&self) -> ScaleFactor<f32> {
                self.scale
            }
        }

        impl Resampler for $name {
            const MIN_SCALE: f32 = $min;
            const MAX_SCALE: f32 = $max;

            type Kernel<R: ColorRoles> = $kernel;

            fn with_scale(scale: ScaleFactor<f32>) -> ScaleResult<Self> {
                Self::ensure_supported(scale)?;
                Ok(Self { scale })
            }

            #[inline]
            fn kernel<R: ColorRoles>(&self) -> $kernel {
                $kernel
            }
        }
    };
}

resampler!(
    /// Bilinear interpolation (triangle kernel), scales 1/16x to 16x.
    Bilinear, "bilinear", TriangleKernel, 1.0 / 16.0, 16.0
);

resampler!(
    /// Bicubic interpolation (Catmull-Rom kernel), scales 1/16x to 16x.
    Bicubic, "bicubic", CatmullRomKernel, 1.0 / 16.0, 16.0
);

resampler!(
    /// Lanczos-3 windowed sinc, scales 1/32x to 32x.
    Lanczos3, "lanczos3", Lanczos3Kernel, 1.0 / 32.0, 32.0
);
