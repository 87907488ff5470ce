//! Reference kernel weight functions.
//!
//! All three kernels interpolate: weights are 1 at `t = 0` and 0 at every
//! other integer `t`, so resampling at unit scale reproduces the source.

use std::f32::consts::PI;

use super::ResampleKernel;
use crate::color::ColorRoles;

/// Triangle (tent) kernel: bilinear interpolation.
///
/// ```text
///   1 |    /\
///     |   /  \
///   0 +--/----\--
///       -1  0  1
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangleKernel;

impl<R: ColorRoles> ResampleKernel<R> for TriangleKernel {
    const TAPS: usize = 2;

    #[inline]
    fn support(&self) -> f32 {
        1.0
    }

    #[inline]
    fn weight(&self, t: f32) -> f32 {
        (1.0 - t.abs()).max(0.0)
    }
}

/// Catmull-Rom cubic (Keys, `a = -0.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatmullRomKernel;

impl<R: ColorRoles> ResampleKernel<R> for CatmullRomKernel {
    const TAPS: usize = 4;

    #[inline]
    fn support(&self) -> f32 {
        2.0
    }

    #[inline]
    fn weight(&self, t: f32) -> f32 {
        let t = t.abs();
        if t < 1.0 {
            (1.5 * t - 2.5) * t * t + 1.0
        } else if t < 2.0 {
            ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
        } else {
            0.0
        }
    }
}

/// Lanczos windowed sinc with three lobes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lanczos3Kernel;

#[inline]
fn sinc(x: f32) -> f32 {
    if x.abs() < 1e-6 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

impl<R: ColorRoles> ResampleKernel<R> for Lanczos3Kernel {
    const TAPS: usize = 6;

    #[inline]
    fn support(&self) -> f32 {
        3.0
    }

    #[inline]
    fn weight(&self, t: f32) -> f32 {
        if t.abs() < 3.0 {
            sinc(t) * sinc(t / 3.0)
        } else {
            0.0
        }
    }
}
