//! Kernel dispatch protocol.
//!
//! A [`Resampler`](crate::Resampler) knows its concrete kernel type at the
//! type level. Callers that want to run a generic operation against that
//! kernel wrap the operation in a [`ResampleKernelCallback`] and hand it to
//! [`Resampler::invoke_kernel`](crate::Resampler::invoke_kernel), which
//! calls [`ResampleKernelCallback::invoke`] exactly once with the concrete
//! kernel:
//!
//! ```text
//!   caller                 resampler                 callback
//!     |  invoke_kernel(cb)     |                          |
//!     |----------------------->|  cb.invoke(Kernel)       |
//!     |                        |------------------------->|  monomorphized
//!     |                        |                          |  for Kernel + R
//!     |<--------------------------------------------------|  (no vtables)
//! ```
//!
//! Selecting *which* resampler to run is the only runtime decision; inside
//! the callback every kernel and color-role call is statically resolved and
//! inlinable. The callback is taken by value, so it cannot run twice and
//! cannot outlive the call; whatever it returns (including an `Err`) comes
//! back to the caller unchanged.
//!
//! # Example
//!
//! ```
//! use pixel_scalers::color::{ColorRoles, LinearRgbaPipeline};
//! use pixel_scalers::kernel::{ResampleKernel, ResampleKernelCallback};
//! use pixel_scalers::{Bicubic, Resampler, ScaleFactor};
//!
//! /// Reports the tap count of whichever kernel it is given.
//! struct Taps;
//!
//! impl<R: ColorRoles> ResampleKernelCallback<R> for Taps {
//!     type Output = usize;
//!
//!     fn invoke<K: ResampleKernel<R>>(self, _kernel: K) -> usize {
//!         K::TAPS
//!     }
//! }
//!
//! let bicubic = Bicubic::with_scale(ScaleFactor::uniform(2.0).unwrap()).unwrap();
//! let taps = bicubic.invoke_kernel::<LinearRgbaPipeline, _>(Taps);
//! assert_eq!(taps, 4);
//! ```

mod engine;
mod filters;

pub use engine::ResampleOp;
pub use filters::{CatmullRomKernel, Lanczos3Kernel, TriangleKernel};

use crate::color::{ColorRoles, WorkColor};

/// A continuous resampling kernel, compiled against one set of color roles.
///
/// `R` fixes the working color the kernel accumulates in; an operation
/// that binds a kernel to roles it cannot blend is rejected by the
/// compiler, never at the first pixel.
pub trait ResampleKernel<R: ColorRoles>: Copy + Send + Sync {
    /// Source taps per output sample at unit scale (`2 * support`).
    const TAPS: usize;

    /// Kernel radius in source pixels at unit scale.
    fn support(&self) -> f32;

    /// Kernel weight at distance `t` from the sample center.
    fn weight(&self, t: f32) -> f32;

    /// Weighted sum of `samples`, the inner loop of every pass.
    #[inline]
    fn convolve<I>(&self, weights: &[f32], samples: I) -> R::Work
    where
        I: Iterator<Item = R::Work>,
    {
        weights
            .iter()
            .zip(samples)
            .fold(R::Work::default(), |acc, (&w, sample)| {
                acc.add_weighted(sample, w)
            })
    }
}

/// An operation generic over the concrete kernel it runs with.
pub trait ResampleKernelCallback<R: ColorRoles> {
    type Output;

    /// Run the operation with the resampler's concrete kernel.
    fn invoke<K: ResampleKernel<R>>(self, kernel: K) -> Self::Output;
}
