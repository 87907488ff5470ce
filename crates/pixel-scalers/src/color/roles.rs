//! Color pipeline roles.
//!
//! Every transform touches four color representations and three
//! conversions between them:
//!
//! ```text
//!             Decode                Project
//!   Pixel  ----------->   Work   ----------->  Key
//!  (stored)            (blending)            (equality)
//!     ^                    |
//!     +--------------------+
//!             Encode
//! ```
//!
//! The roles are plain generic traits, so a kernel instantiated for one
//! pipeline is compiled for exactly that pipeline: no role call goes
//! through a vtable. [`ColorPipeline`] bundles one implementation of each
//! role and checks, at construction, that they agree on the `Pixel`,
//! `Work` and `Key` types. A mismatched set does not compile.

use std::marker::PhantomData;
use std::ops::{Add, Mul};

use super::pixel::{Pixel, Rgbaf};

/// A working color: supports the weighted accumulation blending needs.
pub trait WorkColor:
    Copy + Default + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync + 'static
{
    /// `self + other * weight`
    #[inline]
    fn add_weighted(self, other: Self, weight: f32) -> Self {
        self + other * weight
    }
}

impl WorkColor for Rgbaf {}
impl WorkColor for f32 {}

/// Storage to working color.
pub trait Decode<P, W>: Send + Sync {
    fn decode(&self, pixel: P) -> W;
}

/// Working color to comparison key.
///
/// Implementations must be pure: the same input always yields the same
/// key, independent of call order, so pattern matches are deterministic.
pub trait Project<W, K>: Send + Sync {
    fn project(&self, work: &W) -> K;
}

/// Working color back to storage.
pub trait Encode<W, P>: Send + Sync {
    fn encode(&self, work: W) -> P;
}

/// A consistent set of color roles.
///
/// Kernels and scalers are generic over `R: ColorRoles`; the associated
/// types pin down all six role types at once.
pub trait ColorRoles: Send + Sync {
    type Work: WorkColor;
    type Key: Copy + Eq + Send + Sync;
    type Pixel: Pixel;
    type Decode: Decode<Self::Pixel, Self::Work>;
    type Project: Project<Self::Work, Self::Key>;
    type Encode: Encode<Self::Work, Self::Pixel>;

    /// Pipeline name for logs.
    fn name(&self) -> &'static str;

    fn decoder(&self) -> &Self::Decode;
    fn projector(&self) -> &Self::Project;
    fn encoder(&self) -> &Self::Encode;

    #[inline]
    fn decode(&self, pixel: Self::Pixel) -> Self::Work {
        self.decoder().decode(pixel)
    }

    /// Key of a stored pixel: `project(decode(pixel))`.
    #[inline]
    fn key(&self, pixel: Self::Pixel) -> Self::Key {
        self.projector().project(&self.decode(pixel))
    }

    #[inline]
    fn encode(&self, work: Self::Work) -> Self::Pixel {
        self.encoder().encode(work)
    }
}

/// A color pipeline built from six role types.
///
/// `W`, `K` and `P` are the working, key and pixel types; `D`, `Pr` and `E`
/// the decode, project and encode implementations. The bounds on
/// [`ColorPipeline::new`] reject incompatible combinations at compile time.
///
/// # Example
///
/// ```
/// use pixel_scalers::color::{
///     ColorPipeline, ColorRoles, PackEncoded, PackedRgba, Rgba8, Rgbaf, Unorm8,
/// };
///
/// let pipeline: ColorPipeline<Rgbaf, PackedRgba, Rgba8, _, _, _> =
///     ColorPipeline::new(Unorm8, PackEncoded(Unorm8), Unorm8);
/// let work = pipeline.decode(Rgba8::opaque(255, 0, 0));
/// assert_eq!(work.r, 1.0);
/// ```
pub struct ColorPipeline<W, K, P, D, Pr, E> {
    name: &'static str,
    decode: D,
    project: Pr,
    encode: E,
    _roles: PhantomData<fn() -> (W, K, P)>,
}

impl<W, K, P, D, Pr, E> ColorPipeline<W, K, P, D, Pr, E>
where
    W: WorkColor,
    K: Copy + Eq + Send + Sync,
    P: Pixel,
    D: Decode<P, W>,
    Pr: Project<W, K>,
    E: Encode<W, P>,
{
    pub fn new(decode: D, project: Pr, encode: E) -> Self {
        Self {
            name: "custom",
            decode,
            project,
            encode,
            _roles: PhantomData,
        }
    }

    /// Set the name reported by [`ColorRoles::name`].
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<W, K, P, D, Pr, E> ColorRoles for ColorPipeline<W, K, P, D, Pr, E>
where
    W: WorkColor,
    K: Copy + Eq + Send + Sync,
    P: Pixel,
    D: Decode<P, W>,
    Pr: Project<W, K>,
    E: Encode<W, P>,
{
    type Work = W;
    type Key = K;
    type Pixel = P;
    type Decode = D;
    type Project = Pr;
    type Encode = E;

    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn decoder(&self) -> &D {
        &self.decode
    }

    #[inline]
    fn projector(&self) -> &Pr {
        &self.project
    }

    #[inline]
    fn encoder(&self) -> &E {
        &self.encode
    }
}

impl<W, K, P, D: Clone, Pr: Clone, E: Clone> Clone for ColorPipeline<W, K, P, D, Pr, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            decode: self.decode.clone(),
            project: self.project.clone(),
            encode: self.encode.clone(),
            _roles: PhantomData,
        }
    }
}

impl<W, K, P, D, Pr, E> std::fmt::Debug for ColorPipeline<W, K, P, D, Pr, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPipeline")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Gray8, Unorm8};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Identity decode that counts calls, to check `key` goes through decode.
    struct CountingDecode(AtomicUsize);

    impl Decode<Gray8, f32> for CountingDecode {
        fn decode(&self, pixel: Gray8) -> f32 {
            self.0.fetch_add(1, Ordering::Relaxed);
            pixel.0 as f32
        }
    }

    struct Threshold;

    impl Project<f32, bool> for Threshold {
        fn project(&self, work: &f32) -> bool {
            *work >= 128.0
        }
    }

    struct Truncate;

    impl Encode<f32, Gray8> for Truncate {
        fn encode(&self, work: f32) -> Gray8 {
            Gray8(work.clamp(0.0, 255.0) as u8)
        }
    }

    #[test]
    fn test_custom_roles_compose() {
        let pipeline: ColorPipeline<f32, bool, Gray8, _, _, _> =
            ColorPipeline::new(CountingDecode(AtomicUsize::new(0)), Threshold, Truncate)
                .named("threshold");

        assert_eq!(pipeline.name(), "threshold");
        assert!(pipeline.key(Gray8(200)));
        assert!(!pipeline.key(Gray8(20)));
        assert_eq!(pipeline.encode(pipeline.decode(Gray8(77))), Gray8(77));
        assert_eq!(pipeline.decoder().0.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_projection_is_order_independent() {
        let pipeline: ColorPipeline<f32, u8, Gray8, _, _, _> = ColorPipeline::new(
            Unorm8,
            crate::color::QuantizeGray(Unorm8),
            Unorm8,
        );
        let forward: Vec<u8> = (0..=255u8).map(|v| pipeline.key(Gray8(v))).collect();
        let mut backward: Vec<u8> = (0..=255u8).rev().map(|v| pipeline.key(Gray8(v))).collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_add_weighted() {
        let acc = 1.0f32.add_weighted(3.0, 0.5);
        assert_eq!(acc, 2.5);
        let acc = Rgbaf::default().add_weighted(Rgbaf::new(1.0, 2.0, 3.0, 4.0), 0.25);
        assert_eq!(acc, Rgbaf::new(0.25, 0.5, 0.75, 1.0));
    }
}
