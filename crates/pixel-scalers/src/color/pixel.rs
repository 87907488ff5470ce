//! Storage, working and key color types.
//!
//! - [`Rgba8`] and [`Gray8`] are *storage* pixels: the bits a bitmap holds.
//! - [`Rgbaf`] (and plain `f32` for gray) is the *working* color: wide
//!   enough that repeated blending does not compound quantization error.
//! - [`PackedRgba`] (and `u8` for gray) is the *key* color: a cheap value
//!   used only for equality tests in pattern-matching scalers.

use std::ops::{Add, Mul};

/// A storage pixel layout.
///
/// `NAME` identifies the layout in binding errors and logs.
pub trait Pixel: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Short layout name, e.g. `"rgba8"`.
    const NAME: &'static str;
    /// Number of stored channels.
    const CHANNELS: usize;
}

/// An 8-bit-per-channel RGBA pixel with straight (unpremultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Pixel for Rgba8 {
    const NAME: &'static str = "rgba8";
    const CHANNELS: usize = 4;
}

/// An 8-bit gray pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Gray8(pub u8);

impl Pixel for Gray8 {
    const NAME: &'static str = "gray8";
    const CHANNELS: usize = 1;
}

/// Four-channel float working color.
///
/// Whether the channels hold linear light or encoded values depends on the
/// decoder that produced them; the type only carries the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgbaf {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgbaf {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Add for Rgbaf {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl Mul<f32> for Rgbaf {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

/// An [`Rgba8`] packed into one word, for equality comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedRgba(pub u32);

impl From<Rgba8> for PackedRgba {
    #[inline]
    fn from(pixel: Rgba8) -> Self {
        Self(u32::from_le_bytes(pixel.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_bytes() {
        let pixel = Rgba8::new(1, 2, 3, 4);
        assert_eq!(pixel.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Rgba8::from_bytes([1, 2, 3, 4]), pixel);
        assert_eq!(Rgba8::opaque(9, 8, 7).a, 255);
    }

    #[test]
    fn test_packed_key_distinguishes_channels() {
        let a = PackedRgba::from(Rgba8::new(1, 0, 0, 255));
        let b = PackedRgba::from(Rgba8::new(0, 1, 0, 255));
        let c = PackedRgba::from(Rgba8::new(1, 0, 0, 254));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, PackedRgba::from(Rgba8::new(1, 0, 0, 255)));
    }

    #[test]
    fn test_rgbaf_arithmetic() {
        let a = Rgbaf::new(0.25, 0.5, 0.75, 1.0);
        let sum = a + a * 2.0;
        assert_eq!(sum, Rgbaf::new(0.75, 1.5, 2.25, 3.0));
    }
}
