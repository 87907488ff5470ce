//! Pixel storage boundary.
//!
//! Scalers read pixels through [`PixelBuffer`], so any container that can
//! hand out a pixel at `(x, y)` plugs in. [`Bitmap`] is the row-major
//! container the scalers write their output into, and [`AnyBitmap`] tags
//! a bitmap with its layout for hosts that only learn the layout at runtime
//! (for example, from a decoded PNG header).

use crate::color::{Gray8, Pixel, Rgba8};
use crate::error::{ScaleError, ScaleResult};

/// Read access to a 2D grid of pixels.
///
/// `Sync` is required because scalers read the source from several
/// worker threads at once.
pub trait PixelBuffer: Sync {
    type Pixel: Pixel;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Pixel at `(x, y)`. Callers guarantee `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Self::Pixel;

    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Pixel at `(x, y)` with coordinates clamped to the edge.
    ///
    /// The buffer must not be empty.
    #[inline]
    fn pixel_clamped(&self, x: i64, y: i64) -> Self::Pixel {
        let x = x.clamp(0, self.width() as i64 - 1) as u32;
        let y = y.clamp(0, self.height() as i64 - 1) as u32;
        self.pixel(x, y)
    }
}

/// A row-major, tightly packed bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Pixel> Bitmap<P> {
    /// Bitmap filled with `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }

    /// Bitmap filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> ScaleResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(ScaleError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Scaler output, where the length is correct by construction.
    pub(crate) fn from_raw(width: u32, height: u32, pixels: Vec<P>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> P) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<P> {
        self.pixels
    }

    /// One row of pixels.
    #[inline]
    pub fn row(&self, y: u32) -> &[P] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let start = y as usize * self.width as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: P) {
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = pixel;
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl<P: Pixel> PixelBuffer for Bitmap<P> {
    type Pixel = P;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> P {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// A bitmap whose pixel layout is known only at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBitmap {
    Rgba8(Bitmap<Rgba8>),
    Gray8(Bitmap<Gray8>),
}

impl AnyBitmap {
    pub fn width(&self) -> u32 {
        match self {
            AnyBitmap::Rgba8(b) => b.width(),
            AnyBitmap::Gray8(b) => b.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            AnyBitmap::Rgba8(b) => b.height(),
            AnyBitmap::Gray8(b) => b.height(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Storage layout name, matching [`Pixel::NAME`].
    pub fn pixel_name(&self) -> &'static str {
        match self {
            AnyBitmap::Rgba8(_) => Rgba8::NAME,
            AnyBitmap::Gray8(_) => Gray8::NAME,
        }
    }
}

impl From<Bitmap<Rgba8>> for AnyBitmap {
    fn from(bitmap: Bitmap<Rgba8>) -> Self {
        AnyBitmap::Rgba8(bitmap)
    }
}

impl From<Bitmap<Gray8>> for AnyBitmap {
    fn from(bitmap: Bitmap<Gray8>) -> Self {
        AnyBitmap::Gray8(bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_length() {
        let result = Bitmap::from_pixels(3, 2, vec![Gray8(0); 5]);
        assert_eq!(
            result,
            Err(ScaleError::DimensionMismatch {
                width: 3,
                height: 2,
                len: 5
            })
        );
        assert!(Bitmap::from_pixels(3, 2, vec![Gray8(0); 6]).is_ok());
    }

    #[test]
    fn test_row_major_layout() {
        let bitmap = Bitmap::from_fn(3, 2, |x, y| Gray8((y * 10 + x) as u8));
        assert_eq!(bitmap.row(1), &[Gray8(10), Gray8(11), Gray8(12)]);
        assert_eq!(bitmap.pixel(2, 0), Gray8(2));
    }

    #[test]
    fn test_set_pixel_and_row_mut() {
        let mut bitmap = Bitmap::<Gray8>::new(2, 2);
        bitmap.set_pixel(1, 1, Gray8(9));
        bitmap.row_mut(0)[0] = Gray8(4);
        assert_eq!(bitmap.pixels(), &[Gray8(4), Gray8(0), Gray8(0), Gray8(9)]);
    }

    #[test]
    fn test_pixel_clamped() {
        let bitmap = Bitmap::from_fn(2, 2, |x, y| Gray8((y * 2 + x) as u8));
        assert_eq!(bitmap.pixel_clamped(-5, -1), Gray8(0));
        assert_eq!(bitmap.pixel_clamped(7, 0), Gray8(1));
        assert_eq!(bitmap.pixel_clamped(1, 9), Gray8(3));
    }

    #[test]
    fn test_zero_sized_bitmap() {
        let bitmap = Bitmap::<Rgba8>::new(0, 5);
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.dimensions(), (0, 5));
    }

    #[test]
    fn test_any_bitmap_layout_name() {
        let rgba: AnyBitmap = Bitmap::<Rgba8>::new(1, 1).into();
        let gray: AnyBitmap = Bitmap::<Gray8>::new(4, 2).into();
        assert_eq!(rgba.pixel_name(), "rgba8");
        assert_eq!(gray.pixel_name(), "gray8");
        assert_eq!(gray.dimensions(), (4, 2));
    }
}
