//! Scale2x / Scale3x / Scale4x edge-directed pixel-art scaling.
//!
//! The classic AdvMAME rules: each source pixel `E` and its neighbors
//!
//! ```text
//!   A B C
//!   D E F
//!   G H I
//! ```
//!
//! expand into a 2x2 or 3x3 block whose cells copy `E` or one of its
//! neighbors, chosen by comparing neighbors for equality. Scale4x is
//! Scale2x applied twice.
//!
//! Equality is decided on the pipeline's [`Key`](crate::color::ColorRoles::Key)
//! rather than on stored bytes, so a pipeline can treat near-identical
//! colors as equal. Output cells are always copies of source pixels.
//! Pixels beyond the edge repeat the nearest edge pixel.

use rayon::prelude::*;

use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::ColorRoles;
use crate::error::{ScaleError, ScaleResult};
use crate::geometry::ScaleFactor;
use crate::scaler::{Discrete, PixelScaler, ScalerInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Scale2x,
    Scale3x,
    Scale4x,
}

/// Scale2x, Scale3x or Scale4x, selected by the configured scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleNx {
    scale: ScaleFactor<u32>,
    variant: Variant,
}

impl ScalerInfo for ScaleNx {
    type Class = Discrete;
    const NAME: &'static str = "scalenx";

    fn scale(&self) -> ScaleFactor<u32> {
        self.scale
    }
}

impl PixelScaler for ScaleNx {
    const SUPPORTED_SCALES: &'static [ScaleFactor<u32>] = &[
        ScaleFactor::integer(2, 2),
        ScaleFactor::integer(3, 3),
        ScaleFactor::integer(4, 4),
    ];

    fn with_scale(scale: ScaleFactor<u32>) -> ScaleResult<Self> {
        Self::ensure_supported(scale)?;
        let variant = match scale.x() {
            2 => Variant::Scale2x,
            3 => Variant::Scale3x,
            4 => Variant::Scale4x,
            _ => {
                return Err(ScaleError::UnsupportedScale {
                    algorithm: Self::NAME,
                    scale: scale.to_string(),
                })
            }
        };
        Ok(Self { scale, variant })
    }

    fn scale_image<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        let (width, height) = self.scale.apply(source.width(), source.height());
        if width == 0 || height == 0 {
            return Bitmap::new(width, height);
        }

        let grid = Grid::from_source(roles, source);
        let scaled = match self.variant {
            Variant::Scale2x => grid.scale2x(),
            Variant::Scale3x => grid.scale3x(),
            Variant::Scale4x => grid.scale2x().scale2x(),
        };

        let pixels = scaled.cells.into_iter().map(|t| t.pixel).collect();
        Bitmap::from_raw(width, height, pixels)
    }
}

/// A stored pixel together with its comparison key.
#[derive(Debug, Clone, Copy)]
struct Texel<P, K> {
    pixel: P,
    key: K,
}

impl<P, K: PartialEq> PartialEq for Texel<P, K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

struct Grid<P, K> {
    cells: Vec<Texel<P, K>>,
    width: usize,
    height: usize,
}

impl<P, K> Grid<P, K>
where
    P: Copy + Send + Sync,
    K: Copy + Eq + Send + Sync,
{
    /// Decode and project every source pixel once.
    fn from_source<R, B>(roles: &R, source: &B) -> Self
    where
        R: ColorRoles<Pixel = P, Key = K>,
        B: PixelBuffer<Pixel = P>,
    {
        let (width, height) = source.dimensions();
        let cells = (0..height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..width).map(move |x| {
                    let pixel = source.pixel(x, y);
                    Texel {
                        pixel,
                        key: roles.key(pixel),
                    }
                })
            })
            .collect();
        Self {
            cells,
            width: width as usize,
            height: height as usize,
        }
    }

    /// Cell at `(x + dx, y + dy)`, clamped to the grid.
    #[inline]
    fn at(&self, x: usize, y: usize, dx: isize, dy: isize) -> Texel<P, K> {
        let nx = x.saturating_add_signed(dx).min(self.width - 1);
        let ny = y.saturating_add_signed(dy).min(self.height - 1);
        self.cells[ny * self.width + nx]
    }

    fn scale2x(&self) -> Self {
        let out_w = self.width * 2;
        let mut cells = vec![self.cells[0]; out_w * self.height * 2];

        cells
            .par_chunks_mut(out_w * 2)
            .enumerate()
            .for_each(|(y, rows)| {
                let (top, bottom) = rows.split_at_mut(out_w);
                for x in 0..self.width {
                    let b = self.at(x, y, 0, -1);
                    let d = self.at(x, y, -1, 0);
                    let e = self.at(x, y, 0, 0);
                    let f = self.at(x, y, 1, 0);
                    let h = self.at(x, y, 0, 1);

                    let (e0, e1, e2, e3) = if b != h && d != f {
                        (
                            if d == b { d } else { e },
                            if b == f { f } else { e },
                            if d == h { d } else { e },
                            if h == f { f } else { e },
                        )
                    } else {
                        (e, e, e, e)
                    };

                    top[2 * x] = e0;
                    top[2 * x + 1] = e1;
                    bottom[2 * x] = e2;
                    bottom[2 * x + 1] = e3;
                }
            });

        Self {
            cells,
            width: out_w,
            height: self.height * 2,
        }
    }

    fn scale3x(&self) -> Self {
        let out_w = self.width * 3;
        let mut cells = vec![self.cells[0]; out_w * self.height * 3];

        cells
            .par_chunks_mut(out_w * 3)
            .enumerate()
            .for_each(|(y, rows)| {
                let (r0, rest) = rows.split_at_mut(out_w);
                let (r1, r2) = rest.split_at_mut(out_w);
                for x in 0..self.width {
                    let a = self.at(x, y, -1, -1);
                    let b = self.at(x, y, 0, -1);
                    let c = self.at(x, y, 1, -1);
                    let d = self.at(x, y, -1, 0);
                    let e = self.at(x, y, 0, 0);
                    let f = self.at(x, y, 1, 0);
                    let g = self.at(x, y, -1, 1);
                    let h = self.at(x, y, 0, 1);
                    let i = self.at(x, y, 1, 1);

                    let block = if b != h && d != f {
                        [
                            if d == b { d } else { e },
                            if (d == b && e != c) || (b == f && e != a) { b } else { e },
                            if b == f { f } else { e },
                            if (d == b && e != g) || (d == h && e != a) { d } else { e },
                            e,
                            if (b == f && e != i) || (h == f && e != c) { f } else { e },
                            if d == h { d } else { e },
                            if (d == h && e != i) || (h == f && e != g) { h } else { e },
                            if h == f { f } else { e },
                        ]
                    } else {
                        [e; 9]
                    };

                    r0[3 * x..3 * x + 3].copy_from_slice(&block[0..3]);
                    r1[3 * x..3 * x + 3].copy_from_slice(&block[3..6]);
                    r2[3 * x..3 * x + 3].copy_from_slice(&block[6..9]);
                }
            });

        Self {
            cells,
            width: out_w,
            height: self.height * 3,
        }
    }
}
