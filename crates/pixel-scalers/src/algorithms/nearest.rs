//! Nearest-neighbor pixel replication.

use rayon::prelude::*;

use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::ColorRoles;
use crate::error::ScaleResult;
use crate::geometry::ScaleFactor;
use crate::scaler::{Discrete, PixelScaler, ScalerInfo};

/// Replicates every source pixel into an `n x n` block.
///
/// Supports uniform integer scales from 1x to 8x. Never blends, so the
/// color roles are not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbor {
    scale: ScaleFactor<u32>,
}

impl ScalerInfo for NearestNeighbor {
    type Class = Discrete;
    const NAME: &'static str = "nearest";

    fn scale(&self) -> ScaleFactor<u32> {
        self.scale
    }
}

impl PixelScaler for NearestNeighbor {
    const SUPPORTED_SCALES: &'static [ScaleFactor<u32>] = &[
        ScaleFactor::integer(1, 1),
        ScaleFactor::integer(2, 2),
        ScaleFactor::integer(3, 3),
        ScaleFactor::integer(4, 4),
        ScaleFactor::integer(5, 5),
        ScaleFactor::integer(6, 6),
        ScaleFactor::integer(7, 7),
        ScaleFactor::integer(8, 8),
    ];

    fn with_scale(scale: ScaleFactor<u32>) -> ScaleResult<Self> {
        Self::ensure_supported(scale)?;
        Ok(Self { scale })
    }

    fn scale_image<R, B>(&self, _roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        let (width, height) = self.scale.apply(source.width(), source.height());
        if width == 0 || height == 0 {
            return Bitmap::new(width, height);
        }

        let (sx, sy) = (self.scale.x(), self.scale.y());
        let mut pixels = vec![R::Pixel::default(); width as usize * height as usize];
        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let src_y = y as u32 / sy;
                for (x, slot) in row.iter_mut().enumerate() {
                    *slot = source.pixel(x as u32 / sx, src_y);
                }
            });

        Bitmap::from_raw(width, height, pixels)
    }
}
