//! Integer box-filter reduction.

use rayon::prelude::*;

use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::{ColorRoles, WorkColor};
use crate::error::ScaleResult;
use crate::geometry::ScaleFactor;
use crate::scaler::{Downscaler, Reduction, ScalerInfo};

/// Averages each `rx x ry` block of source pixels into one output pixel.
///
/// Averaging happens in the pipeline's working color, so the linear
/// pipelines average light rather than encoded values. A trailing partial
/// block on the right or bottom edge is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxDownscaler {
    ratio: ScaleFactor<u32>,
}

impl ScalerInfo for BoxDownscaler {
    type Class = Reduction;
    const NAME: &'static str = "box";

    fn scale(&self) -> ScaleFactor<u32> {
        self.ratio
    }
}

impl Downscaler for BoxDownscaler {
    const SUPPORTED_RATIOS: &'static [ScaleFactor<u32>] = &[
        ScaleFactor::integer(2, 2),
        ScaleFactor::integer(3, 3),
        ScaleFactor::integer(4, 4),
        ScaleFactor::integer(8, 8),
        ScaleFactor::integer(2, 1),
        ScaleFactor::integer(1, 2),
    ];

    fn with_ratio(ratio: ScaleFactor<u32>) -> ScaleResult<Self> {
        Self::ensure_supported(ratio)?;
        Ok(Self { ratio })
    }

    fn downscale_image<R, B>(&self, roles: &R, source: &B) -> Bitmap<R::Pixel>
    where
        R: ColorRoles,
        B: PixelBuffer<Pixel = R::Pixel>,
    {
        let (width, height) = self.target_size(source.width(), source.height());
        if width == 0 || height == 0 {
            return Bitmap::new(width, height);
        }

        let (rx, ry) = (self.ratio_x(), self.ratio_y());
        let norm = 1.0 / (rx * ry) as f32;

        let mut pixels = vec![R::Pixel::default(); width as usize * height as usize];
        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(oy, row)| {
                let y0 = oy as u32 * ry;
                for (ox, slot) in row.iter_mut().enumerate() {
                    let x0 = ox as u32 * rx;
                    let mut acc = R::Work::default();
                    for y in y0..y0 + ry {
                        for x in x0..x0 + rx {
                            acc = acc.add_weighted(roles.decode(source.pixel(x, y)), norm);
                        }
                    }
                    *slot = roles.encode(acc);
                }
            });

        Bitmap::from_raw(width, height, pixels)
    }
}
