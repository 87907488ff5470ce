//! Separable two-pass convolution.
//!
//! [`ResampleOp`] is the [`ResampleKernelCallback`] every resampler runs
//! through. The horizontal pass filters each needed source row into an
//! intermediate buffer of working colors; the vertical pass filters those
//! rows into the output band. Both passes split work by row with rayon.

use std::ops::Range;

use rayon::prelude::*;

use super::{ResampleKernel, ResampleKernelCallback};
use crate::bitmap::{Bitmap, PixelBuffer};
use crate::color::ColorRoles;

/// Resample `source` to `width x height`, optionally rendering only a band
/// of output rows.
///
/// A band renders exactly the rows the full image would have in that
/// range, reading only the source rows those output rows touch.
pub struct ResampleOp<'a, R, B> {
    roles: &'a R,
    source: &'a B,
    width: u32,
    height: u32,
    rows: Option<Range<u32>>,
}

impl<'a, R, B> ResampleOp<'a, R, B>
where
    R: ColorRoles,
    B: PixelBuffer<Pixel = R::Pixel>,
{
    pub fn new(roles: &'a R, source: &'a B, width: u32, height: u32) -> Self {
        Self {
            roles,
            source,
            width,
            height,
            rows: None,
        }
    }

    /// Render only output rows in `rows`, clamped to the target height.
    pub fn rows(mut self, rows: Range<u32>) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Full target size, regardless of any row band.
    pub fn target_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn band(&self) -> Range<u32> {
        match &self.rows {
            Some(rows) => {
                let end = rows.end.min(self.height);
                rows.start.min(end)..end
            }
            None => 0..self.height,
        }
    }
}

/// Source span and normalized weights for one output sample.
#[derive(Debug, Clone)]
struct Contribution {
    start: i64,
    weights: Vec<f32>,
}

impl Contribution {
    fn end(&self) -> i64 {
        self.start + self.weights.len() as i64 - 1
    }
}

/// Per-output-sample weights along one axis.
///
/// Sample centers map as `(i + 0.5) / scale - 0.5`. When shrinking, the
/// kernel is stretched by `1 / scale` so every source pixel contributes.
fn contributions<R, K>(kernel: &K, src_len: u32, dst_len: u32) -> Vec<Contribution>
where
    R: ColorRoles,
    K: ResampleKernel<R>,
{
    let scale = dst_len as f64 / src_len as f64;
    let filter_scale = (1.0 / scale).max(1.0);
    let radius = kernel.support() as f64 * filter_scale;

    (0..dst_len)
        .map(|i| {
            let center = (i as f64 + 0.5) / scale - 0.5;
            let start = (center - radius).floor() as i64;
            let end = (center + radius).ceil() as i64;

            let mut weights: Vec<f32> = (start..=end)
                .map(|j| kernel.weight(((j as f64 - center) / filter_scale) as f32))
                .collect();

            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                for w in &mut weights {
                    *w /= sum;
                }
            } else {
                // Degenerate kernel window: take the nearest source sample
                weights.fill(0.0);
                let nearest = (center.round() as i64 - start).clamp(0, weights.len() as i64 - 1);
                weights[nearest as usize] = 1.0;
            }

            Contribution { start, weights }
        })
        .collect()
}

#[inline]
fn clamp_index(i: i64, len: u32) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

impl<R, B> ResampleKernelCallback<R> for ResampleOp<'_, R, B>
where
    R: ColorRoles,
    B: PixelBuffer<Pixel = R::Pixel>,
{
    type Output = Bitmap<R::Pixel>;

    fn invoke<K: ResampleKernel<R>>(self, kernel: K) -> Bitmap<R::Pixel> {
        let band = self.band();
        let band_height = band.end - band.start;
        let (src_w, src_h) = self.source.dimensions();

        if src_w == 0 || src_h == 0 || self.width == 0 || band_height == 0 {
            return Bitmap::new(self.width, band_height);
        }

        let roles = self.roles;
        let source = self.source;
        let dst_w = self.width as usize;

        let horizontal = contributions::<R, K>(&kernel, src_w, self.width);
        let vertical = contributions::<R, K>(&kernel, src_h, self.height);
        let vertical = &vertical[band.start as usize..band.end as usize];

        // Source rows the band reads
        let first = vertical.iter().map(|c| c.start).min().unwrap_or(0);
        let last = vertical.iter().map(Contribution::end).max().unwrap_or(0);
        let first = clamp_index(first, src_h);
        let last = clamp_index(last, src_h);

        let mut intermediate = vec![R::Work::default(); (last - first + 1) * dst_w];
        intermediate
            .par_chunks_mut(dst_w)
            .enumerate()
            .for_each(|(i, out)| {
                let y = (first + i) as u32;
                let decoded: Vec<R::Work> =
                    (0..src_w).map(|x| roles.decode(source.pixel(x, y))).collect();
                for (slot, c) in out.iter_mut().zip(&horizontal) {
                    let taps = (0..c.weights.len())
                        .map(|k| decoded[clamp_index(c.start + k as i64, src_w)]);
                    *slot = kernel.convolve(&c.weights, taps);
                }
            });

        let mut pixels = vec![R::Pixel::default(); band_height as usize * dst_w];
        pixels
            .par_chunks_mut(dst_w)
            .zip(vertical.par_iter())
            .for_each(|(out, c)| {
                for (x, slot) in out.iter_mut().enumerate() {
                    let taps = (0..c.weights.len()).map(|k| {
                        let sy = clamp_index(c.start + k as i64, src_h) - first;
                        intermediate[sy * dst_w + x]
                    });
                    *slot = roles.encode(kernel.convolve(&c.weights, taps));
                }
            });

        Bitmap::from_raw(self.width, band_height, pixels)
    }
}
