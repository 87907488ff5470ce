//! Shipped scaling algorithms.
//!
//! | Algorithm           | Capability    | Factors                      |
//! |---------------------|---------------|------------------------------|
//! | [`NearestNeighbor`] | pixel scaler  | 1x to 8x                     |
//! | [`ScaleNx`]         | pixel scaler  | 2x, 3x, 4x                   |
//! | [`BoxDownscaler`]   | downscaler    | 2x2, 3x3, 4x4, 8x8, 2x1, 1x2 |
//! | [`Bilinear`]        | resampler     | 1/16 to 16                   |
//! | [`Bicubic`]         | resampler     | 1/16 to 16                   |
//! | [`Lanczos3`]        | resampler     | 1/32 to 32                   |

mod box_downscale;
mod nearest;
mod resamplers;
mod scale_nx;

pub use box_downscale::BoxDownscaler;
pub use nearest::NearestNeighbor;
pub use resamplers::{Bicubic, Bilinear, Lanczos3};
pub use scale_nx::ScaleNx;
