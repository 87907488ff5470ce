//! sRGB transfer curve lookups.
//!
//! Both tables are generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode a stored 8-bit sRGB value to linear light.
///
/// Exact: one table entry per storage value.
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Convert a linear value (0.0..=1.0) to sRGB using LUT with linear interpolation.
///
/// Out-of-range input is clamped; blending with negative-lobe kernels
/// routinely overshoots by a small amount.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = if linear.is_nan() {
        0.0
    } else {
        linear.clamp(0.0, 1.0)
    };

    let scaled = linear * 4095.0;
    let index = scaled as usize;

    if index >= 4095 {
        return LINEAR_TO_SRGB[4095];
    }

    let frac = scaled - index as f32;
    let a = LINEAR_TO_SRGB[index];
    let b = LINEAR_TO_SRGB[index + 1];
    a + (b - a) * frac
}

/// Quantize a unit-range value to a byte, rounding to nearest.
#[inline]
pub fn unit_to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(srgb8_to_linear(0), 0.0);
        assert!((srgb8_to_linear(255) - 1.0).abs() < 1e-6);
        assert!((linear_to_srgb(0.0) - 0.0).abs() < 1e-6);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_byte_round_trip_is_exact() {
        for i in 0..=255u8 {
            let back = unit_to_u8(linear_to_srgb(srgb8_to_linear(i)));
            assert_eq!(back, i, "round trip drifted for {i}");
        }
    }

    #[test]
    fn test_monotonicity() {
        let mut prev = srgb8_to_linear(0);
        for i in 1..=255u8 {
            let curr = srgb8_to_linear(i);
            assert!(curr > prev, "srgb8_to_linear not monotonic at {i}");
            prev = curr;
        }

        let mut prev = linear_to_srgb(0.0);
        for i in 1..=1000 {
            let curr = linear_to_srgb(i as f32 / 1000.0);
            assert!(curr >= prev, "linear_to_srgb not monotonic at {i}");
            prev = curr;
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(linear_to_srgb(-0.2), 0.0);
        assert!((linear_to_srgb(1.3) - 1.0).abs() < 1e-6);
        assert_eq!(linear_to_srgb(f32::NAN), 0.0);
        assert_eq!(unit_to_u8(-1.0), 0);
        assert_eq!(unit_to_u8(2.0), 255);
    }
}
