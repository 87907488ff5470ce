//! Scale factor geometry.
//!
//! [`ScaleFactor`] is a pure value type: an `(x, y)` ratio pair that maps
//! source dimensions to target dimensions. Discrete scalers and downscalers
//! use `u32` components, resamplers use `f32` components.
//!
//! # Rounding
//!
//! Integer factors are exact. Float factors round each product **half-up**
//! (`floor(dim * factor + 0.5)`, computed in `f64`), so `1.5x` maps a width
//! of 3 to 5 and a width of 1 to 2.
//!
//! # Text Form
//!
//! The display form is `"{x}x"` for uniform factors and `"{x}x{y}"`
//! otherwise. It is used in logs and algorithm identifiers and parses back
//! through [`FromStr`].

use std::fmt;
use std::str::FromStr;

use crate::error::{ScaleError, ScaleResult};

/// A numeric type usable as a [`ScaleFactor`] component.
pub trait ScaleComponent:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Whether the value is strictly positive (and finite).
    fn is_valid(self) -> bool;

    /// Scale a single dimension by this component.
    fn scale_dimension(self, dim: u32) -> u32;

    /// Parse one component from text.
    fn parse_component(text: &str) -> Option<Self>;
}

impl ScaleComponent for u32 {
    #[inline]
    fn is_valid(self) -> bool {
        self > 0
    }

    #[inline]
    fn scale_dimension(self, dim: u32) -> u32 {
        dim.saturating_mul(self)
    }

    fn parse_component(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl ScaleComponent for f32 {
    #[inline]
    fn is_valid(self) -> bool {
        self.is_finite() && self > 0.0
    }

    #[inline]
    fn scale_dimension(self, dim: u32) -> u32 {
        let scaled = (dim as f64 * self as f64 + 0.5).floor();
        if scaled >= u32::MAX as f64 {
            u32::MAX
        } else {
            scaled as u32
        }
    }

    fn parse_component(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

/// An immutable `(x, y)` scale ratio.
///
/// Both components are strictly positive; the constructors reject anything
/// else with [`ScaleError::InvalidArgument`].
///
/// # Example
///
/// ```
/// use pixel_scalers::ScaleFactor;
///
/// let factor = ScaleFactor::new(3u32, 2).unwrap();
/// assert_eq!(factor.apply(10, 20), (30, 40));
/// assert_eq!(factor.to_string(), "3x2");
///
/// let uniform = ScaleFactor::uniform(2u32).unwrap();
/// assert_eq!(uniform.to_string(), "2x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleFactor<T> {
    x: T,
    y: T,
}

impl<T: ScaleComponent> ScaleFactor<T> {
    /// Create a scale factor, rejecting non-positive components.
    pub fn new(x: T, y: T) -> ScaleResult<Self> {
        if !x.is_valid() || !y.is_valid() {
            return Err(ScaleError::InvalidArgument(format!(
                "scale factor components must be positive, got ({x}, {y})"
            )));
        }
        Ok(Self { x, y })
    }

    /// Create a scale factor with the same ratio on both axes.
    pub fn uniform(s: T) -> ScaleResult<Self> {
        Self::new(s, s)
    }

    /// Horizontal component.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    /// Vertical component.
    #[inline]
    pub fn y(&self) -> T {
        self.y
    }

    /// Whether both axes share the same ratio.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.x == self.y
    }

    /// Map source dimensions to target dimensions.
    ///
    /// Zero source dimensions are legal and map to zero.
    #[inline]
    pub fn apply(&self, width: u32, height: u32) -> (u32, u32) {
        (
            self.x.scale_dimension(width),
            self.y.scale_dimension(height),
        )
    }
}

impl ScaleFactor<u32> {
    /// Const constructor for static supported-scale tables.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a const context) if either component is 0.
    pub const fn integer(x: u32, y: u32) -> Self {
        assert!(x > 0 && y > 0, "scale factor components must be positive");
        Self { x, y }
    }
}

impl<T: ScaleComponent> fmt::Display for ScaleFactor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_uniform() {
            write!(f, "{}x", self.x)
        } else {
            write!(f, "{}x{}", self.x, self.y)
        }
    }
}

impl<T: ScaleComponent> FromStr for ScaleFactor<T> {
    type Err = ScaleError;

    /// Parse the display form: `"2x"`, `"3x2"`, `"1.5x"`, or a bare `"2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            T::parse_component(part.trim()).ok_or_else(|| {
                ScaleError::InvalidArgument(format!("malformed scale factor '{s}'"))
            })
        };

        match s.split_once(['x', 'X']) {
            Some((x, "")) => Self::uniform(parse(x)?),
            Some((x, y)) => Self::new(parse(x)?, parse(y)?),
            None => Self::uniform(parse(s)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_apply_is_exact() {
        for x in 1..=6u32 {
            for y in 1..=6u32 {
                let factor = ScaleFactor::new(x, y).unwrap();
                for (w, h) in [(0, 0), (1, 1), (7, 3), (640, 480)] {
                    assert_eq!(factor.apply(w, h), (w * x, h * y), "{factor} on {w}x{h}");
                }
            }
        }
    }

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(ScaleFactor::uniform(2u32).unwrap().apply(16, 16), (32, 32));
        assert_eq!(ScaleFactor::new(3u32, 2).unwrap().apply(10, 20), (30, 40));
    }

    #[test]
    fn test_zero_source_yields_zero() {
        let factor = ScaleFactor::uniform(4u32).unwrap();
        assert_eq!(factor.apply(0, 0), (0, 0));
        let factor = ScaleFactor::uniform(1.5f32).unwrap();
        assert_eq!(factor.apply(0, 9), (0, 14));
    }

    #[test]
    fn test_display_form() {
        assert_eq!(ScaleFactor::uniform(2u32).unwrap().to_string(), "2x");
        assert_eq!(ScaleFactor::new(2u32, 3).unwrap().to_string(), "2x3");
        assert_eq!(ScaleFactor::uniform(1.5f32).unwrap().to_string(), "1.5x");
        assert_eq!(ScaleFactor::new(0.5f32, 2.0).unwrap().to_string(), "0.5x2");
    }

    #[test]
    fn test_uniform_equals_pair() {
        for s in 1..=16u32 {
            assert_eq!(
                ScaleFactor::uniform(s).unwrap(),
                ScaleFactor::new(s, s).unwrap()
            );
        }
    }

    #[test]
    fn test_non_positive_components_rejected() {
        for (x, y) in [(0u32, 1u32), (1, 0), (0, 0)] {
            assert!(matches!(
                ScaleFactor::new(x, y),
                Err(ScaleError::InvalidArgument(_))
            ));
        }
        for (x, y) in [
            (0.0f32, 1.0f32),
            (1.0, -0.5),
            (-2.0, -2.0),
            (f32::NAN, 1.0),
            (1.0, f32::INFINITY),
        ] {
            assert!(matches!(
                ScaleFactor::new(x, y),
                Err(ScaleError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_float_rounding_is_half_up() {
        let factor = ScaleFactor::uniform(1.5f32).unwrap();
        assert_eq!(factor.apply(3, 1), (5, 2));
        let factor = ScaleFactor::uniform(0.5f32).unwrap();
        // 2.5 -> 3, 0.5 -> 1, 1.0 -> 1
        assert_eq!(factor.apply(5, 1), (3, 1));
        assert_eq!(factor.apply(2, 2), (1, 1));
        let factor = ScaleFactor::uniform(0.25f32).unwrap();
        // 0.25 -> 0, 0.75 -> 1
        assert_eq!(factor.apply(1, 3), (0, 1));
    }

    #[test]
    fn test_integer_apply_saturates() {
        let factor = ScaleFactor::uniform(4u32).unwrap();
        assert_eq!(factor.apply(u32::MAX, 1), (u32::MAX, 4));
    }

    #[test]
    fn test_parse_display_form() {
        let f: ScaleFactor<u32> = "2x".parse().unwrap();
        assert_eq!(f, ScaleFactor::uniform(2).unwrap());
        let f: ScaleFactor<u32> = "3x2".parse().unwrap();
        assert_eq!(f, ScaleFactor::new(3, 2).unwrap());
        let f: ScaleFactor<u32> = " 4 ".parse().unwrap();
        assert_eq!(f, ScaleFactor::uniform(4).unwrap());
        let f: ScaleFactor<f32> = "1.5x".parse().unwrap();
        assert_eq!(f, ScaleFactor::uniform(1.5).unwrap());
        let f: ScaleFactor<f32> = "0.5X0.25".parse().unwrap();
        assert_eq!(f, ScaleFactor::new(0.5, 0.25).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for text in ["", "x", "2y", "0x", "2x0", "-1x", "axb", "2x3x4"] {
            let result: ScaleResult<ScaleFactor<u32>> = text.parse();
            assert!(
                matches!(result, Err(ScaleError::InvalidArgument(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_parse_agree() {
        for (x, y) in [(1u32, 1u32), (2, 3), (8, 8), (1, 2)] {
            let factor = ScaleFactor::new(x, y).unwrap();
            let parsed: ScaleFactor<u32> = factor.to_string().parse().unwrap();
            assert_eq!(parsed, factor);
        }
    }

    #[test]
    fn test_const_integer_constructor() {
        const TRIPLE: ScaleFactor<u32> = ScaleFactor::integer(3, 3);
        assert_eq!(TRIPLE, ScaleFactor::uniform(3).unwrap());
    }
}
