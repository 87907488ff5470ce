//! Runtime algorithm selection.
//!
//! [`AnyScaler`] is the host-facing handle: it is built from an algorithm
//! name and a scale string (as read from a CLI flag or a config file),
//! validates both up front, and runs through the internal dispatch layer.
//!
//! [`best_fit`] and [`scale_to_fit`] pick, from a list of candidate
//! algorithms, the one whose achievable output lands closest to a target
//! size.

use std::fmt;

use tracing::{debug, info};

use crate::algorithms::{Bicubic, Bilinear, BoxDownscaler, Lanczos3, NearestNeighbor, ScaleNx};
use crate::bitmap::AnyBitmap;
use crate::color::{PipelineKind, QualityMode};
use crate::dispatch::ScalerDispatch;
use crate::error::{ScaleError, ScaleResult};
use crate::geometry::ScaleFactor;
use crate::scaler::{Downscaler, PixelScaler, Resampler, ScalerInfo, ScalerKind};

/// One configured scaler of any shipped algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyScaler {
    Nearest(NearestNeighbor),
    ScaleNx(ScaleNx),
    Box(BoxDownscaler),
    Bilinear(Bilinear),
    Bicubic(Bicubic),
    Lanczos3(Lanczos3),
}

impl AnyScaler {
    /// Names accepted by [`AnyScaler::from_name`].
    pub const NAMES: [&'static str; 6] = [
        NearestNeighbor::NAME,
        ScaleNx::NAME,
        BoxDownscaler::NAME,
        Bilinear::NAME,
        Bicubic::NAME,
        Lanczos3::NAME,
    ];

    /// Build a scaler from an algorithm name and a scale such as `"2x"`,
    /// `"3x2"` or `"1.5"`.
    ///
    /// ```
    /// use pixel_scalers::{AnyScaler, ScaleError};
    ///
    /// let scaler = AnyScaler::from_name("scalenx", "3x").unwrap();
    /// assert_eq!(scaler.target_size(10, 4), (30, 12));
    ///
    /// assert!(matches!(
    ///     AnyScaler::from_name("scalenx", "5x"),
    ///     Err(ScaleError::UnsupportedScale { .. })
    /// ));
    /// ```
    pub fn from_name(name: &str, scale: &str) -> ScaleResult<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            NearestNeighbor::NAME => Ok(Self::Nearest(NearestNeighbor::with_scale(scale.parse()?)?)),
            ScaleNx::NAME => Ok(Self::ScaleNx(ScaleNx::with_scale(scale.parse()?)?)),
            BoxDownscaler::NAME => Ok(Self::Box(BoxDownscaler::with_ratio(scale.parse()?)?)),
            Bilinear::NAME => Ok(Self::Bilinear(Bilinear::with_scale(scale.parse()?)?)),
            Bicubic::NAME => Ok(Self::Bicubic(Bicubic::with_scale(scale.parse()?)?)),
            Lanczos3::NAME => Ok(Self::Lanczos3(Lanczos3::with_scale(scale.parse()?)?)),
            other => Err(ScaleError::UnknownAlgorithm(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nearest(s) => s.name(),
            Self::ScaleNx(s) => s.name(),
            Self::Box(s) => s.name(),
            Self::Bilinear(s) => s.name(),
            Self::Bicubic(s) => s.name(),
            Self::Lanczos3(s) => s.name(),
        }
    }

    pub fn kind(&self) -> ScalerKind {
        match self {
            Self::Nearest(s) => s.kind(),
            Self::ScaleNx(s) => s.kind(),
            Self::Box(s) => s.kind(),
            Self::Bilinear(s) => s.kind(),
            Self::Bicubic(s) => s.kind(),
            Self::Lanczos3(s) => s.kind(),
        }
    }

    /// Configured factor as text, e.g. `"2x"` or `"1.5x0.75"`.
    pub fn scale_label(&self) -> String {
        match self {
            Self::Nearest(s) => s.scale().to_string(),
            Self::ScaleNx(s) => s.scale().to_string(),
            Self::Box(s) => s.scale().to_string(),
            Self::Bilinear(s) => s.scale().to_string(),
            Self::Bicubic(s) => s.scale().to_string(),
            Self::Lanczos3(s) => s.scale().to_string(),
        }
    }

    /// Output size for a `width x height` source.
    pub fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Nearest(s) => s.scale().apply(width, height),
            Self::ScaleNx(s) => s.scale().apply(width, height),
            Self::Box(s) => s.target_size(width, height),
            Self::Bilinear(s) => s.scale().apply(width, height),
            Self::Bicubic(s) => s.scale().apply(width, height),
            Self::Lanczos3(s) => s.scale().apply(width, height),
        }
    }

    /// Scale `source`, using `pipeline` or the default for `quality`.
    pub fn run(
        &self,
        source: &AnyBitmap,
        quality: QualityMode,
        pipeline: Option<PipelineKind>,
    ) -> ScaleResult<AnyBitmap> {
        match self {
            Self::Nearest(s) => s.apply(source, quality, pipeline),
            Self::ScaleNx(s) => s.apply(source, quality, pipeline),
            Self::Box(s) => s.apply(source, quality, pipeline),
            Self::Bilinear(s) => s.apply(source, quality, pipeline),
            Self::Bicubic(s) => s.apply(source, quality, pipeline),
            Self::Lanczos3(s) => s.apply(source, quality, pipeline),
        }
    }
}

impl fmt::Display for AnyScaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.scale_label())
    }
}

/// Factors an algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleRange {
    Discrete(&'static [ScaleFactor<u32>]),
    Continuous { min: f32, max: f32 },
}

/// Static description of a shipped algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub kind: ScalerKind,
    pub scales: ScaleRange,
}

fn pixel_scaler_info<S: PixelScaler>() -> AlgorithmInfo {
    AlgorithmInfo {
        name: S::NAME,
        kind: ScalerKind::PixelScaler,
        scales: ScaleRange::Discrete(S::SUPPORTED_SCALES),
    }
}

fn downscaler_info<S: Downscaler>() -> AlgorithmInfo {
    AlgorithmInfo {
        name: S::NAME,
        kind: ScalerKind::Downscaler,
        scales: ScaleRange::Discrete(S::SUPPORTED_RATIOS),
    }
}

fn resampler_info<S: Resampler>() -> AlgorithmInfo {
    AlgorithmInfo {
        name: S::NAME,
        kind: ScalerKind::Resampler,
        scales: ScaleRange::Continuous {
            min: S::MIN_SCALE,
            max: S::MAX_SCALE,
        },
    }
}

/// Every shipped algorithm, in [`AnyScaler::NAMES`] order.
pub fn list_algorithms() -> [AlgorithmInfo; 6] {
    [
        pixel_scaler_info::<NearestNeighbor>(),
        pixel_scaler_info::<ScaleNx>(),
        downscaler_info::<BoxDownscaler>(),
        resampler_info::<Bilinear>(),
        resampler_info::<Bicubic>(),
        resampler_info::<Lanczos3>(),
    ]
}

/// Output sizes an algorithm can produce from one source size.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSet {
    /// One size per supported factor, in table order.
    Discrete(Vec<(ScaleFactor<u32>, (u32, u32))>),
    /// Any size between the extremes of the scale range.
    Continuous { min: (u32, u32), max: (u32, u32) },
}

/// Possible output sizes of algorithm `name` for a `width x height` source.
pub fn possible_targets(name: &str, width: u32, height: u32) -> ScaleResult<TargetSet> {
    fn discrete(
        table: &'static [ScaleFactor<u32>],
        sizes: Vec<(u32, u32)>,
    ) -> TargetSet {
        TargetSet::Discrete(table.iter().copied().zip(sizes).collect())
    }

    fn continuous<S: Resampler>(width: u32, height: u32) -> ScaleResult<TargetSet> {
        let min = ScaleFactor::uniform(S::MIN_SCALE)?.apply(width, height);
        let max = ScaleFactor::uniform(S::MAX_SCALE)?.apply(width, height);
        Ok(TargetSet::Continuous { min, max })
    }

    match name.trim().to_ascii_lowercase().as_str() {
        NearestNeighbor::NAME => Ok(discrete(
            NearestNeighbor::SUPPORTED_SCALES,
            NearestNeighbor::possible_targets(width, height),
        )),
        ScaleNx::NAME => Ok(discrete(
            ScaleNx::SUPPORTED_SCALES,
            ScaleNx::possible_targets(width, height),
        )),
        BoxDownscaler::NAME => Ok(discrete(
            BoxDownscaler::SUPPORTED_RATIOS,
            BoxDownscaler::possible_targets(width, height),
        )),
        Bilinear::NAME => continuous::<Bilinear>(width, height),
        Bicubic::NAME => continuous::<Bicubic>(width, height),
        Lanczos3::NAME => continuous::<Lanczos3>(width, height),
        other => Err(ScaleError::UnknownAlgorithm(other.to_string())),
    }
}

/// A candidate scaler and the size it would produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitCandidate {
    pub scaler: AnyScaler,
    pub output: (u32, u32),
}

impl FitCandidate {
    /// `|dw| + |dh|` between the candidate's output and `target`.
    pub fn distance(&self, target: (u32, u32)) -> u64 {
        distance(self.output, target)
    }
}

fn distance(a: (u32, u32), b: (u32, u32)) -> u64 {
    a.0.abs_diff(b.0) as u64 + a.1.abs_diff(b.1) as u64
}

/// First entry with the smallest distance to `target`.
fn closest<T>(options: impl IntoIterator<Item = (T, (u32, u32))>, target: (u32, u32)) -> Option<(T, (u32, u32))> {
    options.into_iter().fold(None, |best, option| match best {
        Some((_, size)) if distance(size, target) <= distance(option.1, target) => best,
        _ => Some(option),
    })
}

fn fit_pixel_scaler<S: PixelScaler>(source: (u32, u32), target: (u32, u32)) -> ScaleResult<Option<(S, (u32, u32))>> {
    let options = S::SUPPORTED_SCALES
        .iter()
        .copied()
        .zip(S::possible_targets(source.0, source.1));
    match closest(options, target) {
        Some((scale, size)) => Ok(Some((S::with_scale(scale)?, size))),
        None => Ok(None),
    }
}

fn fit_downscaler<S: Downscaler>(source: (u32, u32), target: (u32, u32)) -> ScaleResult<Option<(S, (u32, u32))>> {
    let options = S::SUPPORTED_RATIOS
        .iter()
        .copied()
        .zip(S::possible_targets(source.0, source.1));
    match closest(options, target) {
        Some((ratio, size)) => Ok(Some((S::with_ratio(ratio)?, size))),
        None => Ok(None),
    }
}

/// Scale that maps `source` onto `target`, clamped to the supported range.
fn fit_resampler<S: Resampler>(source: (u32, u32), target: (u32, u32)) -> ScaleResult<Option<(S, (u32, u32))>> {
    if source.0 == 0 || source.1 == 0 || target.0 == 0 || target.1 == 0 {
        return Ok(None);
    }
    let axis = |t: u32, s: u32| (t as f32 / s as f32).clamp(S::MIN_SCALE, S::MAX_SCALE);
    let scale = ScaleFactor::new(axis(target.0, source.0), axis(target.1, source.1))?;
    let scaler = S::with_scale(scale)?;
    Ok(Some((scaler, scale.apply(source.0, source.1))))
}

fn fit_one(name: &str, source: (u32, u32), target: (u32, u32)) -> ScaleResult<Option<FitCandidate>> {
    fn wrap<S>(fit: Option<(S, (u32, u32))>, variant: fn(S) -> AnyScaler) -> Option<FitCandidate> {
        fit.map(|(scaler, output)| FitCandidate {
            scaler: variant(scaler),
            output,
        })
    }

    let name = name.trim().to_ascii_lowercase();
    Ok(match name.as_str() {
        NearestNeighbor::NAME => wrap(fit_pixel_scaler(source, target)?, AnyScaler::Nearest),
        ScaleNx::NAME => wrap(fit_pixel_scaler(source, target)?, AnyScaler::ScaleNx),
        BoxDownscaler::NAME => wrap(fit_downscaler(source, target)?, AnyScaler::Box),
        Bilinear::NAME => wrap(fit_resampler(source, target)?, AnyScaler::Bilinear),
        Bicubic::NAME => wrap(fit_resampler(source, target)?, AnyScaler::Bicubic),
        Lanczos3::NAME => wrap(fit_resampler(source, target)?, AnyScaler::Lanczos3),
        other => return Err(ScaleError::UnknownAlgorithm(other.to_string())),
    })
}

/// Pick the candidate whose output is closest to `target`.
///
/// Distance is `|dw| + |dh|`. On a tie the earlier candidate wins, so list
/// preferred algorithms first. Unknown names are an error even when an
/// earlier candidate already matches exactly.
///
/// ```
/// use pixel_scalers::{best_fit, AnyScaler};
///
/// let fit = best_fit(&["scalenx", "bicubic"], (16, 16), (48, 48)).unwrap();
/// assert_eq!(fit.scaler, AnyScaler::from_name("scalenx", "3x").unwrap());
/// assert_eq!(fit.output, (48, 48));
/// ```
pub fn best_fit<S: AsRef<str>>(
    candidates: &[S],
    source: (u32, u32),
    target: (u32, u32),
) -> ScaleResult<FitCandidate> {
    if candidates.is_empty() {
        return Err(ScaleError::InvalidArgument(
            "no candidate algorithms given".into(),
        ));
    }

    let mut best: Option<FitCandidate> = None;
    for name in candidates {
        let Some(candidate) = fit_one(name.as_ref(), source, target)? else {
            debug!(algorithm = name.as_ref(), "No usable output size");
            continue;
        };
        debug!(
            algorithm = candidate.scaler.name(),
            scale = %candidate.scaler.scale_label(),
            width = candidate.output.0,
            height = candidate.output.1,
            distance = candidate.distance(target),
            "Fit candidate"
        );
        if best.map_or(true, |b| candidate.distance(target) < b.distance(target)) {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| {
        ScaleError::InvalidArgument(format!(
            "no candidate can scale {}x{} towards {}x{}",
            source.0, source.1, target.0, target.1
        ))
    })
}

/// [`best_fit`], then run the winner on `source`.
pub fn scale_to_fit<S: AsRef<str>>(
    candidates: &[S],
    source: &AnyBitmap,
    target: (u32, u32),
    quality: QualityMode,
    pipeline: Option<PipelineKind>,
) -> ScaleResult<(FitCandidate, AnyBitmap)> {
    let fit = best_fit(candidates, source.dimensions(), target)?;
    info!(
        algorithm = fit.scaler.name(),
        scale = %fit.scaler.scale_label(),
        width = fit.output.0,
        height = fit.output.1,
        "Selected scaler"
    );
    let output = fit.scaler.run(source, quality, pipeline)?;
    Ok((fit, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::color::{Gray8, Rgba8};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_name_round_trips_names() {
        for (name, scale) in [
            ("nearest", "2x"),
            ("scalenx", "4x"),
            ("box", "2x1"),
            ("bilinear", "0.5"),
            ("bicubic", "1.5x2"),
            ("lanczos3", "3"),
        ] {
            let scaler = AnyScaler::from_name(name, scale).unwrap();
            assert_eq!(scaler.name(), name);
        }
        assert_eq!(AnyScaler::from_name(" ScaleNX ", "2x").unwrap().name(), "scalenx");
    }

    #[test]
    fn test_from_name_errors() {
        assert_eq!(
            AnyScaler::from_name("hq2x", "2x"),
            Err(ScaleError::UnknownAlgorithm("hq2x".into()))
        );
        assert!(matches!(
            AnyScaler::from_name("nearest", "two"),
            Err(ScaleError::InvalidArgument(_))
        ));
        assert!(matches!(
            AnyScaler::from_name("box", "5x5"),
            Err(ScaleError::UnsupportedRatio { .. })
        ));
    }

    #[test]
    fn test_kinds_and_labels() {
        let bicubic = AnyScaler::from_name("bicubic", "1.5x2").unwrap();
        assert_eq!(bicubic.kind(), ScalerKind::Resampler);
        assert_eq!(bicubic.scale_label(), "1.5x2");
        assert_eq!(bicubic.to_string(), "bicubic 1.5x2");

        let boxed = AnyScaler::from_name("box", "2x").unwrap();
        assert_eq!(boxed.kind(), ScalerKind::Downscaler);
        assert_eq!(boxed.target_size(5, 4), (2, 2));
    }

    #[test]
    fn test_algorithms_listing_matches_names() {
        let names: Vec<_> = list_algorithms().iter().map(|a| a.name).collect();
        assert_eq!(names, AnyScaler::NAMES);
        assert_eq!(
            list_algorithms()[5].scales,
            ScaleRange::Continuous {
                min: 1.0 / 32.0,
                max: 32.0
            }
        );
    }

    #[test]
    fn test_possible_targets() {
        assert_eq!(
            possible_targets("scalenx", 10, 5).unwrap(),
            TargetSet::Discrete(vec![
                (ScaleFactor::integer(2, 2), (20, 10)),
                (ScaleFactor::integer(3, 3), (30, 15)),
                (ScaleFactor::integer(4, 4), (40, 20)),
            ])
        );
        assert_eq!(
            possible_targets("bilinear", 32, 16).unwrap(),
            TargetSet::Continuous {
                min: (2, 1),
                max: (512, 256)
            }
        );
        assert!(possible_targets("nope", 1, 1).is_err());
    }

    #[test]
    fn test_best_fit_prefers_exact_discrete() {
        let fit = best_fit(&["nearest", "bicubic"], (10, 10), (30, 30)).unwrap();
        assert_eq!(fit.scaler, AnyScaler::from_name("nearest", "3x").unwrap());
        assert_eq!(fit.distance((30, 30)), 0);
    }

    #[test]
    fn test_best_fit_ties_keep_first_candidate() {
        let fit = best_fit(&["bicubic", "nearest"], (10, 10), (30, 30)).unwrap();
        assert_eq!(fit.scaler.name(), "bicubic");
        assert_eq!(fit.output, (30, 30));
    }

    #[test]
    fn test_best_fit_falls_back_to_resampler() {
        let fit = best_fit(&["scalenx", "lanczos3"], (10, 10), (25, 17)).unwrap();
        assert_eq!(fit.scaler.name(), "lanczos3");
        assert_eq!(fit.output, (25, 17));
    }

    #[test]
    fn test_best_fit_closest_discrete_when_alone() {
        // 2x -> 20 (d=7), 3x -> 30 (d=3)
        let fit = best_fit(&["scalenx"], (10, 10), (27, 27)).unwrap();
        assert_eq!(fit.scaler, AnyScaler::from_name("scalenx", "3x").unwrap());
        assert_eq!(fit.distance((27, 27)), 6);
    }

    #[test]
    fn test_best_fit_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            best_fit(&empty, (1, 1), (2, 2)),
            Err(ScaleError::InvalidArgument(_))
        ));
        assert!(matches!(
            best_fit(&["nearest", "magic"], (1, 1), (2, 2)),
            Err(ScaleError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            best_fit(&["bilinear"], (0, 0), (2, 2)),
            Err(ScaleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_scale_to_fit_runs_winner() {
        let source: AnyBitmap = Bitmap::filled(8, 8, Gray8(77)).into();
        let (fit, output) =
            scale_to_fit(&["box", "bilinear"], &source, (4, 4), QualityMode::Fast, None).unwrap();
        assert_eq!(fit.scaler.name(), "box");
        assert_eq!(output, AnyBitmap::Gray8(Bitmap::filled(4, 4, Gray8(77))));
    }

    #[test]
    fn test_run_rejects_mismatched_pipeline() {
        let source: AnyBitmap = Bitmap::filled(2, 2, Rgba8::opaque(0, 0, 0)).into();
        let scaler = AnyScaler::from_name("nearest", "2x").unwrap();
        assert!(matches!(
            scaler.run(&source, QualityMode::Accurate, Some(PipelineKind::UnormGray)),
            Err(ScaleError::IncompatibleRoleTypes { .. })
        ));
    }
}
