use std::path::Path;

use pixel_scalers::color::{PipelineKind, QualityMode};
use pixel_scalers::{scale_to_fit, AnyBitmap, AnyScaler};

use crate::error::AppError;
use crate::models::{parse_pipeline, AppConfig};
use crate::rendering::{decode_png, encode_png, read_png, write_png};

/// Per-call overrides for the configured defaults
#[derive(Debug, Clone, Default)]
pub struct ScaleRequest {
    pub algorithm: Option<String>,
    pub scale: Option<String>,
    pub quality: Option<String>,
    pub pipeline: Option<String>,
}

/// Parameters for scaling towards a target size
#[derive(Debug, Clone)]
pub struct FitRequest {
    pub width: u32,
    pub height: u32,
    /// Candidate algorithms, or the configured list when empty
    pub candidates: Vec<String>,
    pub quality: Option<String>,
    pub pipeline: Option<String>,
}

/// What a scaling call did
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReport {
    pub algorithm: &'static str,
    pub scale: String,
    pub input: (u32, u32),
    pub output: (u32, u32),
    /// Encoded PNG size
    pub bytes: usize,
}

/// Scales PNG images using the configured defaults
pub struct ScaleService {
    config: AppConfig,
}

struct Resolved {
    quality: QualityMode,
    pipeline: Option<PipelineKind>,
}

impl ScaleService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn resolve_scaler(&self, request: &ScaleRequest) -> Result<AnyScaler, AppError> {
        let algorithm = request.algorithm.as_deref().unwrap_or(&self.config.algorithm);
        let scale = request.scale.as_deref().unwrap_or(&self.config.scale);
        Ok(AnyScaler::from_name(algorithm, scale)?)
    }

    fn resolve_color(
        &self,
        quality: Option<&str>,
        pipeline: Option<&str>,
    ) -> Result<Resolved, AppError> {
        let quality = match quality {
            Some(q) => q.parse()?,
            None => self.config.quality_mode()?,
        };
        let pipeline = match pipeline {
            Some(_) => parse_pipeline(pipeline)?,
            None => self.config.pipeline_kind()?,
        };
        Ok(Resolved { quality, pipeline })
    }

    /// Scale a decoded bitmap
    pub fn scale_bitmap(
        &self,
        source: &AnyBitmap,
        request: &ScaleRequest,
    ) -> Result<(AnyScaler, AnyBitmap), AppError> {
        let scaler = self.resolve_scaler(request)?;
        let color = self.resolve_color(request.quality.as_deref(), request.pipeline.as_deref())?;

        tracing::debug!(
            algorithm = scaler.name(),
            scale = %scaler.scale_label(),
            quality = color.quality.name(),
            pipeline = color.pipeline.map(|p| p.name()),
            "Scaling bitmap"
        );

        let output = scaler.run(source, color.quality, color.pipeline)?;
        Ok((scaler, output))
    }

    /// Scale PNG bytes, returning the encoded result
    pub fn scale_bytes(
        &self,
        png: &[u8],
        request: &ScaleRequest,
    ) -> Result<(Vec<u8>, ScaleReport), AppError> {
        let source = decode_png(png)?;
        let (scaler, output) = self.scale_bitmap(&source, request)?;
        let encoded = encode_png(&output)?;

        let report = ScaleReport {
            algorithm: scaler.name(),
            scale: scaler.scale_label(),
            input: source.dimensions(),
            output: output.dimensions(),
            bytes: encoded.len(),
        };
        log_report(&report);
        Ok((encoded, report))
    }

    /// Scale a PNG file into `output`
    pub fn scale_file(
        &self,
        input: &Path,
        output: &Path,
        request: &ScaleRequest,
    ) -> Result<ScaleReport, AppError> {
        let source = read_png(input)?;
        let (scaler, scaled) = self.scale_bitmap(&source, request)?;
        let bytes = write_png(output, &scaled)?;

        let report = ScaleReport {
            algorithm: scaler.name(),
            scale: scaler.scale_label(),
            input: source.dimensions(),
            output: scaled.dimensions(),
            bytes,
        };
        log_report(&report);
        Ok(report)
    }

    /// Pick the candidate closest to the requested size and scale with it
    pub fn fit_bitmap(
        &self,
        source: &AnyBitmap,
        request: &FitRequest,
    ) -> Result<(AnyScaler, AnyBitmap), AppError> {
        let candidates = if request.candidates.is_empty() {
            &self.config.candidates
        } else {
            &request.candidates
        };
        let color = self.resolve_color(request.quality.as_deref(), request.pipeline.as_deref())?;

        let (fit, output) = scale_to_fit(
            candidates,
            source,
            (request.width, request.height),
            color.quality,
            color.pipeline,
        )?;
        Ok((fit.scaler, output))
    }

    pub fn fit_bytes(
        &self,
        png: &[u8],
        request: &FitRequest,
    ) -> Result<(Vec<u8>, ScaleReport), AppError> {
        let source = decode_png(png)?;
        let (scaler, output) = self.fit_bitmap(&source, request)?;
        let encoded = encode_png(&output)?;

        let report = ScaleReport {
            algorithm: scaler.name(),
            scale: scaler.scale_label(),
            input: source.dimensions(),
            output: output.dimensions(),
            bytes: encoded.len(),
        };
        log_report(&report);
        Ok((encoded, report))
    }

    pub fn fit_file(
        &self,
        input: &Path,
        output: &Path,
        request: &FitRequest,
    ) -> Result<ScaleReport, AppError> {
        let source = read_png(input)?;
        let (scaler, scaled) = self.fit_bitmap(&source, request)?;
        let bytes = write_png(output, &scaled)?;

        let report = ScaleReport {
            algorithm: scaler.name(),
            scale: scaler.scale_label(),
            input: source.dimensions(),
            output: scaled.dimensions(),
            bytes,
        };
        log_report(&report);
        Ok(report)
    }
}

fn log_report(report: &ScaleReport) {
    tracing::info!(
        algorithm = report.algorithm,
        scale = %report.scale,
        input_w = report.input.0,
        input_h = report.input.1,
        output_w = report.output.0,
        output_h = report.output.1,
        bytes = report.bytes,
        "Scaled image"
    );
}
