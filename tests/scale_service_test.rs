//! End-to-end tests for ScaleService on PNG files.

mod common;

use common::fixtures::{self, colors};
use common::TestDir;
use pixel_scalers::color::Rgba8;
use pixel_scalers::{AnyBitmap, ScaleError};
use pixscale::error::AppError;
use pixscale::models::AppConfig;
use pixscale::services::{FitRequest, ScaleRequest, ScaleService};
use pretty_assertions::assert_eq;

fn service() -> ScaleService {
    ScaleService::new(AppConfig::default())
}

fn request(algorithm: &str, scale: &str) -> ScaleRequest {
    ScaleRequest {
        algorithm: Some(algorithm.to_string()),
        scale: Some(scale.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_scale_file_with_defaults() {
    let dir = TestDir::new();
    let input = dir.write_png("sprite.png", &fixtures::sprite());
    let output = dir.path("out.png");

    let report = service()
        .scale_file(&input, &output, &ScaleRequest::default())
        .unwrap();

    assert_eq!(report.algorithm, "scalenx");
    assert_eq!(report.scale, "2x");
    assert_eq!(report.input, (8, 8));
    assert_eq!(report.output, (16, 16));
    common::assert_png_file(&output, (16, 16));
}

#[test]
fn test_every_algorithm_scales_a_sprite() {
    let source = fixtures::png_bytes(&fixtures::sprite());
    let cases = [
        ("nearest", "3x", (24, 24)),
        ("scalenx", "4x", (32, 32)),
        ("box", "2x1", (4, 8)),
        ("bilinear", "1.5", (12, 12)),
        ("bicubic", "0.5", (4, 4)),
        ("lanczos3", "2x3", (16, 24)),
    ];

    for (algorithm, scale, expected) in cases {
        let (bytes, report) = service()
            .scale_bytes(&source, &request(algorithm, scale))
            .unwrap_or_else(|e| panic!("{algorithm} {scale} failed: {e}"));
        assert_eq!(report.output, expected, "{algorithm} {scale}");
        common::assert_png_size(&bytes, expected);
    }
}

#[test]
fn test_pixel_scalers_keep_the_palette() {
    let source = fixtures::png_bytes(&fixtures::sprite());
    let palette = [colors::INK, colors::PAPER, colors::ACCENT];

    for (algorithm, scale) in [("nearest", "2x"), ("scalenx", "3x")] {
        let (bytes, _) = service().scale_bytes(&source, &request(algorithm, scale)).unwrap();
        let AnyBitmap::Rgba8(scaled) = common::assert_png(&bytes) else {
            panic!("Expected RGBA output from {algorithm}");
        };
        assert!(
            scaled.pixels().iter().all(|p| palette.contains(p)),
            "{algorithm} introduced a color outside the source palette"
        );
    }
}

#[test]
fn test_gray_input_stays_gray() {
    let source = fixtures::png_bytes(&fixtures::gray_ramp(16, 4));

    let (bytes, report) = service()
        .scale_bytes(&source, &request("lanczos3", "0.5"))
        .unwrap();

    assert_eq!(report.output, (8, 2));
    assert!(matches!(common::assert_png(&bytes), AnyBitmap::Gray8(_)));
}

#[test]
fn test_flat_image_survives_resampling() {
    let color = Rgba8::opaque(90, 140, 210);
    let source = fixtures::png_bytes(&fixtures::flat(10, 6, color));

    for algorithm in ["bilinear", "bicubic", "lanczos3"] {
        let (bytes, _) = service().scale_bytes(&source, &request(algorithm, "1.7")).unwrap();
        let AnyBitmap::Rgba8(scaled) = common::assert_png(&bytes) else {
            panic!("Expected RGBA output");
        };
        assert!(
            scaled.pixels().iter().all(|&p| p == color),
            "{algorithm} changed a flat color"
        );
    }
}

#[test]
fn test_unsupported_scale_writes_nothing() {
    let dir = TestDir::new();
    let input = dir.write_png("sprite.png", &fixtures::sprite());
    let output = dir.path("out.png");

    let result = service().scale_file(&input, &output, &request("scalenx", "5x"));

    assert!(matches!(
        result,
        Err(AppError::Scale(ScaleError::UnsupportedScale { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_unknown_algorithm() {
    let source = fixtures::png_bytes(&fixtures::sprite());
    let result = service().scale_bytes(&source, &request("hq4x", "4x"));

    assert!(matches!(
        result,
        Err(AppError::Scale(ScaleError::UnknownAlgorithm(name))) if name == "hq4x"
    ));
}

#[test]
fn test_gray_pipeline_rejected_for_rgba_input() {
    let source = fixtures::png_bytes(&fixtures::sprite());
    let request = ScaleRequest {
        pipeline: Some("linear-gray".to_string()),
        ..request("bilinear", "2x")
    };

    let result = service().scale_bytes(&source, &request);

    assert!(matches!(
        result,
        Err(AppError::Scale(ScaleError::IncompatibleRoleTypes { .. }))
    ));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = TestDir::new();
    let result = service().scale_file(
        &dir.path("missing.png"),
        &dir.path("out.png"),
        &ScaleRequest::default(),
    );
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_fit_file_picks_exact_match() {
    let dir = TestDir::new();
    let input = dir.write_png("sprite.png", &fixtures::sprite());
    let output = dir.path("fit.png");

    let request = FitRequest {
        width: 24,
        height: 24,
        candidates: vec!["box".to_string(), "scalenx".to_string()],
        quality: None,
        pipeline: None,
    };
    let report = service().fit_file(&input, &output, &request).unwrap();

    assert_eq!(report.algorithm, "scalenx");
    assert_eq!(report.scale, "3x");
    common::assert_png_file(&output, (24, 24));
}

#[test]
fn test_fit_downscales_when_target_is_smaller() {
    let source = fixtures::png_bytes(&fixtures::sprite());
    let request = FitRequest {
        width: 4,
        height: 4,
        candidates: vec!["nearest".to_string(), "box".to_string()],
        quality: Some("fast".to_string()),
        pipeline: None,
    };

    let (bytes, report) = service().fit_bytes(&source, &request).unwrap();

    assert_eq!(report.algorithm, "box");
    assert_eq!(report.scale, "2x");
    common::assert_png_size(&bytes, (4, 4));
}

#[test]
fn test_config_file_drives_defaults() {
    let dir = TestDir::new();
    let config_path = dir.write_config(
        r#"
algorithm: nearest
scale: 4x
quality: fast
candidates: [bicubic]
"#,
    );
    let service = ScaleService::new(AppConfig::load(&config_path));
    let source = fixtures::png_bytes(&fixtures::sprite());

    let (_, report) = service.scale_bytes(&source, &ScaleRequest::default()).unwrap();
    assert_eq!(report.algorithm, "nearest");
    assert_eq!(report.output, (32, 32));

    let fit = FitRequest {
        width: 10,
        height: 20,
        candidates: Vec::new(),
        quality: None,
        pipeline: None,
    };
    let (_, report) = service.fit_bytes(&source, &fit).unwrap();
    assert_eq!(report.algorithm, "bicubic");
    assert_eq!(report.output, (10, 20));
}
