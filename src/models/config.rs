use std::path::Path;

use pixel_scalers::color::{PipelineKind, QualityMode};
use pixel_scalers::AnyScaler;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Algorithm used by `scale` when none is given on the command line
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Scale factor text, e.g. "2x", "3x2" or "1.5"
    #[serde(default = "default_scale")]
    pub scale: String,

    /// "fast" (blend encoded values) or "accurate" (blend in linear light)
    #[serde(default = "default_quality")]
    pub quality: String,

    /// Explicit color pipeline, overriding `quality`
    #[serde(default)]
    pub pipeline: Option<String>,

    /// Algorithms `fit` tries, in order of preference
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

fn default_algorithm() -> String {
    "scalenx".to_string()
}

fn default_scale() -> String {
    "2x".to_string()
}

fn default_quality() -> String {
    QualityMode::default().name().to_string()
}

fn default_candidates() -> Vec<String> {
    ["scalenx", "nearest", "box", "lanczos3"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        algorithm = %config.algorithm,
                        candidates = config.candidates.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path` if given, else defaults
    pub fn load_optional(path: Option<&Path>) -> Self {
        path.map(Self::load).unwrap_or_default()
    }

    /// The configured scaler, validated
    pub fn scaler(&self) -> Result<AnyScaler, AppError> {
        Ok(AnyScaler::from_name(&self.algorithm, &self.scale)?)
    }

    pub fn quality_mode(&self) -> Result<QualityMode, AppError> {
        Ok(self.quality.parse()?)
    }

    pub fn pipeline_kind(&self) -> Result<Option<PipelineKind>, AppError> {
        parse_pipeline(self.pipeline.as_deref())
    }
}

/// Parse an optional pipeline name
pub fn parse_pipeline(name: Option<&str>) -> Result<Option<PipelineKind>, AppError> {
    Ok(name.map(str::parse::<PipelineKind>).transpose()?)
}

/// Split a comma-separated candidate list, dropping empty entries
pub fn parse_candidates(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            scale: default_scale(),
            quality: default_quality(),
            pipeline: None,
            candidates: default_candidates(),
        }
    }
}
