use pixel_scalers::ScaleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Scaling error: {0}")]
    Scale(#[from] ScaleError),

    #[error("PNG error: {0}")]
    Png(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for AppError {
    fn from(e: png::DecodingError) -> Self {
        AppError::Png(e.to_string())
    }
}

impl From<png::EncodingError> for AppError {
    fn from(e: png::EncodingError) -> Self {
        AppError::Png(e.to_string())
    }
}
