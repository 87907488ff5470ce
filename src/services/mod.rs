pub mod scale_service;

pub use scale_service::{FitRequest, ScaleReport, ScaleRequest, ScaleService};
