pub mod config;

pub use config::{parse_candidates, parse_pipeline, AppConfig};
