//! Pixscale - pixel-art and photo scaling for PNG images
//!
//! Command-line host for the `pixel-scalers` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
