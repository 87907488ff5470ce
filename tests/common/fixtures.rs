//! Test fixtures: sample images and scratch directories.

use std::path::{Path, PathBuf};

use pixel_scalers::color::{Gray8, Rgba8};
use pixel_scalers::{AnyBitmap, Bitmap};
use pixscale::rendering::encode_png;
use tempfile::TempDir;

/// Colors used by the sample sprites
pub mod colors {
    use pixel_scalers::color::Rgba8;

    pub const INK: Rgba8 = Rgba8::opaque(20, 20, 40);
    pub const PAPER: Rgba8 = Rgba8::opaque(240, 230, 200);
    pub const ACCENT: Rgba8 = Rgba8::opaque(200, 40, 40);
}

/// 8x8 sprite: paper background, ink diagonal, accent corner block
pub fn sprite() -> AnyBitmap {
    Bitmap::from_fn(8, 8, |x, y| {
        if x == y {
            colors::INK
        } else if x >= 6 && y <= 1 {
            colors::ACCENT
        } else {
            colors::PAPER
        }
    })
    .into()
}

/// Horizontal gray ramp
pub fn gray_ramp(width: u32, height: u32) -> AnyBitmap {
    Bitmap::from_fn(width, height, |x, _| {
        Gray8((x * 255 / width.saturating_sub(1).max(1)) as u8)
    })
    .into()
}

/// Single-color RGBA image
pub fn flat(width: u32, height: u32, color: Rgba8) -> AnyBitmap {
    Bitmap::filled(width, height, color).into()
}

/// Encode a fixture to PNG bytes
pub fn png_bytes(bitmap: &AnyBitmap) -> Vec<u8> {
    encode_png(bitmap).expect("fixture should encode")
}

/// Scratch directory removed when dropped
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a fixture PNG and return its path
    pub fn write_png(&self, name: &str, bitmap: &AnyBitmap) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, png_bytes(bitmap)).expect("Failed to write fixture");
        path
    }

    /// Write a config file and return its path
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.path("config.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        path
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
