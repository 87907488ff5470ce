//! PNG decoding and encoding for scaler bitmaps.
//!
//! 8-bit grayscale images without alpha decode to `Gray8`; every other
//! layout (palette, RGB, gray+alpha, 16-bit) is expanded to `Rgba8`.

use std::io::Cursor;
use std::path::Path;

use pixel_scalers::color::{Gray8, Rgba8};
use pixel_scalers::{AnyBitmap, Bitmap};

use crate::error::AppError;

/// Decode PNG bytes into a bitmap.
pub fn decode_png(bytes: &[u8]) -> Result<AnyBitmap, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let (width, height) = (info.width, info.height);

    tracing::debug!(
        width,
        height,
        color_type = ?info.color_type,
        bit_depth = ?info.bit_depth,
        "Decoded PNG"
    );

    let bitmap = match info.color_type {
        png::ColorType::Grayscale => {
            let pixels = data.iter().map(|&v| Gray8(v)).collect();
            AnyBitmap::Gray8(Bitmap::from_pixels(width, height, pixels)?)
        }
        png::ColorType::GrayscaleAlpha => {
            let pixels = data
                .chunks_exact(2)
                .map(|p| Rgba8::new(p[0], p[0], p[0], p[1]))
                .collect();
            AnyBitmap::Rgba8(Bitmap::from_pixels(width, height, pixels)?)
        }
        png::ColorType::Rgb => {
            let pixels = data
                .chunks_exact(3)
                .map(|p| Rgba8::opaque(p[0], p[1], p[2]))
                .collect();
            AnyBitmap::Rgba8(Bitmap::from_pixels(width, height, pixels)?)
        }
        png::ColorType::Rgba => {
            let pixels = data
                .chunks_exact(4)
                .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
                .collect();
            AnyBitmap::Rgba8(Bitmap::from_pixels(width, height, pixels)?)
        }
        png::ColorType::Indexed => {
            return Err(AppError::Png(
                "indexed image was not expanded to RGB".to_string(),
            ))
        }
    };

    Ok(bitmap)
}

/// Encode a bitmap as an 8-bit grayscale or RGBA PNG.
pub fn encode_png(bitmap: &AnyBitmap) -> Result<Vec<u8>, AppError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(AppError::Png(format!(
            "cannot encode empty {width}x{height} image"
        )));
    }

    let (color_type, data): (png::ColorType, Vec<u8>) = match bitmap {
        AnyBitmap::Gray8(b) => (
            png::ColorType::Grayscale,
            b.pixels().iter().map(|p| p.0).collect(),
        ),
        AnyBitmap::Rgba8(b) => (
            png::ColorType::Rgba,
            b.pixels().iter().flat_map(|p| p.to_bytes()).collect(),
        ),
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    Ok(buf.into_inner())
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<AnyBitmap, AppError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode and write a PNG file, returning the encoded size.
pub fn write_png(path: &Path, bitmap: &AnyBitmap) -> Result<usize, AppError> {
    let bytes = encode_png(bitmap)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}
