//! Assertion helpers for tests.

use std::path::Path;

use pixel_scalers::AnyBitmap;
use pixscale::rendering::{decode_png, read_png};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert bytes are a decodable PNG and return the decoded image
pub fn assert_png(bytes: &[u8]) -> AnyBitmap {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_png(bytes).expect("PNG should decode")
}

/// Assert PNG bytes decode to the given size
pub fn assert_png_size(bytes: &[u8], expected: (u32, u32)) -> AnyBitmap {
    let bitmap = assert_png(bytes);
    assert_eq!(bitmap.dimensions(), expected, "Unexpected PNG dimensions");
    bitmap
}

/// Assert a PNG file exists with the given size
pub fn assert_png_file(path: &Path, expected: (u32, u32)) -> AnyBitmap {
    assert!(path.exists(), "Expected {} to exist", path.display());
    let bitmap = read_png(path).expect("PNG file should decode");
    assert_eq!(bitmap.dimensions(), expected, "Unexpected PNG dimensions");
    bitmap
}
