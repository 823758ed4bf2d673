//! PNG encoding for 24-bit truecolor pixel buffers.
//!
//! The stream is always: signature, IHDR (8-bit RGB, no interlace), a
//! single IDAT holding zlib-compressed scanlines, and IEND. Every
//! scanline is prefixed with filter type 0 (none); compression runs at
//! the highest level flate2 offers.

use std::io::Write;

use mrds_common::{MrdsError, MrdsResult};

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Bytes per pixel for 8-bit RGB.
pub const BYTES_PER_PIXEL: usize = 3;

/// IHDR color type 2 = truecolor (RGB).
const COLOR_TYPE_TRUECOLOR: u8 = 2;

/// Largest dimension the IHDR field allows (2^31 - 1).
const MAX_DIMENSION: usize = i32::MAX as usize;

/// Create a PNG image from RGB pixel data (color type 2).
///
/// # Arguments
/// - `pixels`: RGB pixel data (3 bytes per pixel), row-major
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> MrdsResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(MrdsError::EncodeError(format!(
            "invalid image dimensions {}x{}",
            width, height
        )));
    }
    let expected = width * height * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(MrdsError::EncodeError(format!(
            "pixel buffer holds {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            width,
            height
        )));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(COLOR_TYPE_TRUECOLOR);
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgb(pixels, width, height)
        .map_err(|e| MrdsError::EncodeError(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    tracing::trace!(width, height, bytes = png.len(), "Encoded PNG");
    Ok(png)
}

/// Write a PNG chunk: length, tag, payload, CRC32 over tag + payload.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);
    png.extend_from_slice(&chunk_crc(chunk_type, data).to_be_bytes());
}

/// CRC32 (PNG polynomial) over a chunk's tag and payload.
pub fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}

/// Deflate RGB image data for the IDAT chunk.
fn deflate_idat_rgb(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let row_bytes = width * BYTES_PER_PIXEL;

    // Add filter byte (0 = no filter) to each scanline
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in pixels.chunks_exact(row_bytes) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
