//! PNG serialization of the composed report sheet.

use std::io::Cursor;

use crate::analysis::PixelBuffer;
use crate::error::RenderError;

/// Encode the sheet as an 8-bit RGB PNG. The sheet is fully opaque, so
/// alpha is dropped before encoding.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let rgb: Vec<u8> = image
        .as_bytes()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
