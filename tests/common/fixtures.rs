//! Image fixtures built in memory with the `image` crate.

use std::io::Cursor;

/// Encode a PNG from a pixel pattern, repeated to fill `width` x `height`.
pub fn png_from_pixels(pixels: &[[u8; 3]], width: u32, height: u32) -> Vec<u8> {
    let mut img = image::RgbImage::new(width, height);
    for (i, p) in img.pixels_mut().enumerate() {
        p.0 = pixels[i % pixels.len()];
    }
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("PNG encode failed");
    out.into_inner()
}

/// 4x4 capture in saturated overlay colors: 8 pink, 8 forest pixels.
/// Auto-detection classifies this as high contrast.
pub fn saturated_capture() -> Vec<u8> {
    png_from_pixels(&[[222, 77, 131], [34, 139, 34]], 4, 4)
}

/// 4x4 washed-out capture: 8 mid-value, 8 forest pixels near the default
/// reference colors. Auto-detection classifies this as low contrast.
pub fn washed_out_capture() -> Vec<u8> {
    png_from_pixels(&[[73, 55, 67], [82, 93, 72]], 4, 4)
}

/// 4x4 capture with nothing classifiable.
pub fn blank_capture() -> Vec<u8> {
    png_from_pixels(&[[255, 255, 255]], 4, 4)
}
