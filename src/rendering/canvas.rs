//! Minimal software rasterizer over a [`PixelBuffer`].
//!
//! Just enough for the report panel: solid background, blitting the
//! analyzed image, horizontal rules and scaled bitmap text. Everything is
//! clipped at the buffer edge through the bounds-checked pixel setter.

use crate::analysis::PixelBuffer;
use crate::rendering::font::{self, CHAR_W};

pub struct Canvas {
    buffer: PixelBuffer,
}

impl Canvas {
    /// Fresh canvas filled with a solid background color.
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        Self {
            buffer: PixelBuffer::filled(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Copy `src` onto the canvas with its top-left corner at (x, y).
    pub fn blit(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        for sy in 0..src.height() {
            for sx in 0..src.width() {
                if let Some(rgb) = src.rgb_at(sx, sy) {
                    self.buffer.set_rgb(x + sx, y + sy, rgb);
                }
            }
        }
    }

    pub fn hline(&mut self, x: u32, y: u32, w: u32, color: [u8; 3]) {
        for dx in 0..w {
            self.buffer.set_rgb(x + dx, y, color);
        }
    }

    fn draw_char(&mut self, x: u32, y: u32, ch: char, scale: u32, color: [u8; 3]) {
        let Some(glyph) = font::glyph(ch) else {
            return;
        };
        for (row, &bits) in glyph.iter().enumerate() {
            for col in 0..5u32 {
                if bits & (0x10 >> col) != 0 {
                    // One font pixel becomes a scale x scale block.
                    let bx = x + col * scale;
                    let by = y + row as u32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.buffer.set_rgb(bx + dx, by + dy, color);
                        }
                    }
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: [u8; 3]) {
        for (i, ch) in text.chars().enumerate() {
            self.draw_char(x + i as u32 * CHAR_W * scale, y, ch, scale, color);
        }
    }

    /// Faux bold: the glyph drawn twice with a one-pixel horizontal offset.
    pub fn draw_text_bold(&mut self, x: u32, y: u32, text: &str, scale: u32, color: [u8; 3]) {
        self.draw_text(x, y, text, scale, color);
        self.draw_text(x + 1, y, text, scale, color);
    }
}
