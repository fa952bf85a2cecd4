/// A decoded image as flat RGBA samples, row-major.
///
/// The buffer is owned by the analysis that created it and mutated in place
/// during recoloring; alpha is carried through untouched. Dimensions and
/// byte length are validated at construction, so pixel access inside the
/// bounds never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap a raw RGBA byte vector. Returns None if the length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Solid-color buffer, mainly for tests and panel composition.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels ("grand total" of the report).
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGB of the pixel at flat index `i` (0..width*height).
    #[inline]
    pub fn rgb_at_index(&self, i: usize) -> [u8; 3] {
        let o = i * 4;
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Overwrite the RGB of the pixel at flat index `i`, keeping alpha.
    #[inline]
    pub fn set_rgb_at_index(&mut self, i: usize, rgb: [u8; 3]) {
        let o = i * 4;
        self.data[o] = rgb[0];
        self.data[o + 1] = rgb[1];
        self.data[o + 2] = rgb[2];
    }

    /// RGB at (x, y), or None outside the image. This is the lookup behind
    /// the calibration color picker.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.rgb_at_index(y as usize * self.width as usize + x as usize))
    }

    #[inline]
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x < self.width && y < self.height {
            self.set_rgb_at_index(y as usize * self.width as usize + x as usize, rgb);
        }
    }
}
