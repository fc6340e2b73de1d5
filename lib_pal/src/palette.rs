use std::collections::HashMap;

use log::debug;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Invalid pixel buffer: {width}x{height} image cannot hold {len} pixels")]
    InvalidBuffer {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("Invalid pixel data length: expected multiple of 4 bytes, got {0}")]
    InvalidPixelDataLength(usize),
}

/// A single RGBA color. Two colors are the same palette entry only when all
/// four channels match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Formats the color as `#RRGGBBAA` with uppercase digits. Alpha is
    /// always written, even when fully opaque.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses `#RRGGBBAA` or `#RRGGBB` (opaque), in either case.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, u8::MAX)),
            _ => None,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

/// Read-only RGBA input. Row 0 of `pixels` is the bottom row of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Wraps a bottom-up pixel array, rejecting geometry that does not match
    /// the number of pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self, PaletteError> {
        let expected = width.checked_mul(height);
        if expected != Some(pixels.len()) {
            return Err(PaletteError::InvalidBuffer {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a buffer from raw bottom-up RGBA bytes.
    pub fn from_rgba_bytes(width: usize, height: usize, rgba: &[u8]) -> Result<Self, PaletteError> {
        if rgba.len() % 4 != 0 {
            return Err(PaletteError::InvalidPixelDataLength(rgba.len()));
        }

        let pixels = rgba
            .chunks_exact(4)
            .map(|px| Color::from([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Builds a buffer from top-left-origin RGBA bytes, as produced by most
    /// image decoders, by reversing the row order.
    pub fn from_top_down_rgba(
        width: usize,
        height: usize,
        rgba: &[u8],
    ) -> Result<Self, PaletteError> {
        let top_down = Self::from_rgba_bytes(width, height, rgba)?;
        if width == 0 {
            return Ok(top_down);
        }

        let pixels = top_down
            .pixels
            .chunks_exact(width)
            .rev()
            .flatten()
            .copied()
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Row `source_row` as stored, counting from the bottom of the image.
    /// Returns `None` past the last row.
    pub fn row(&self, source_row: usize) -> Option<&[Color]> {
        if source_row >= self.height {
            return None;
        }
        Some(self.source_row(source_row))
    }

    /// Caller guarantees `source_row < height`.
    fn source_row(&self, source_row: usize) -> &[Color] {
        let start = source_row * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Flattens the buffer into top-left-origin RGBA bytes.
    pub fn to_top_down_rgba(&self) -> Vec<u8> {
        (0..self.height)
            .rev()
            .flat_map(|row| self.source_row(row).iter().flat_map(|c| c.to_rgba()))
            .collect()
    }
}

/// Unique colors in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }
}

/// Palette indices, `height` rows of `width` entries, row 0 at the top.
pub type IndexGrid = Vec<Vec<usize>>;

/// Assigns palette indices to every pixel of `buffer`.
///
/// Output row `y` reads source row `height - 1 - y`, so the grid is top-down
/// while the buffer is bottom-up. Colors are numbered in the order they are
/// first met scanning the output rows top to bottom, left to right.
///
/// # Returns
/// The palette and the index grid. A zero-area buffer gives an empty palette.
pub fn build(buffer: &PixelBuffer) -> (Palette, IndexGrid) {
    let height = buffer.height();
    let mut lookup: HashMap<Color, usize> = HashMap::new();
    let mut palette = Palette::default();
    let mut grid = Vec::with_capacity(height);

    for y in 0..height {
        let source_row = buffer.source_row(height - 1 - y);
        let mut row = Vec::with_capacity(source_row.len());

        for &color in source_row {
            let index = *lookup.entry(color).or_insert_with(|| {
                palette.colors.push(color);
                palette.colors.len() - 1
            });
            row.push(index);
        }
        grid.push(row);
    }

    debug!(
        "Palette built: {} colors for {}x{} pixels",
        palette.len(),
        buffer.width(),
        height
    );
    (palette, grid)
}
