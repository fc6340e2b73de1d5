use log::{debug, error};
use thiserror::Error;

use super::format::Document;
use crate::palette::{Color, Palette, PaletteError, PixelBuffer};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid palette color: {0:?}")]
    InvalidColor(String),
    #[error("Invalid palette index: {0} exceeds palette size of {1}")]
    InvalidPaletteIndex(usize, usize),
    #[error("Row count mismatch: height is {expected}, found {found} rows")]
    RowCountMismatch { expected: usize, found: usize },
    #[error("Row {row} has {found} entries, expected width {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid pixel buffer")]
    Buffer(#[from] PaletteError),
}

impl Document {
    /// Reads a document previously produced by [`crate::document::emit`].
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let document: Self = serde_json::from_str(text)?;
        debug!(
            "Document '{}' parsed: {}x{}, {} palette entries",
            document.name,
            document.width,
            document.height,
            document.palette.len()
        );
        Ok(document)
    }

    pub fn palette_colors(&self) -> Result<Palette, LoadError> {
        let colors = self
            .palette
            .iter()
            .map(|hex| Color::from_hex(hex).ok_or_else(|| LoadError::InvalidColor(hex.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Palette { colors })
    }

    /// Expands the index grid back into a bottom-up pixel buffer, undoing the
    /// vertical flip applied when the document was built.
    ///
    /// # Errors
    /// - Returns `LoadError::InvalidColor` for a palette entry that is not hex
    /// - Returns `LoadError::RowCountMismatch` / `RowWidthMismatch` when the
    ///   grid disagrees with `width` and `height`
    /// - Returns `LoadError::InvalidPaletteIndex` if any index exceeds the palette size
    pub fn to_pixel_buffer(&self) -> Result<PixelBuffer, LoadError> {
        let palette = self.palette_colors()?;

        if self.pixels.len() != self.height {
            error!(
                "Document '{}' declares height {} but holds {} rows",
                self.name,
                self.height,
                self.pixels.len()
            );
            return Err(LoadError::RowCountMismatch {
                expected: self.height,
                found: self.pixels.len(),
            });
        }

        for (row_index, row) in self.pixels.iter().enumerate() {
            if row.len() != self.width {
                return Err(LoadError::RowWidthMismatch {
                    row: row_index,
                    expected: self.width,
                    found: row.len(),
                });
            }
        }

        let mut pixels = Vec::with_capacity(self.pixels.iter().map(Vec::len).sum());
        for row in self.pixels.iter().rev() {
            for &index in row {
                let color = palette
                    .get(index)
                    .ok_or(LoadError::InvalidPaletteIndex(index, palette.len()))?;
                pixels.push(color);
            }
        }

        Ok(PixelBuffer::new(self.width, self.height, pixels)?)
    }
}
