use serde::{Deserialize, Serialize};

use crate::palette::{IndexGrid, Palette};

/// In-memory form of an emitted document. Field order here is the field
/// order of the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub palette: Vec<String>,
    pub pixels: IndexGrid,
}

impl Document {
    pub fn new(
        name: &str,
        width: usize,
        height: usize,
        palette: &Palette,
        pixels: IndexGrid,
    ) -> Self {
        Self {
            name: name.to_owned(),
            width,
            height,
            palette: palette.to_hex_strings(),
            pixels,
        }
    }
}
