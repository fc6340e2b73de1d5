use log::info;
use thiserror::Error;

use crate::constants::FILE_EXT;
use crate::document::{emit, EmitError};
use crate::palette::{build, PaletteError, PixelBuffer};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid pixel buffer")]
    InvalidBuffer(#[from] PaletteError),
    #[error("Failed to emit document")]
    Emit(#[from] EmitError),
}

/// Output of a single conversion, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub document: String,
    pub file_name: String,
}

/// Builds the palette for `buffer` and emits the document named `name`.
pub fn convert(name: &str, buffer: &PixelBuffer) -> Result<Conversion, ConvertError> {
    info!(
        "Converting '{}' ({}x{})",
        name,
        buffer.width(),
        buffer.height()
    );

    let (palette, grid) = build(buffer);
    let document = emit(name, buffer.width(), buffer.height(), &palette, &grid)?;

    Ok(Conversion {
        document,
        file_name: suggested_file_name(name),
    })
}

/// The input name with the document extension appended. No other
/// path handling is done.
pub fn suggested_file_name(name: &str) -> String {
    format!("{}.{}", name, FILE_EXT)
}
