pub mod constants;
pub mod convert;
pub mod document;
pub mod palette;

use log::*;
use std::io::Write;

pub use crate::convert::{convert, suggested_file_name, ConvertError, Conversion};
pub use crate::document::{emit, Document, EmitError, LoadError};
pub use crate::palette::{build, Color, IndexGrid, Palette, PaletteError, PixelBuffer};

/// Sends log output to stderr. Directives from `RUST_LOG` are applied on top
/// of `level`.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter(Some("lib_pal"), level)
        .filter(Some("pal_json"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
