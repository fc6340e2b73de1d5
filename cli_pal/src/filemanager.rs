use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageError, RgbaImage};
use lib_pal::constants::DEFAULT_NAME;
use lib_pal::{convert, ConvertError, Conversion, Document, LoadError};
use log::{debug, info};
use thiserror::Error;

use crate::source::{open_image, ImageSource};
use crate::ConvertArgs;

#[derive(Error, Debug)]
pub enum ImageHandlingError {
    #[error("Invalid file path")]
    InvalidPath,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("Conversion error: {0}")]
    ConvertError(#[from] ConvertError),

    #[error("Document load error: {0}")]
    LoadError(#[from] LoadError),

    #[error("Image dimensions {0}x{1} are too large to save")]
    DimensionsTooLarge(usize, usize),
}

/// Decodes `args.input`, converts it and writes the document into
/// `args.out_dir`. Returns the path written.
pub fn convert_image(args: &ConvertArgs) -> Result<PathBuf, ImageHandlingError> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => document_name(&args.input)?,
    };

    let image = open_image(&args.input)?;
    let buffer = image.pixel_buffer().map_err(ConvertError::from)?;
    let conversion = convert(&name, &buffer)?;

    save_document(&args.out_dir, &conversion)
}

/// Name derived from the input file stem.
fn document_name(path: &Path) -> Result<String, ImageHandlingError> {
    let stem = path.file_stem().ok_or(ImageHandlingError::InvalidPath)?;
    let stem = stem.to_str().ok_or(ImageHandlingError::InvalidPath)?;
    if stem.is_empty() {
        return Ok(DEFAULT_NAME.to_owned());
    }
    Ok(stem.to_owned())
}

pub fn save_document(dir: &Path, conversion: &Conversion) -> Result<PathBuf, ImageHandlingError> {
    if !dir.exists() {
        debug!("Creating output directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }

    let path = dir.join(&conversion.file_name);
    fs::write(&path, &conversion.document)?;
    info!("File saved successfully to {}", path.display());

    Ok(path)
}

/// Reads a document and writes its pixels to `output` as an image.
pub fn restore_image(input: &Path, output: &Path) -> Result<(), ImageHandlingError> {
    let text = fs::read_to_string(input)?;
    let document = Document::parse(&text)?;
    let buffer = document.to_pixel_buffer()?;

    let (width, height) = (buffer.width(), buffer.height());
    let too_large = || ImageHandlingError::DimensionsTooLarge(width, height);
    let image = RgbaImage::from_raw(
        u32::try_from(width).map_err(|_| too_large())?,
        u32::try_from(height).map_err(|_| too_large())?,
        buffer.to_top_down_rgba(),
    )
    .ok_or_else(too_large)?;

    image.save(output)?;
    info!("Restored '{}' to {}", document.name, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn write_png(dir: &Path) -> PathBuf {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

        let path = dir.join("tiny.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_convert_writes_named_document() {
        let tmp = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input: write_png(tmp.path()),
            name: None,
            out_dir: tmp.path().join("PixelImages"),
        };

        let path = convert_image(&args).unwrap();
        assert_eq!(path, tmp.path().join("PixelImages").join("tiny.json"));

        let document = Document::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document.name, "tiny");
        assert_eq!(document.palette, vec!["#FF0000FF", "#00FF00FF", "#0000FFFF"]);
        assert_eq!(document.pixels, vec![vec![0, 1], vec![2, 0]]);
    }

    #[test]
    fn test_name_override() {
        let tmp = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input: write_png(tmp.path()),
            name: Some("hero".to_owned()),
            out_dir: tmp.path().to_path_buf(),
        };

        let path = convert_image(&args).unwrap();
        assert_eq!(path.file_name().unwrap(), "hero.json");
    }

    #[test]
    fn test_restore_matches_source() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_png(tmp.path());
        let args = ConvertArgs {
            input: input.clone(),
            name: None,
            out_dir: tmp.path().to_path_buf(),
        };
        let document = convert_image(&args).unwrap();

        let restored = tmp.path().join("restored.png");
        restore_image(&document, &restored).unwrap();

        let original = image::open(&input).unwrap().to_rgba8();
        let roundtrip = image::open(&restored).unwrap().to_rgba8();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let args = ConvertArgs {
            input: tmp.path().join("missing.png"),
            name: None,
            out_dir: tmp.path().to_path_buf(),
        };

        assert!(matches!(
            convert_image(&args),
            Err(ImageHandlingError::ImageError(_))
        ));
    }
}
