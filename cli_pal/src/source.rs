use std::path::Path;

use image::{DynamicImage, GenericImageView};
use lib_pal::{PaletteError, PixelBuffer};
use log::debug;

/// Something that can hand over its pixels for conversion.
pub trait ImageSource {
    /// Get the dimensions of the image (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Pixels as a bottom-up buffer, the row order the converter expects
    fn pixel_buffer(&self) -> Result<PixelBuffer, PaletteError>;
}

impl ImageSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn pixel_buffer(&self) -> Result<PixelBuffer, PaletteError> {
        let (width, height) = ImageSource::dimensions(self);
        let rgba = self.to_rgba8();
        PixelBuffer::from_top_down_rgba(width as usize, height as usize, rgba.as_raw())
    }
}

pub fn open_image(path: &Path) -> Result<DynamicImage, image::ImageError> {
    let image = image::open(path)?;
    debug!(
        "Decoded {} as {:?}, {}x{}",
        path.display(),
        image.color(),
        image.width(),
        image.height()
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use lib_pal::Color;

    #[test]
    fn test_decoded_rows_become_bottom_up() {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255])); // top
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255])); // bottom

        let buffer = DynamicImage::ImageRgba8(img).pixel_buffer().unwrap();
        assert_eq!(
            buffer.pixels(),
            &[Color::new(0, 0, 255, 255), Color::new(255, 0, 0, 255)]
        );
    }
}
