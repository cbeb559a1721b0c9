//! Decoded-image handle shared by the extractor and the point sampler.

use anyhow::{bail, Result};
use image::{DynamicImage, RgbaImage};

/// An opaque decoded bitmap: RGBA8 pixels in row-major order.
///
/// The scanner is agnostic to where the pixels came from (camera, photo
/// library, file on disk); callers hand over a buffer and its dimensions.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Wrap a raw RGBA8 buffer. The buffer length must match the
    /// dimensions exactly.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            bail!(
                "RGBA buffer is {} bytes, {}x{} needs {}",
                data.len(),
                width,
                height,
                expected
            );
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            data: rgba.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA channels of the pixel at (x, y). Callers stay in bounds.
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    pub(crate) fn to_rgba_image(&self) -> RgbaImage {
        // Length is validated at construction, from_raw cannot fail here.
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("bitmap buffer length matches dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(Bitmap::from_rgba8(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn pixel_indexing_is_row_major() {
        let mut data = vec![0u8; 2 * 2 * 4];
        // (1, 0) red, (0, 1) green
        data[4] = 255;
        data[3] = 255;
        data[7] = 255;
        data[8 + 1] = 255;
        data[8 + 3] = 255;
        let bmp = Bitmap::from_rgba8(2, 2, data).unwrap();
        assert_eq!(bmp.pixel(1, 0), [255, 0, 0, 255]);
        assert_eq!(bmp.pixel(0, 1), [0, 255, 0, 255]);
    }

    #[test]
    fn from_image_preserves_dimensions() {
        let img = DynamicImage::new_rgba8(3, 5);
        let bmp = Bitmap::from_image(&img);
        assert_eq!((bmp.width(), bmp.height()), (3, 5));
    }
}
