//! Image validation for photos handed to the image-to-text collaborator.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use thiserror::Error;

/// Allowed image formats for ingredient photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image is empty")]
    Empty,

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Failed to read image: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0:?}. Allowed: JPEG, PNG, GIF, WebP")]
    Unsupported(ImageFormat),
}

/// Check size and format by sniffing the header bytes.
///
/// Returns the content type on success (e.g., "image/jpeg"). The image is
/// not decoded.
pub fn validate_image(data: &[u8]) -> Result<String, ImageError> {
    if data.is_empty() {
        return Err(ImageError::Empty);
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(ImageError::TooLarge {
            size: data.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader.format().ok_or(ImageError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(ImageError::Unsupported(format));
    }

    Ok(format.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbImage::new(2, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_validate_png() {
        assert_eq!(validate_image(&tiny_png()).unwrap(), "image/png");
    }

    #[test]
    fn test_jpeg_header_is_enough() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(validate_image(&jpeg_header).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_validate_invalid_format() {
        let result = validate_image(b"not an image");
        assert!(matches!(result, Err(ImageError::UnknownFormat)));
    }

    #[test]
    fn test_empty_and_oversized() {
        assert!(matches!(validate_image(&[]), Err(ImageError::Empty)));
        let big = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(matches!(
            validate_image(&big),
            Err(ImageError::TooLarge { .. })
        ));
    }
}
