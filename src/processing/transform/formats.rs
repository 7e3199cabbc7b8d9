//! Encoding of transformed images into their target format.

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use crate::utils::{ImageFormat, TaskError, TaskResult};

/// Encodes `image` as `format` into an in-memory buffer.
///
/// Only JPEG honours `quality`; PNG and WebP are written lossless.
pub fn encode_image(image: &DynamicImage, format: ImageFormat, quality: u8) -> TaskResult<Vec<u8>> {
    let mut buffer = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))
                .map_err(|e| TaskError::transform(format!("JPEG encode failed: {e}")))?;
        }
        ImageFormat::Png => {
            image
                .write_with_encoder(PngEncoder::new(&mut buffer))
                .map_err(|e| TaskError::transform(format!("PNG encode failed: {e}")))?;
        }
        ImageFormat::WebP => {
            // The WebP encoder only takes 8-bit RGB(A)
            let eight_bit = if image.color().has_alpha() {
                DynamicImage::ImageRgba8(image.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(image.to_rgb8())
            };
            eight_bit
                .write_with_encoder(WebPEncoder::new_lossless(&mut buffer))
                .map_err(|e| TaskError::transform(format!("WebP encode failed: {e}")))?;
        }
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_supported_format() {
        let image = DynamicImage::new_rgba8(4, 4);
        for format in [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP] {
            let bytes = encode_image(&image, format, 80).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), format.codec());
        }
    }
}
