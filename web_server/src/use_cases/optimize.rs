use image::{DynamicImage, codecs::jpeg::JpegEncoder};

// Longest side allowed before an image is downscaled.
pub const MAX_DIMENSION: u32 = 2000;
pub const JPEG_QUALITY: u8 = 85;

// Downscale oversized images and re-encode them as JPEG.
// Returns `None` when the payload should be sent unchanged (PDFs, undecodable data).
pub fn optimize_image(bytes: &[u8]) -> Option<Vec<u8>> {
    if bytes.starts_with(b"%PDF") {
        return None;
    }

    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(error = %err, "could not decode image for optimization");
            return None;
        }
    };

    let resized = if decoded.width() > MAX_DIMENSION || decoded.height() > MAX_DIMENSION {
        decoded.thumbnail(MAX_DIMENSION, MAX_DIMENSION)
    } else {
        decoded
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut encoded = Vec::new();
    if let Err(err) = rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)) {
        tracing::warn!(error = %err, "could not re-encode image as jpeg");
        return None;
    }

    Some(encoded)
}
