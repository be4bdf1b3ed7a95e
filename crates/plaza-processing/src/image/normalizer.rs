//! Image normalizer
//!
//! Decodes a raw image, rescales it to fit the configured bounds while
//! preserving aspect ratio, and re-encodes it as a JPEG data URI. If the
//! first pass exceeds the byte budget, a single more aggressive pass is made
//! and its result used unconditionally; there is no third attempt.
//!
//! Decode and encode run on a blocking thread under a timeout, so callers
//! always receive either a result or a typed failure.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use image::DynamicImage;
use plaza_core::config::{CompressionPass, NormalizerConfig};
use plaza_core::AppError;
use std::io::Cursor;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Result of one normalization: the encoded data URI plus the dimensions it
/// was encoded at and the byte-size estimate derived from the base64 length.
#[derive(Clone, Debug)]
pub struct NormalizedImage {
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
    pub estimated_bytes: usize,
}

/// Normalizes raw images into bounded, budgeted JPEG data URIs.
#[derive(Clone, Debug)]
pub struct ImageNormalizer {
    config: NormalizerConfig,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl ImageNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize a raw image into a JPEG data URI.
    ///
    /// The CPU-bound decode/encode cycle runs on a blocking thread; if it
    /// does not finish within the configured timeout the call fails with
    /// [`AppError::DecodeTimeout`] instead of hanging.
    pub async fn normalize(&self, data: Bytes) -> Result<NormalizedImage, AppError> {
        let config = self.config.clone();
        let timeout = config.decode_timeout;
        let timeout_secs = timeout.as_secs();

        let task = tokio::task::spawn_blocking(move || Self::normalize_blocking(&config, &data));

        match tokio::time::timeout(timeout, task).await {
            Err(_) => {
                tracing::warn!(timeout_secs, "Image normalization timed out");
                Err(AppError::DecodeTimeout(timeout_secs))
            }
            Ok(Err(join_err)) => Err(AppError::Internal(format!(
                "Normalization task failed: {}",
                join_err
            ))),
            Ok(Ok(result)) => result,
        }
    }

    fn normalize_blocking(config: &NormalizerConfig, data: &[u8]) -> Result<NormalizedImage, AppError> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| AppError::ImageProcessing(format!("Unreadable image data: {}", e)))?
            .decode()
            .map_err(|e| AppError::ImageProcessing(format!("Failed to decode image: {}", e)))?;

        let first = Self::encode_pass(&img, &config.primary)?;
        if first.estimated_bytes <= config.byte_budget {
            return Ok(first);
        }

        tracing::debug!(
            estimated_bytes = first.estimated_bytes,
            byte_budget = config.byte_budget,
            "First pass over budget, re-encoding at fallback settings"
        );

        // Fixed two-step policy: the fallback result is final even if still
        // over budget.
        Self::encode_pass(&img, &config.fallback)
    }

    /// Compute output dimensions for one pass. The larger axis is clamped to
    /// its bound and the other scaled proportionally; images already inside
    /// the bounds are never upscaled.
    fn fit_dimensions(width: u32, height: u32, pass: &CompressionPass) -> (u32, u32) {
        let ratio = if width >= height {
            (pass.max_width as f64 / width as f64).min(1.0)
        } else {
            (pass.max_height as f64 / height as f64).min(1.0)
        };

        let out_w = ((width as f64 * ratio).round() as u32).max(1);
        let out_h = ((height as f64 * ratio).round() as u32).max(1);
        (out_w, out_h)
    }

    fn encode_pass(img: &DynamicImage, pass: &CompressionPass) -> Result<NormalizedImage, AppError> {
        use image::GenericImageView;

        let (width, height) = img.dimensions();
        let (out_w, out_h) = Self::fit_dimensions(width, height, pass);

        let resized = if (out_w, out_h) == (width, height) {
            img.clone()
        } else {
            img.resize_exact(out_w, out_h, image::imageops::FilterType::Lanczos3)
        };

        let jpeg = Self::encode_jpeg(&resized, pass.quality)?;
        let data_uri = format!("{}{}", DATA_URI_PREFIX, BASE64.encode(&jpeg));
        let estimated_bytes = Self::estimate_bytes(&data_uri);

        Ok(NormalizedImage {
            data_uri,
            width: out_w,
            height: out_h,
            estimated_bytes,
        })
    }

    /// Encode to JPEG using mozjpeg. Quality is a fraction in (0, 1] mapped
    /// to the encoder's 0-100 scale.
    fn encode_jpeg(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, AppError> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality((quality * 100.0).clamp(1.0, 100.0));
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(|e| AppError::ImageProcessing(format!("JPEG encoder start failed: {}", e)))?;
        comp.write_scanlines(&rgb_img)
            .map_err(|e| AppError::ImageProcessing(format!("JPEG encode failed: {}", e)))?;
        comp.finish()
            .map_err(|e| AppError::ImageProcessing(format!("JPEG finish failed: {}", e)))
    }

    /// Approximate binary size from the base64 payload length (text length
    /// times 3/4). Good to within a few bytes of padding.
    pub fn estimate_bytes(data_uri: &str) -> usize {
        let payload_len = data_uri
            .split_once(',')
            .map(|(_, payload)| payload.len())
            .unwrap_or(data_uri.len());
        payload_len * 3 / 4
    }

    /// Decode a data URI produced by [`normalize`](Self::normalize) back into
    /// raw JPEG bytes.
    pub fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>, AppError> {
        let payload = data_uri
            .split_once(',')
            .map(|(_, payload)| payload)
            .ok_or_else(|| AppError::InvalidInput("Not a data URI".to_string()))?;
        BASE64
            .decode(payload)
            .map_err(|e| AppError::InvalidInput(format!("Invalid base64 payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Bytes {
        // Gradient, so the JPEG does not collapse to a trivially small file
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    fn pass(max_width: u32, max_height: u32) -> CompressionPass {
        CompressionPass {
            max_width,
            max_height,
            quality: 0.7,
        }
    }

    #[test]
    fn test_fit_dimensions_landscape() {
        // width >= height: width clamps to the bound, height scales
        let (w, h) = ImageNormalizer::fit_dimensions(1600, 800, &pass(800, 600));
        assert_eq!((w, h), (800, 400));
    }

    #[test]
    fn test_fit_dimensions_portrait() {
        // height > width: height clamps to the bound, width scales
        let (w, h) = ImageNormalizer::fit_dimensions(600, 1200, &pass(800, 600));
        assert_eq!((w, h), (300, 600));
    }

    #[test]
    fn test_fit_dimensions_never_upscales() {
        let (w, h) = ImageNormalizer::fit_dimensions(200, 100, &pass(800, 600));
        assert_eq!((w, h), (200, 100));
    }

    #[test]
    fn test_fit_dimensions_square() {
        let (w, h) = ImageNormalizer::fit_dimensions(1000, 1000, &pass(800, 600));
        assert_eq!((w, h), (800, 800));
    }

    #[test]
    fn test_estimate_bytes() {
        // 8 base64 chars encode 6 bytes
        assert_eq!(ImageNormalizer::estimate_bytes("data:image/jpeg;base64,AAAAAAAA"), 6);
    }

    #[tokio::test]
    async fn test_normalize_bounds_landscape() {
        let normalizer = ImageNormalizer::default();
        let result = normalizer.normalize(png_bytes(1600, 800)).await.unwrap();

        assert!(result.data_uri.starts_with(DATA_URI_PREFIX));
        assert_eq!((result.width, result.height), (800, 400));

        let jpeg = ImageNormalizer::decode_data_uri(&result.data_uri).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        use image::GenericImageView;
        assert_eq!(decoded.dimensions(), (800, 400));
    }

    #[tokio::test]
    async fn test_normalize_keeps_small_images() {
        let normalizer = ImageNormalizer::default();
        let result = normalizer.normalize(png_bytes(320, 200)).await.unwrap();
        assert_eq!((result.width, result.height), (320, 200));
    }

    #[tokio::test]
    async fn test_normalize_is_size_monotone() {
        // Re-normalizing an already-normalized image must not grow it
        let normalizer = ImageNormalizer::default();
        let first = normalizer.normalize(png_bytes(1200, 900)).await.unwrap();

        let jpeg = ImageNormalizer::decode_data_uri(&first.data_uri).unwrap();
        let second = normalizer.normalize(Bytes::from(jpeg)).await.unwrap();

        // Re-encoding may shift a few bytes; it must not meaningfully grow
        let margin = first.estimated_bytes / 20;
        assert!(second.estimated_bytes <= first.estimated_bytes + margin);
        assert_eq!((second.width, second.height), (first.width, first.height));
    }

    #[tokio::test]
    async fn test_normalize_rejects_garbage() {
        let normalizer = ImageNormalizer::default();
        let err = normalizer
            .normalize(Bytes::from_static(b"definitely not an image"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageProcessing(_)));
    }

    #[tokio::test]
    async fn test_zero_timeout_yields_typed_error() {
        let config = NormalizerConfig {
            decode_timeout: std::time::Duration::ZERO,
            ..NormalizerConfig::default()
        };
        let normalizer = ImageNormalizer::new(config);

        let err = normalizer.normalize(png_bytes(1600, 800)).await.unwrap_err();
        assert!(matches!(err, AppError::DecodeTimeout(0)));
    }

    #[tokio::test]
    async fn test_fallback_pass_when_over_budget() {
        // Tiny budget forces the second pass; output must match the fallback
        // bounds and be accepted even though it is still over budget.
        let config = NormalizerConfig {
            byte_budget: 64,
            ..NormalizerConfig::default()
        };
        let normalizer = ImageNormalizer::new(config);
        let result = normalizer.normalize(png_bytes(1600, 800)).await.unwrap();
        assert_eq!((result.width, result.height), (600, 300));
        assert!(result.estimated_bytes > 64);
    }
}
