//! Conversion of source images into baseline JPEG mapshots.

use std::fs;
use std::path::Path;

use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;

use crate::error::NormalizeError;

/// Quality of the re-encoded mapshots
pub const JPEG_QUALITY: u8 = 75;

/// Decode an image and re-encode it as a three-channel baseline JPEG.
///
/// The format is sniffed from the data first; TGA has no magic number,
/// so the source extension is the fallback.
pub fn normalize(data: &[u8], extension: &str) -> Result<Vec<u8>, NormalizeError> {
    let format = image::guess_format(data)
        .ok()
        .or_else(|| ImageFormat::from_extension(extension));
    let decoded = match format {
        Some(format) => image::load_from_memory_with_format(data, format),
        None => image::load_from_memory(data),
    }
    .map_err(NormalizeError::Decode)?;

    let rgb = decoded.into_rgb8();

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(NormalizeError::Encode)?;
    Ok(encoded)
}

/// Normalize `data` and write it to `out_path`.
///
/// The file is only created once encoding has succeeded.
pub fn write_mapshot(out_path: &Path, data: &[u8], extension: &str) -> Result<(), NormalizeError> {
    let encoded = normalize(data, extension)?;
    fs::write(out_path, encoded).map_err(|source| NormalizeError::Write {
        path: out_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn assert_rgb_jpeg(bytes: &[u8], width: u32, height: u32) {
        assert_eq!(image::guess_format(bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (width, height));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn converts_rgba_png_to_rgb_jpeg() {
        let png = encode(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([200, 10, 10, 128]))),
            ImageFormat::Png,
        );
        assert_rgb_jpeg(&normalize(&png, "png").unwrap(), 8, 6);
    }

    #[test]
    fn converts_grayscale_to_three_channels() {
        let png = encode(
            DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, image::Luma([90]))),
            ImageFormat::Png,
        );
        assert_rgb_jpeg(&normalize(&png, "png").unwrap(), 4, 4);
    }

    #[test]
    fn decodes_tga_by_extension() {
        let tga = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 3, Rgb([0, 120, 255]))),
            ImageFormat::Tga,
        );
        assert_rgb_jpeg(&normalize(&tga, "tga").unwrap(), 5, 3);
    }

    #[test]
    fn sniffs_content_over_misleading_extension() {
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))),
            ImageFormat::Png,
        );
        assert_rgb_jpeg(&normalize(&png, "jpg").unwrap(), 2, 2);
    }

    #[test]
    fn rejects_garbage() {
        let err = normalize(b"not an image", "jpg").unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }

    #[test]
    fn failed_decode_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("broken.jpg");
        assert!(write_mapshot(&out, b"garbage", "png").is_err());
        assert!(!out.exists());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing/dance.jpg");
        let jpg = encode(
            DynamicImage::ImageRgb8(RgbImage::new(2, 2)),
            ImageFormat::Jpeg,
        );
        let err = write_mapshot(&out, &jpg, "jpg").unwrap_err();
        assert!(matches!(err, NormalizeError::Write { .. }));
    }
}
