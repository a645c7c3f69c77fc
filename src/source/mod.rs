use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

use crate::geometry::ImageSize;

#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("failed to read image file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image: {message}")]
    Decode { message: String },
    #[error("image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

pub type ImageSourceResult<T> = std::result::Result<T, ImageSourceError>;

/// Decoded base raster at its intrinsic resolution. Never modified once
/// loaded; every render starts from a copy of these pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseImage {
    pixels: RgbaImage,
}

impl BaseImage {
    pub fn from_rgba(pixels: RgbaImage) -> ImageSourceResult<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageSourceError::Empty { width, height });
        }
        Ok(Self { pixels })
    }

    pub fn from_image(image: DynamicImage) -> ImageSourceResult<Self> {
        Self::from_rgba(image.into_rgba8())
    }

    pub fn from_bytes(bytes: &[u8]) -> ImageSourceResult<Self> {
        let image = image::load_from_memory(bytes).map_err(|err| ImageSourceError::Decode {
            message: err.to_string(),
        })?;
        Self::from_image(image)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ImageSourceResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ImageSourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base = Self::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            width = base.pixels.width(),
            height = base.pixels.height(),
            "loaded base image"
        );
        Ok(base)
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([12, 34, 56, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encode should succeed");
        bytes
    }

    #[test]
    fn from_bytes_decodes_png_at_intrinsic_size() {
        let base = BaseImage::from_bytes(&png_bytes(7, 3)).expect("valid png");
        assert_eq!(base.size(), ImageSize::new(7, 3));
        assert_eq!(*base.pixels().get_pixel(6, 2), Rgba([12, 34, 56, 255]));
    }

    #[test]
    fn from_bytes_rejects_non_image_data() {
        let err = BaseImage::from_bytes(b"definitely not an image").expect_err("should fail");
        assert!(matches!(err, ImageSourceError::Decode { .. }));
    }

    #[test]
    fn from_rgba_rejects_zero_sized_images() {
        let err = BaseImage::from_rgba(RgbaImage::new(0, 5)).expect_err("should fail");
        assert!(matches!(err, ImageSourceError::Empty { width: 0, height: 5 }));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let path = std::env::temp_dir().join("redact-source-missing-file.png");
        let _ = std::fs::remove_file(&path);
        let err = BaseImage::from_path(&path).expect_err("missing file should fail");
        assert!(matches!(err, ImageSourceError::Read { .. }));
    }

    #[test]
    fn from_path_loads_written_png() {
        let path = std::env::temp_dir().join(format!(
            "redact-source-{}-load.png",
            std::process::id()
        ));
        std::fs::write(&path, png_bytes(4, 4)).expect("write fixture");
        let base = BaseImage::from_path(&path).expect("load fixture");
        assert_eq!(base.size(), ImageSize::new(4, 4));
        let _ = std::fs::remove_file(path);
    }
}
