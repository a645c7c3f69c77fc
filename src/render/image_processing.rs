use std::cell::OnceCell;

use image::{imageops, RgbaImage};

/// Gaussian sigma shared by every blur redaction.
pub const BLUR_SIGMA: f32 = 15.0;

/// Reduction applied before blurring a whole image of `width` x `height`.
pub(crate) fn blur_downsample_factor(width: u32, height: u32, sigma: f32) -> u32 {
    let area = width.saturating_mul(height);
    if area < 32_768 || sigma < 6.0 {
        return 1;
    }
    if area >= 262_144 && sigma >= 10.0 {
        return 4;
    }
    if area >= 65_536 && sigma >= 8.0 {
        return 3;
    }
    2
}

/// Blurs the entire base image for the session's blurred copy. Blur
/// redactions later copy their rectangles out of the result. Large images
/// are blurred at reduced resolution and scaled back to full size.
pub(crate) fn blur_image(source: &RgbaImage, sigma: f32) -> RgbaImage {
    let width = source.width();
    let height = source.height();
    let downsample = blur_downsample_factor(width, height, sigma)
        .min(width.max(1))
        .min(height.max(1));
    if downsample <= 1 {
        return imageops::blur(source, sigma);
    }

    let reduced_width = (width / downsample).max(1);
    let reduced_height = (height / downsample).max(1);
    let reduced = imageops::resize(
        source,
        reduced_width,
        reduced_height,
        imageops::FilterType::Triangle,
    );
    let reduced_sigma = (sigma / downsample as f32).max(0.8);
    let blurred = imageops::blur(&reduced, reduced_sigma);
    imageops::resize(&blurred, width, height, imageops::FilterType::Triangle)
}

/// Lazily computed blurred copy of the base image. The base never changes
/// within a session and the radius is fixed, so one copy serves every blur
/// redaction in both render modes.
#[derive(Debug, Default)]
pub struct BlurCache {
    blurred: OnceCell<RgbaImage>,
}

impl BlurCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blurred<'a>(&'a self, base: &RgbaImage) -> &'a RgbaImage {
        self.blurred.get_or_init(|| {
            tracing::debug!(
                width = base.width(),
                height = base.height(),
                sigma = BLUR_SIGMA,
                "computing blurred base image"
            );
            blur_image(base, BLUR_SIGMA)
        })
    }

    pub fn is_ready(&self) -> bool {
        self.blurred.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_factor_grows_with_area_and_sigma() {
        assert_eq!(blur_downsample_factor(100, 100, BLUR_SIGMA), 1);
        assert_eq!(blur_downsample_factor(256, 256, 5.0), 1);
        assert_eq!(blur_downsample_factor(256, 200, 7.0), 2);
        assert_eq!(blur_downsample_factor(256, 256, 9.0), 3);
        assert_eq!(blur_downsample_factor(1920, 1080, BLUR_SIGMA), 4);
    }

    #[test]
    fn blur_image_preserves_dimensions() {
        let mut source = RgbaImage::new(640, 480);
        for (x, _, pixel) in source.enumerate_pixels_mut() {
            *pixel = image::Rgba([(x % 256) as u8, 120, 50, 255]);
        }
        let blurred = blur_image(&source, BLUR_SIGMA);
        assert_eq!(blurred.dimensions(), source.dimensions());
    }

    #[test]
    fn blur_cache_computes_once_on_first_use() {
        let base = RgbaImage::from_pixel(16, 16, image::Rgba([200, 10, 10, 255]));
        let cache = BlurCache::new();
        assert!(!cache.is_ready());

        let first = cache.blurred(&base) as *const RgbaImage;
        let second = cache.blurred(&base) as *const RgbaImage;
        assert!(cache.is_ready());
        assert_eq!(first, second);
    }
}
