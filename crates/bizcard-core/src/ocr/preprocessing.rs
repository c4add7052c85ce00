//! Image preprocessing for OCR.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::models::config::OcrConfig;

/// Image preprocessor applied before recognition.
///
/// Downscales oversized images, converts to grayscale, raises contrast and
/// sharpens, in that order.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
    /// Contrast adjustment (percent).
    contrast: f32,
    /// Unsharp mask sigma.
    sharpen_sigma: f32,
    /// Unsharp mask threshold.
    sharpen_threshold: i32,
    /// Run any preprocessing at all.
    enabled: bool,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self::from_config(&OcrConfig::default())
    }

    /// Create a preprocessor from OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            max_size: config.max_image_size,
            contrast: config.contrast,
            sharpen_sigma: config.sharpen_sigma,
            sharpen_threshold: config.sharpen_threshold,
            enabled: config.preprocess,
        }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Enable or disable preprocessing.
    pub fn with_enhancement(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Prepare an image for recognition.
    ///
    /// A disabled preprocessor returns the image unchanged.
    pub fn process(&self, image: &DynamicImage) -> DynamicImage {
        if !self.enabled {
            return image.clone();
        }

        let (width, height) = image.dimensions();
        let (new_width, new_height) = self.calculate_resize_dimensions(width, height);

        let mut output = if (new_width, new_height) != (width, height) {
            debug!(
                "Resizing image {}x{} -> {}x{}",
                width, height, new_width, new_height
            );
            image.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
        } else {
            image.clone()
        };

        output = output.grayscale();
        if self.contrast != 0.0 {
            output = output.adjust_contrast(self.contrast);
        }
        if self.sharpen_sigma > 0.0 {
            output = output.unsharpen(self.sharpen_sigma, self.sharpen_threshold);
        }

        output
    }

    /// Fit within `max_size` on the longer side, keeping aspect ratio.
    ///
    /// Images are never upscaled.
    pub fn calculate_resize_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let longer = width.max(height);
        if longer <= self.max_size || longer == 0 {
            return (width, height);
        }

        let scale = self.max_size as f32 / longer as f32;
        let new_width = ((width as f32 * scale).round() as u32).max(1);
        let new_height = ((height as f32 * scale).round() as u32).max(1);
        (new_width, new_height)
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_resize_dimensions() {
        let preprocessor = ImagePreprocessor::new().with_max_size(1000);

        // Image smaller than target
        assert_eq!(preprocessor.calculate_resize_dimensions(500, 300), (500, 300));

        // Image larger than target
        let (w, h) = preprocessor.calculate_resize_dimensions(2000, 1000);
        assert_eq!((w, h), (1000, 500));

        // Portrait
        let (w, h) = preprocessor.calculate_resize_dimensions(1000, 4000);
        assert_eq!((w, h), (250, 1000));
    }

    #[test]
    fn test_process_outputs_grayscale() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([200, 30, 30])));
        let processed = ImagePreprocessor::new().process(&image);

        assert_eq!(processed.dimensions(), (40, 20));
        let rgb = processed.to_rgb8();
        let pixel = rgb.get_pixel(5, 5);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_disabled_preprocessing_keeps_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 150, Rgb([200, 30, 30])));
        let processed = ImagePreprocessor::new()
            .with_max_size(100)
            .with_enhancement(false)
            .process(&image);

        assert_eq!(processed.dimensions(), (300, 150));
        assert_eq!(processed.to_rgb8().get_pixel(0, 0), &Rgb([200, 30, 30]));
    }

    #[test]
    fn test_default_contrast_is_one_and_a_half() {
        let config = OcrConfig {
            sharpen_sigma: 0.0,
            ..OcrConfig::default()
        };
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([150])));
        let processed = ImagePreprocessor::from_config(&config).process(&image);

        // 127.5 + (150 - 127.5) * 1.5 = 161.25
        assert_eq!(processed.to_luma8().get_pixel(0, 0), &Luma([161]));
    }

    #[test]
    fn test_process_downscales() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(300, 150));
        let processed = ImagePreprocessor::new().with_max_size(100).process(&image);
        assert_eq!(processed.dimensions(), (100, 50));
    }
}
