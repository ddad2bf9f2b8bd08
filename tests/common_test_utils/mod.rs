// Shared helpers for the integration tests.

use image::{DynamicImage, Rgb, RgbImage};
use save_image_dir::app_config::ApplicationConfig;
use save_image_dir::{ImageBatch, NodeSettings, SaveImageNode};
use std::path::Path;

pub fn node_for(output_dir: &Path) -> SaveImageNode {
    SaveImageNode::new(settings_for(output_dir))
}

pub fn settings_for(output_dir: &Path) -> NodeSettings {
    let config = ApplicationConfig {
        output_directory: output_dir.display().to_string(),
        ..ApplicationConfig::default()
    };
    NodeSettings::from_app_config(&config)
}

/// `count` distinct solid-color images of the given size.
pub fn solid_batch(count: usize, width: u32, height: u32) -> ImageBatch {
    ImageBatch::new(
        (0..count)
            .map(|i| DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([(i * 40) as u8, 100, 200]))))
            .collect(),
    )
}
