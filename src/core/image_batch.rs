use crate::errors::ImageDataError;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// One image as the host's float tensor: row-major height x width x channels.
#[derive(Debug, Clone, Deserialize)]
pub struct TensorImage {
    pub width: u32,
    pub height: u32,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl TensorImage {
    pub fn to_image(&self) -> Result<DynamicImage, ImageDataError> {
        image_from_unit_floats(self.width, self.height, self.channels, &self.data)
    }
}

/// An ordered batch of decoded images submitted in one save call.
#[derive(Debug, Clone, Default)]
pub struct ImageBatch {
    images: Vec<DynamicImage>,
}

impl ImageBatch {
    pub fn new(images: Vec<DynamicImage>) -> Self {
        ImageBatch { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicImage> {
        self.images.iter()
    }

    /// Width and height of the first image; the whole batch is named after it.
    pub fn first_dimensions(&self) -> Option<(u32, u32)> {
        self.images.first().map(|img| (img.width(), img.height()))
    }

    pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ImageDataError> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let img = image::open(path).map_err(|source| ImageDataError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("Loaded '{}' ({}x{})", path.display(), img.width(), img.height());
            images.push(img);
        }
        Ok(ImageBatch::new(images))
    }

    pub fn from_tensors(tensors: &[TensorImage]) -> Result<Self, ImageDataError> {
        let images = tensors
            .iter()
            .map(TensorImage::to_image)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ImageBatch::new(images))
    }

    /// Reads a JSON array of [`TensorImage`]s.
    pub fn load_tensor_file(path: &Path) -> Result<Self, ImageDataError> {
        let content = std::fs::read_to_string(path).map_err(|source| ImageDataError::ReadTensors {
            path: path.to_path_buf(),
            source,
        })?;
        let tensors: Vec<TensorImage> = serde_json::from_str(&content).map_err(|source| ImageDataError::ParseTensors {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded {} tensor image(s) from '{}'", tensors.len(), path.display());
        ImageBatch::from_tensors(&tensors)
    }
}

impl From<Vec<DynamicImage>> for ImageBatch {
    fn from(images: Vec<DynamicImage>) -> Self {
        ImageBatch::new(images)
    }
}

/// Converts a height x width x channels tensor of floats in `[0, 1]` into
/// 8-bit pixels. Values are scaled by 255, clamped, then truncated.
pub fn image_from_unit_floats(
    width: u32,
    height: u32,
    channels: usize,
    data: &[f32],
) -> Result<DynamicImage, ImageDataError> {
    if !matches!(channels, 1 | 3 | 4) {
        return Err(ImageDataError::UnsupportedChannels(channels));
    }
    let expected = width as usize * height as usize * channels;
    if data.len() != expected {
        return Err(ImageDataError::LengthMismatch {
            width,
            height,
            channels,
            expected,
            actual: data.len(),
        });
    }

    let bytes: Vec<u8> = data.iter().map(|v| unit_float_to_u8(*v)).collect();
    // Lengths are checked above, so the buffer constructors cannot fail.
    let length_error = || ImageDataError::LengthMismatch {
        width,
        height,
        channels,
        expected,
        actual: data.len(),
    };
    let image = match channels {
        1 => {
            let gray = GrayImage::from_raw(width, height, bytes).ok_or_else(length_error)?;
            DynamicImage::ImageRgb8(DynamicImage::ImageLuma8(gray).to_rgb8())
        }
        3 => DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, bytes).ok_or_else(length_error)?),
        _ => DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, bytes).ok_or_else(length_error)?),
    };
    Ok(image)
}

fn unit_float_to_u8(value: f32) -> u8 {
    let scaled = 255.0 * value;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_truncates_values() {
        assert_eq!(unit_float_to_u8(-0.5), 0);
        assert_eq!(unit_float_to_u8(2.0), 255);
        assert_eq!(unit_float_to_u8(0.5), 127);
        assert_eq!(unit_float_to_u8(f32::NAN), 0);
    }

    #[test]
    fn builds_rgb_from_hwc_tensor() {
        // 2 wide, 1 high: red then blue
        let data = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let img = image_from_unit_floats(2, 1, 3, &data).unwrap();
        let rgb = img.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn grayscale_expands_to_rgb() {
        let img = image_from_unit_floats(1, 1, 1, &[1.0]).unwrap();
        assert!(matches!(img, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            image_from_unit_floats(2, 2, 3, &[0.0; 5]),
            Err(ImageDataError::LengthMismatch { expected: 12, actual: 5, .. })
        ));
        assert!(matches!(
            image_from_unit_floats(1, 1, 2, &[0.0; 2]),
            Err(ImageDataError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn tensor_file_becomes_a_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(
            &path,
            r#"[{"width": 2, "height": 1, "channels": 3, "data": [1.0, 0.0, 0.0, 0.0, 0.0, 1.0]},
               {"width": 1, "height": 1, "channels": 4, "data": [0.0, 1.0, 0.0, 0.5]}]"#,
        )
        .unwrap();

        let batch = ImageBatch::load_tensor_file(&path).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.first_dimensions(), Some((2, 1)));
        assert!(batch.iter().nth(1).unwrap().color().has_alpha());
    }

    #[test]
    fn malformed_tensor_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, r#"[{"width": 2}]"#).unwrap();
        assert!(matches!(
            ImageBatch::load_tensor_file(&path),
            Err(ImageDataError::ParseTensors { .. })
        ));
    }

    #[test]
    fn first_dimensions_come_from_first_image() {
        let batch = ImageBatch::new(vec![
            DynamicImage::new_rgb8(512, 768),
            DynamicImage::new_rgb8(10, 10),
        ]);
        assert_eq!(batch.first_dimensions(), Some((512, 768)));
        assert_eq!(ImageBatch::default().first_dimensions(), None);
    }
}
