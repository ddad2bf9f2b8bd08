use crate::app_config::ApplicationConfig;
use crate::common::{file_utils, timestamp_utils};
use crate::core::counter_store::FileCounter;
use crate::core::filename_allocator::FilenameAllocator;
use crate::core::filename_template::FilenameTemplate;
use crate::core::image_batch::ImageBatch;
use crate::core::png_writer::{self, PngCompression};
use crate::core::preview_mirror::PreviewMirror;
use crate::errors::SaveError;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const OUTPUT_TYPE: &str = "output";
pub const DEFAULT_FILENAME_PREFIX: &str = "ComfyUI";
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";

/// Settings the node is constructed with, distilled from the app config.
#[derive(Debug, Clone)]
pub struct NodeSettings {
    pub output_dir: PathBuf,
    pub counter_file_name: String,
    pub preview_folder_name: String,
    pub compression: PngCompression,
    pub disable_metadata: bool,
    pub date_format: String,
    pub max_collision_attempts: u32,
}

impl NodeSettings {
    pub fn from_app_config(config: &ApplicationConfig) -> Self {
        NodeSettings {
            output_dir: PathBuf::from(&config.output_directory),
            counter_file_name: config.counter_file_name.clone(),
            preview_folder_name: config.preview_folder_name.clone(),
            compression: PngCompression::from_level(config.png_compression.unwrap_or(4)),
            disable_metadata: config.disable_metadata,
            date_format: config.filename_date_format.clone(),
            max_collision_attempts: config.max_collision_attempts,
        }
    }
}

/// Inputs of one save call, as the host hands them over.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub images: ImageBatch,
    pub filename_prefix: String,
    pub use_custom_path: bool,
    pub custom_path: String,
    pub prompt: Option<Value>,
    pub extra_pnginfo: Option<Map<String, Value>>,
}

impl SaveRequest {
    pub fn new(images: ImageBatch) -> Self {
        SaveRequest {
            images,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            use_custom_path: false,
            custom_path: String::new(),
            prompt: None,
            extra_pnginfo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveResultRecord {
    pub filename: String,
    pub subfolder: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiImages {
    pub images: Vec<SaveResultRecord>,
}

/// `{"ui": {"images": [...]}}`, the payload the host renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub ui: UiImages,
    #[serde(skip)]
    pub saved_paths: Vec<PathBuf>,
}

/// Where a save call writes: the folder for originals and, in custom-path
/// mode, the preview mirror.
struct OutputTarget {
    folder: PathBuf,
    mirror: Option<PreviewMirror>,
}

pub struct SaveImageNode {
    settings: NodeSettings,
    allocator: FilenameAllocator,
}

impl SaveImageNode {
    pub fn new(settings: NodeSettings) -> Self {
        let allocator = FilenameAllocator::new(settings.max_collision_attempts);
        SaveImageNode { settings, allocator }
    }

    pub fn settings(&self) -> &NodeSettings {
        &self.settings
    }

    pub fn counter(&self) -> FileCounter {
        FileCounter::in_directory(&self.settings.output_dir, &self.settings.counter_file_name)
    }

    pub fn save_images(&self, request: &SaveRequest) -> Result<SaveOutcome, SaveError> {
        let start_time = Instant::now();
        let Some((width, height)) = request.images.first_dimensions() else {
            warn!("⚠️ Empty image batch, nothing to save.");
            return Ok(SaveOutcome::default());
        };

        fs::create_dir_all(&self.settings.output_dir).map_err(|source| SaveError::Write {
            path: self.settings.output_dir.clone(),
            source,
        })?;
        let target = self.resolve_target(request)?;
        let subfolder = target
            .mirror
            .as_ref()
            .map(|m| m.subfolder().to_string())
            .unwrap_or_default();

        let date_format = if timestamp_utils::is_valid_strftime(&self.settings.date_format) {
            self.settings.date_format.as_str()
        } else {
            warn!("⚠️ Invalid date format '{}', using '{}'.", self.settings.date_format, DEFAULT_DATE_FORMAT);
            DEFAULT_DATE_FORMAT
        };
        let date = timestamp_utils::current_local_timestamp_str(date_format);
        let batch_template = FilenameTemplate::new(request.filename_prefix.as_str()).resolve_batch(width, height, &date);
        let metadata = png_writer::metadata_for(
            request.prompt.as_ref(),
            request.extra_pnginfo.as_ref(),
            self.settings.disable_metadata,
        )?;

        let mut counter = self.counter();
        let mut outcome = SaveOutcome::default();
        for (batch_number, image) in request.images.iter().enumerate() {
            let prefix = batch_template.prefix_for(batch_number);
            let name = self.allocator.allocate(&prefix, &target.folder, &mut counter)?;

            let bytes = png_writer::encode_png(image, metadata.as_ref(), self.settings.compression)?;
            fs::write(&name.path, &bytes).map_err(|source| SaveError::Write {
                path: name.path.clone(),
                source,
            })?;
            debug!("💾 Wrote '{}' ({} bytes)", name.path.display(), bytes.len());

            if let Some(mirror) = &target.mirror {
                let preview_path = mirror.mirror(&name.filename, &bytes)?;
                debug!("  Mirrored to '{}'", preview_path.display());
            }

            outcome.ui.images.push(SaveResultRecord {
                filename: name.filename,
                subfolder: subfolder.clone(),
                kind: OUTPUT_TYPE.to_string(),
            });
            outcome.saved_paths.push(name.path);
        }

        info!(
            "✅ Saved {} image(s) to '{}' in {:?}.",
            outcome.ui.images.len(),
            target.folder.display(),
            start_time.elapsed()
        );
        Ok(outcome)
    }

    fn resolve_target(&self, request: &SaveRequest) -> Result<OutputTarget, SaveError> {
        let default_target = OutputTarget {
            folder: self.settings.output_dir.clone(),
            mirror: None,
        };
        let custom = request.custom_path.trim();
        if !request.use_custom_path || custom.is_empty() {
            return Ok(default_target);
        }

        let custom_folder = std::path::absolute(Path::new(custom)).map_err(|source| SaveError::Resolve {
            path: PathBuf::from(custom),
            source,
        })?;
        if let Err(e) = file_utils::ensure_output_directory(&custom_folder) {
            warn!(
                "⚠️ Error creating directory '{}': {}. Falling back to '{}'.",
                custom_folder.display(),
                e,
                self.settings.output_dir.display()
            );
            return Ok(default_target);
        }

        let mirror = match PreviewMirror::prepare(&self.settings.output_dir, &self.settings.preview_folder_name) {
            Ok((mirror, _report)) => Some(mirror),
            Err(e) => {
                warn!("⚠️ Preview folder unavailable, previews disabled for this run: {}", e);
                None
            }
        };
        info!("📁 Saving images to custom path: {}", custom_folder.display());
        Ok(OutputTarget {
            folder: custom_folder,
            mirror,
        })
    }
}
