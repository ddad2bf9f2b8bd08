//! PNG encoding with generation metadata stored in text chunks.

use crate::errors::PngError;
use image::DynamicImage;
use log::warn;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const PROMPT_KEY: &str = "prompt";
pub const MAX_KEYWORD_LEN: usize = 79;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    Fast,
    Default,
    Best,
}

impl PngCompression {
    /// Maps a zlib-style 0-9 level onto the encoder's presets.
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=3 => PngCompression::Fast,
            4..=6 => PngCompression::Default,
            _ => PngCompression::Best,
        }
    }

    fn to_png(self) -> png::Compression {
        match self {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Default => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

/// Text entries to embed, already serialized to JSON, in write order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PngMetadata {
    entries: Vec<(String, String)>,
}

impl PngMetadata {
    pub fn from_generation(prompt: Option<&Value>, extra_pnginfo: Option<&Map<String, Value>>) -> Result<Self, PngError> {
        let mut entries = Vec::new();
        if let Some(prompt) = prompt {
            entries.push((PROMPT_KEY.to_string(), serde_json::to_string(prompt)?));
        }
        if let Some(extra) = extra_pnginfo {
            for (key, value) in extra {
                if !is_valid_keyword(key) {
                    warn!("⚠️ Skipping metadata key '{}': PNG keywords must be 1-{} Latin-1 characters.", key, MAX_KEYWORD_LEN);
                    continue;
                }
                entries.push((key.clone(), serde_json::to_string(value)?));
            }
        }
        Ok(PngMetadata { entries })
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `None` when metadata is disabled: nothing is embedded whatever the inputs.
pub fn metadata_for(
    prompt: Option<&Value>,
    extra_pnginfo: Option<&Map<String, Value>>,
    disable_metadata: bool,
) -> Result<Option<PngMetadata>, PngError> {
    if disable_metadata {
        return Ok(None);
    }
    PngMetadata::from_generation(prompt, extra_pnginfo).map(Some)
}

/// Latin-1, no NUL, 1 to 79 bytes once encoded.
fn is_valid_keyword(keyword: &str) -> bool {
    let len = keyword.chars().count();
    (1..=MAX_KEYWORD_LEN).contains(&len) && is_latin1(keyword) && !keyword.contains('\0')
}

fn is_latin1(text: &str) -> bool {
    text.chars().all(|c| (c as u32) <= 0xFF)
}

/// Encodes `image` as an 8-bit PNG. Images with alpha keep it; everything
/// else is written as RGB.
pub fn encode_png(
    image: &DynamicImage,
    metadata: Option<&PngMetadata>,
    compression: PngCompression,
) -> Result<Vec<u8>, PngError> {
    let (color, width, height, pixels) = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        (png::ColorType::Rgba, rgba.width(), rgba.height(), rgba.into_raw())
    } else {
        let rgb = image.to_rgb8();
        (png::ColorType::Rgb, rgb.width(), rgb.height(), rgb.into_raw())
    };

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression.to_png());

        if let Some(metadata) = metadata {
            for (keyword, text) in metadata.entries() {
                if is_latin1(text) {
                    encoder.add_text_chunk(keyword.clone(), text.clone())?;
                } else {
                    encoder.add_itxt_chunk(keyword.clone(), text.clone())?;
                }
            }
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    Ok(buffer)
}

/// All `tEXt` and `iTXt` entries of a PNG file as (keyword, text) pairs.
pub fn read_text_chunks(path: &Path) -> Result<Vec<(String, String)>, PngError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_ignore_text_chunk(false);
    let reader = decoder.read_info()?;
    let info = reader.info();

    let mut chunks: Vec<(String, String)> = info
        .uncompressed_latin1_text
        .iter()
        .map(|chunk| (chunk.keyword.clone(), chunk.text.clone()))
        .collect();
    for chunk in &info.utf8_text {
        chunks.push((chunk.keyword.clone(), chunk.get_text()?));
    }
    Ok(chunks)
}
