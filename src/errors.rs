use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the next value from the persisted counter.
/// Never fatal: callers fall back to a time-derived value.
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Counter file '{path}' could not be read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Counter file '{path}' holds invalid content '{content}'")]
    Corrupt { path: PathBuf, content: String },

    #[error("Counter file '{path}' could not be written: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Preview-folder housekeeping failures. Collected and logged, never raised.
#[derive(Error, Debug)]
pub enum HousekeepingError {
    #[error("Failed to list preview folder '{path}': {source}")]
    ListFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove stale preview file '{path}': {source}")]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write preview notice '{path}': {source}")]
    WriteNotice {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("No free filename for prefix '{prefix}' in '{directory}' after {attempts} attempts")]
    Exhausted {
        prefix: String,
        directory: PathBuf,
        attempts: u32,
    },
}

#[derive(Error, Debug)]
pub enum ImageDataError {
    #[error("Unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("Tensor data has {actual} values, expected {expected} for {width}x{height}x{channels}")]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read tensor file '{path}': {source}")]
    ReadTensors {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tensor file '{path}': {source}")]
    ParseTensors {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum PngError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("PNG decoding failed: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a save call. Everything else is logged and skipped.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Png(#[from] PngError),

    #[error("Failed to write image '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve path '{path}': {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
