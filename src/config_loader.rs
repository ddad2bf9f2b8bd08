use serde::Deserialize;
use std::fs;
use std::path::Path;
use crate::app_config::ApplicationConfig;
use crate::common::timestamp_utils;
use anyhow::{Result, Context, bail};
use log::{debug, info};
use std::time::Instant;

pub const DEFAULT_CONFIG_PATH: &str = "config/save_image_dir.yaml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let parse_start_time = Instant::now();
    let config = parse_config(&config_str)
        .with_context(|| format!("Failed to load configuration from '{}'. 💔", path))?;
    debug!("Parsed and validated YAML in {:?}", parse_start_time.elapsed());

    info!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

/// Loads `explicit_path` if given (errors are fatal), otherwise the default
/// config file when it exists, otherwise built-in defaults.
pub fn load_config_or_default(explicit_path: Option<&str>) -> Result<MasterConfig> {
    match explicit_path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            debug!("No configuration file found at '{}', using built-in defaults.", DEFAULT_CONFIG_PATH);
            Ok(MasterConfig::default())
        }
    }
}

pub fn parse_config(config_str: &str) -> Result<MasterConfig> {
    let config: MasterConfig = serde_yaml::from_str(config_str)
        .context("Failed to parse YAML configuration")?;
    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    let settings = &config.app_settings;
    if settings.output_directory.trim().is_empty() {
        bail!("❌ Application output_directory cannot be empty.");
    }
    let output_path = Path::new(&settings.output_directory);
    if output_path.exists() && !output_path.is_dir() {
        bail!("❌ Output directory '{}' exists but is not a directory.", settings.output_directory);
    }

    for (field, value) in [
        ("counter_file_name", &settings.counter_file_name),
        ("preview_folder_name", &settings.preview_folder_name),
    ] {
        if value.trim().is_empty() {
            bail!("❌ Application {} cannot be empty.", field);
        }
        if value.contains('/') || value.contains('\\') || value == ".." || value == "." {
            bail!("❌ Application {} '{}' must be a plain file name.", field, value);
        }
    }

    if let Some(level) = settings.png_compression {
        if level > 9 {
            bail!("❌ png_compression must be between 0 and 9, got {}.", level);
        }
    }
    if settings.max_collision_attempts == 0 {
        bail!("❌ max_collision_attempts must be at least 1.");
    }
    if settings.filename_date_format.is_empty() {
        bail!("❌ filename_date_format cannot be empty.");
    }
    if !timestamp_utils::is_valid_strftime(&settings.filename_date_format) {
        bail!("❌ filename_date_format '{}' is not a valid strftime format.", settings.filename_date_format);
    }
    debug!("👍 Master configuration validated.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_application_section_uses_defaults() {
        let config = parse_config("application: {}\n").unwrap();
        assert_eq!(config.app_settings.counter_file_name, "counter.txt");
        assert_eq!(config.app_settings.preview_folder_name, "save_image_dir_temp");
        assert_eq!(config.app_settings.png_compression, Some(4));
        assert!(!config.app_settings.disable_metadata);
    }

    #[test]
    fn overrides_are_applied() {
        let yaml = "application:\n  output_directory: /tmp/out\n  disable_metadata: true\n  png_compression: 9\n";
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.app_settings.output_directory, "/tmp/out");
        assert!(config.app_settings.disable_metadata);
        assert_eq!(config.app_settings.png_compression, Some(9));
    }

    #[test]
    fn rejects_out_of_range_compression() {
        let yaml = "application:\n  png_compression: 12\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn rejects_unknown_date_specifier() {
        let yaml = "application:\n  filename_date_format: \"%Q\"\n";
        assert!(parse_config(yaml).is_err());
    }

    #[test]
    fn rejects_counter_name_with_separator() {
        let yaml = "application:\n  counter_file_name: ../counter.txt\n";
        assert!(parse_config(yaml).is_err());
    }
}
