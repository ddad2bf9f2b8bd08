use crate::config_loader::MasterConfig;
use crate::core::save_image_node::NodeSettings;
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use log::debug;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::time::Instant;

/// Node settings from config, with a CLI `--output` override when the
/// subcommand defines one.
pub fn settings_for_operation(
    master_config: &MasterConfig,
    args: &ArgMatches,
    output_cli_arg_key: &str,
    operation_display_name: &str,
) -> NodeSettings {
    let mut settings = NodeSettings::from_app_config(&master_config.app_settings);
    match args.get_one::<String>(output_cli_arg_key) {
        Some(path_str) => {
            debug!("  Output directory specified via CLI for '{}': {}", operation_display_name, path_str);
            settings.output_dir = PathBuf::from(path_str);
        }
        None => {
            debug!("  Using configured output directory for '{}': {}", operation_display_name, settings.output_dir.display());
        }
    }
    settings
}

pub fn read_json_file(path: &str) -> Result<Value> {
    let start_time = Instant::now();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file '{}'. 📖", path))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON from '{}'. 💔", path))?;
    debug!("Loaded JSON from '{}' in {:?}", path, start_time.elapsed());
    Ok(value)
}

pub fn read_json_object_file(path: &str) -> Result<Map<String, Value>> {
    match read_json_file(path)? {
        Value::Object(map) => Ok(map),
        other => bail!("❌ '{}' must contain a JSON object, found {}.", path, json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
