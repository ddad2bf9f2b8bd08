use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub output_directory: String, // Host-managed default output directory
    pub default_filename_prefix: String,
    pub counter_file_name: String, // Sidecar counter, lives in output_directory
    pub preview_folder_name: String, // Mirror folder under output_directory
    pub png_compression: Option<u8>, // 0-9, mapped onto the png crate's levels
    pub disable_metadata: bool,
    pub filename_date_format: String, // strftime format for %date%
    pub max_collision_attempts: u32,
    pub log_level: Option<String>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            output_directory: "./output".to_string(),
            default_filename_prefix: "ComfyUI".to_string(),
            counter_file_name: "counter.txt".to_string(),
            preview_folder_name: "save_image_dir_temp".to_string(),
            png_compression: Some(4),
            disable_metadata: false,
            filename_date_format: "%Y%m%d".to_string(),
            max_collision_attempts: 10_000,
            log_level: Some("info".to_string()),
        }
    }
}
