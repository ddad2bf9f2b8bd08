use crate::config_loader::MasterConfig;
use crate::core::image_batch::ImageBatch;
use crate::core::save_image_node::{SaveImageNode, SaveRequest};
use crate::operations::op_helper;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, debug};
use std::path::Path;
use std::time::Instant;

pub fn handle_save_images_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();
    let operation_display_name = "Image Save";

    let mut settings = op_helper::settings_for_operation(master_config, args, "output", operation_display_name);
    if args.get_flag("no-metadata") {
        debug!("Metadata embedding disabled via CLI.");
        settings.disable_metadata = true;
    }
    let node = SaveImageNode::new(settings);

    let load_start = Instant::now();
    let images = match args.get_one::<String>("tensors") {
        Some(tensor_path) => {
            info!("🧮 Loading tensor batch from '{}'...", tensor_path);
            ImageBatch::load_tensor_file(Path::new(tensor_path)).context("Failed to load tensor batch")?
        }
        None => {
            let image_paths: Vec<&String> = args
                .get_many::<String>("images")
                .context("Missing input images for save command")?
                .collect();
            info!("🖼️ Loading {} input image(s)...", image_paths.len());
            ImageBatch::load_files(&image_paths).context("Failed to load input images")?
        }
    };
    debug!("Loaded batch of {} in {:?}", images.len(), load_start.elapsed());

    let mut request = SaveRequest::new(images);
    request.filename_prefix = args
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_else(|| master_config.app_settings.default_filename_prefix.clone());
    if let Some(custom_path) = args.get_one::<String>("custom-path") {
        request.use_custom_path = true;
        request.custom_path = custom_path.clone();
    } else if args.get_flag("use-custom-path") {
        debug!("--use-custom-path given without --custom-path; using the default directory.");
    }
    if let Some(path) = args.get_one::<String>("prompt") {
        request.prompt = Some(op_helper::read_json_file(path)?);
    }
    if let Some(path) = args.get_one::<String>("extra-pnginfo") {
        request.extra_pnginfo = Some(op_helper::read_json_object_file(path)?);
    }

    let outcome = node
        .save_images(&request)
        .with_context(|| format!("❌ {} failed", operation_display_name))?;

    for path in &outcome.saved_paths {
        info!("  -> {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&outcome).context("Failed to serialize UI payload")?);
    info!("🏁 '{}' finished in {:?}.", operation_display_name, op_start_time.elapsed());
    Ok(())
}
