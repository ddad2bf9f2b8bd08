mod cli;

use anyhow::{Result, bail};
use log::{info, error, debug};
use save_image_dir::common::logging_setup;
use save_image_dir::config_loader;
use save_image_dir::operations;
use std::time::Instant;

fn main() -> Result<()> {
    let main_start_time = Instant::now();
    let matches = cli::build_cli().get_matches();
    let debug_flag = matches.get_flag("debug");
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    let master_config = match config_loader::load_config_or_default(config_path) {
        Ok(cfg) => {
            logging_setup::initialize_logging(Some(&cfg), debug_flag);
            debug!("Configuration ready, output directory: {}", cfg.app_settings.output_directory);
            cfg
        }
        Err(e) => {
            logging_setup::initialize_logging(None, debug_flag);
            error!("❌ Failed to load configuration: {:#}. Exiting.", e);
            return Err(e);
        }
    };

    let Some((operation_name, sub_matches)) = matches.subcommand() else {
        info!("🤔 No subcommand provided. Run with --help to see the available commands.");
        return Ok(());
    };

    debug!("🎬 Dispatching to subcommand: {}", operation_name);
    let op_start_time = Instant::now();
    let op_result: Result<()> = match operation_name {
        "save" => operations::save_image_op::handle_save_images_cli(&master_config, sub_matches),
        "inspect" => operations::inspect_op::handle_inspect_cli(sub_matches),
        "counter" => operations::counter_op::handle_counter_cli(&master_config, sub_matches),
        "describe" => operations::describe_op::handle_describe_cli(),
        other => bail!("Subcommand '{}' not implemented.", other),
    };

    if let Err(e) = op_result {
        error!("❌ Operation '{}' failed after {:?}: {:#}", operation_name, op_start_time.elapsed(), e);
        return Err(e);
    }
    info!("✅ Operation '{}' completed in {:?}.", operation_name, op_start_time.elapsed());
    debug!("🏁 Finished in {:?}.", main_start_time.elapsed());
    Ok(())
}
