use crate::config_loader::MasterConfig;
use crate::core::save_image_node::SaveImageNode;
use crate::operations::op_helper;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

pub fn handle_counter_cli(master_config: &MasterConfig, args: &ArgMatches) -> Result<()> {
    let node = SaveImageNode::new(op_helper::settings_for_operation(master_config, args, "output", "Counter"));
    let counter = node.counter();

    if args.get_flag("reset") {
        counter.reset().context("Failed to reset counter")?;
        info!("🔄 Counter '{}' reset to 0.", counter.path().display());
    }

    let value = counter.peek().context("Failed to read counter")?;
    println!("{}", value);
    info!("🔢 Counter '{}' is at {:05}.", counter.path().display(), value);
    Ok(())
}
