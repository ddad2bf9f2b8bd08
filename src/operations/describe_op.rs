use crate::core::node_definition::NodeDefinition;
use anyhow::{Context, Result};
use serde_json::json;

pub fn handle_describe_cli() -> Result<()> {
    let definition = NodeDefinition::save_image_dir();
    let payload = json!({
        "node": definition,
        "input_types": definition.input_types(),
    });
    println!("{}", serde_json::to_string_pretty(&payload).context("Failed to serialize node definition")?);
    Ok(())
}
