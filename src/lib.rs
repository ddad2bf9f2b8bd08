pub mod app_config;
pub mod config_loader;
pub mod errors;
pub mod common;
pub mod core;
pub mod operations;

pub use crate::core::image_batch::{image_from_unit_floats, ImageBatch, TensorImage};
pub use crate::core::node_definition::NodeDefinition;
pub use crate::core::save_image_node::{NodeSettings, SaveImageNode, SaveOutcome, SaveRequest, SaveResultRecord};
