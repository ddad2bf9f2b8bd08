pub mod filename_template;
pub mod counter_store;
pub mod filename_allocator;
pub mod png_writer;
pub mod image_batch;
pub mod preview_mirror;
pub mod save_image_node;
pub mod node_definition;
