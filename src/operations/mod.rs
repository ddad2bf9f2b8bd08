pub mod op_helper;
pub mod save_image_op;
pub mod inspect_op;
pub mod counter_op;
pub mod describe_op;
