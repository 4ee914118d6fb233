//! Configuration files and logging.
pub mod load_from_file;
pub mod logger;
/// `parameter_block!`: named parameter structs with a fixed array order
pub(crate) mod parameter_block;
