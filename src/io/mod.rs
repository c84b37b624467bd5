pub mod config_io;
pub mod input_io;
