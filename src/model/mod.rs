pub mod config;
pub mod item;
pub mod quarter;
pub mod source;
pub mod status;

pub use config::*;
pub use item::*;
pub use quarter::*;
pub use source::*;
pub use status::*;
