pub mod command;
pub mod fs;
pub mod logger;

pub use command::*;
pub use fs::*;
