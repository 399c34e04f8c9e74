pub mod defaults;
pub mod loader;

pub use defaults::*;
pub use loader::*;

use std::time::Duration;

/// Settings for a single prompt run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Per-segment timeout, applied to every requested segment
    pub timeout: Duration,
    /// Segment specs in display order, `name` or `name=param`
    pub segments: Vec<String>,
}
