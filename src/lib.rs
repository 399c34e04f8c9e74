pub mod config;
pub mod error;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod segments;
pub mod themes;
pub mod utils;

pub use config::{load_config, parse_duration, Config};
pub use error::PromptError;
pub use registry::{provider, ProviderFn, Registry};
pub use render::render;
pub use scheduler::{Scheduler, SegmentRequest};
pub use segments::{Environment, Segment, SegmentContext, SegmentMap};
pub use themes::SegmentColor;
