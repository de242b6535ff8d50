mod builder;
mod code;
mod highlight;
mod markdown;
mod paths;
mod render;

pub use builder::{BuildError, BuildResult, Builder};
pub use paths::base_path_from_config;
