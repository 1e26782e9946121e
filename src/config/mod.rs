pub mod env;
mod loader;

pub use env::{
    AppConfig, ClassifierConfig, ConfigError, DirectoryConfig, OpenAiConfig, YouTubeConfig,
};
pub use loader::load_config;
