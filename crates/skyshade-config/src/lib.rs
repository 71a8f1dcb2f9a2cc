//! Persisted settings for the sky-darkening effect.
//!
//! Settings live on disk as a RON file, are refreshed by the caller and passed
//! explicitly into every frame. CLI flags can override individual values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, SkyboxConfig, default_config_dir};
pub use error::ConfigError;
