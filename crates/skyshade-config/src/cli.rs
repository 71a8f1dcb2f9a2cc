//! Command-line overrides for the demo host.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// Values given here win over the ones loaded from `skyshade.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyshade", about = "Galaxy backdrop darkening around celestial bodies")]
pub struct CliArgs {
    /// Un-darkened backdrop brightness, 0.0 - 1.0.
    #[arg(long)]
    pub max_brightness: Option<f32>,

    /// Enable or disable the effect.
    #[arg(long)]
    pub change_skybox: Option<bool>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Settings directory (overrides the platform default).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides on top of loaded settings.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(brightness) = args.max_brightness {
            self.skybox.max_brightness = brightness;
        }
        if let Some(enabled) = args.change_skybox {
            self.skybox.change_skybox = enabled;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
