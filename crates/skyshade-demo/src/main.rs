//! Headless demo host for the sky darkening effect.
//!
//! Runs a small simulated solar system for a number of frames, opening the map
//! view and switching vessel rendering off part way through, and logs the
//! galaxy color the effect produces. Edits to `skyshade.ron` are picked up
//! while it runs.
//!
//! `cargo run -p skyshade-demo -- --frames 1200 --max-brightness 0.4`

mod sim;

use std::path::Path;

use clap::Parser;
use skyshade_config::{CliArgs, Config, default_config_dir};
use skyshade_sky::{DarkenSky, FrameInput, FrameOutcome};
use tracing::info;

use sim::{MOON, OrbitingCamera, PLANET, SimGalaxyCube, SimulatedSystem};

/// Simulated seconds per rendered frame.
const FRAME_DT_S: f64 = 5.0;
/// Frames between progress reports.
const REPORT_EVERY: u32 = 60;
/// Frames between checks of the settings file.
const RELOAD_EVERY: u32 = 120;
/// Frames the map view stays open / vessels stay hidden.
const TOGGLE_SPAN: u32 = 30;

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let config = load_settings(&config_dir, &args);

    let log_dir = config_dir.join("logs");
    skyshade_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    run(config, &config_dir, &args);
}

/// Load settings, commit them back to disk, then layer CLI overrides on top.
///
/// A file that fails to load is left alone and defaults are used for this run.
fn load_settings(config_dir: &Path, args: &CliArgs) -> Config {
    let mut config = match Config::load_or_create(config_dir) {
        Ok(loaded) => {
            if let Err(e) = loaded.save(config_dir) {
                eprintln!("Could not save settings: {e}");
            }
            loaded
        }
        Err(e) => {
            eprintln!("Failed to load settings: {e}, using defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(args);
    config
}

/// Pick up edits to the settings file. Returns true when `config` changed.
///
/// CLI overrides keep winning over the file.
fn refresh_settings(config: &mut Config, config_dir: &Path, args: &CliArgs) -> bool {
    match config.reload(config_dir) {
        Ok(Some(mut fresh)) => {
            fresh.apply_cli_overrides(args);
            if fresh == *config {
                return false;
            }
            *config = fresh;
            true
        }
        Ok(None) => false,
        Err(e) => {
            tracing::warn!("Keeping current settings: {e}");
            false
        }
    }
}

fn run(mut config: Config, config_dir: &Path, args: &CliArgs) {
    let frames = args.frames;
    let mut system = SimulatedSystem::stock();
    let camera = OrbitingCamera {
        parent: PLANET,
        altitude_m: 8.0e4,
        period_s: 1_900.0,
        pan_period_s: 900.0,
        fov_degrees: 60.0,
    };
    let mut cube = SimGalaxyCube::default();
    let stock_cube = cube.clone();

    let mut sky = DarkenSky::for_scene(&system);
    sky.on_scene_enter(Some(&mut cube), &config.skybox);
    info!(
        lookup = ?sky.lookup(),
        brightness = config.skybox.brightness(),
        frames,
        "Scene entered"
    );

    let map_open = frames / 3..frames / 3 + TOGGLE_SPAN;
    let vessels_hidden = frames / 2..frames / 2 + TOGGLE_SPAN;
    let mut darkest = f32::MAX;

    for frame_index in 0..frames {
        system.advance(FRAME_DT_S);

        if frame_index > 0
            && frame_index % RELOAD_EVERY == 0
            && refresh_settings(&mut config, config_dir, args)
        {
            info!(skybox = ?config.skybox, "Settings changed on disk");
        }

        if frame_index == vessels_hidden.start {
            sky.set_active(false, Some(&mut cube));
        } else if frame_index == vessels_hidden.end {
            sky.set_active(true, Some(&mut cube));
        }

        let frame = FrameInput {
            camera: camera.state(&system),
            map_view: map_open.contains(&frame_index),
        };
        let outcome = sky.update(&frame, &system, Some(&mut cube), &config.skybox);

        if let FrameOutcome::Darkened(color) = outcome {
            darkest = darkest.min(color.x);
        }
        if frame_index % REPORT_EVERY == 0 {
            info!(
                frame = frame_index,
                time_s = system.time_s(),
                moon_altitude_m = system.body(MOON).altitude(frame.camera.position),
                ?outcome,
                color = ?cube.color,
                "Galaxy cube"
            );
        }
    }

    sky.on_scene_exit(Some(&mut cube));
    info!(
        darkest,
        restored = cube == stock_cube,
        "Scene exited"
    );
}

#[cfg(test)]
mod tests {
    use skyshade_config::CONFIG_FILE_NAME;

    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["skyshade-demo"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_overrides_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(&["--max-brightness", "0.9", "--change-skybox", "false"]);

        let config = load_settings(dir.path(), &args);
        assert!(!config.skybox.change_skybox);
        assert!((config.skybox.max_brightness - 0.9).abs() < 1e-6);

        let on_disk = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(on_disk, Config::default());
    }

    #[test]
    fn test_malformed_settings_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(skybox: (max_brightness: oops").unwrap();

        let config = load_settings(dir.path(), &args(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "(skybox: (max_brightness: oops"
        );
    }

    #[test]
    fn test_loaded_settings_are_committed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "(skybox: (max_brightness: 0.5))").unwrap();

        let config = load_settings(dir.path(), &args(&[]));
        assert!((config.skybox.max_brightness - 0.5).abs() < 1e-6);
        // Missing fields are written out with their defaults.
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("change_skybox: true"));
    }

    #[test]
    fn test_refresh_picks_up_file_edits() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(&[]);
        let mut config = load_settings(dir.path(), &args);
        assert!(!refresh_settings(&mut config, dir.path(), &args));

        let mut edited = config.clone();
        edited.skybox.max_brightness = 0.1;
        edited.save(dir.path()).unwrap();

        assert!(refresh_settings(&mut config, dir.path(), &args));
        assert_eq!(config, edited);
    }

    #[test]
    fn test_refresh_keeps_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(&["--max-brightness", "0.7"]);
        let mut config = load_settings(dir.path(), &args);

        let mut edited = Config::default();
        edited.skybox.change_skybox = false;
        edited.save(dir.path()).unwrap();

        assert!(refresh_settings(&mut config, dir.path(), &args));
        assert!(!config.skybox.change_skybox);
        assert!((config.skybox.max_brightness - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_refresh_ignores_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(&[]);
        let mut config = load_settings(dir.path(), &args);
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{").unwrap();

        assert!(!refresh_settings(&mut config, dir.path(), &args));
        assert_eq!(config, Config::default());
    }
}
