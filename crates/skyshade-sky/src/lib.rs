//! Galaxy backdrop darkening: dims the skybox when large, close, or back-lit
//! bodies sit in front of the camera.
//!
//! [`compute_attenuated_color`] is the pure per-frame calculation. [`DarkenSky`]
//! wraps it for a host: it snapshots and restores the host's galaxy cube, handles
//! map view, and resolves the light source through [`LightSourceLookup`].

pub mod attenuation;
mod darken;
mod host;
mod scene;
mod solar_system;

pub use attenuation::{
    BodyContribution, angle_degrees, angular_radius_degrees, attenuation_scalar,
    body_contribution, compute_attenuated_color,
};
pub use darken::{ACTIVE_GLARE_FADE_LIMIT, DarkenSky, FrameInput, FrameOutcome, GalaxySnapshot};
pub use host::{GalaxyCube, SceneQuery};
pub use scene::{CameraState, CelestialBody, LightSource};
pub use solar_system::LightSourceLookup;
