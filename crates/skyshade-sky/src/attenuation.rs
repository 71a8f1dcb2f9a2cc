//! Skybox attenuation: how much the galaxy backdrop is dimmed this frame.
//!
//! Every body that appears larger than [`MIN_ANGULAR_SIZE_DEG`] contributes a
//! scalar in `[0, 1]` built from three factors:
//!
//! - **phase**: angle between body→light and body→camera, clamped to
//!   `[angular size, 100°]` and mapped to `[1, 0]`;
//! - **framing**: how far the body sits from the view axis, fading to zero
//!   over a quarter field of view beyond the half-FOV plus a 5° margin;
//! - **size**: `sqrt(min(angular size, 60°) / 60°)`.
//!
//! The per-body scalar is `1 - phase * size * framing`; the backdrop color is
//! the base color times the product of all per-body scalars. The same scalar is
//! applied to every channel.

use glam::{DVec3, Vec3};

use crate::scene::{CameraState, CelestialBody, LightSource};

/// Bodies at or below this apparent radius are ignored.
pub const MIN_ANGULAR_SIZE_DEG: f64 = 1.0;

/// Phase angle at which a body stops darkening the sky.
pub const MAX_PHASE_ANGLE_DEG: f64 = 100.0;

/// Angular size at which the size factor saturates.
pub const MAX_SCALE_SIZE_DEG: f64 = 60.0;

/// Extra margin beyond the half field of view before framing starts to fade.
pub const FRAMING_MARGIN_DEG: f64 = 5.0;

/// Breakdown of a single body's effect on the backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyContribution {
    /// Apparent angular radius seen from the camera, degrees.
    pub angular_size_deg: f64,
    /// Unclamped angle between body→light and body→camera, degrees.
    pub phase_angle_deg: f64,
    /// `[0, 1]`; 1 when the camera looks at the lit side head-on.
    pub phase_factor: f64,
    /// `[0, 1]`; 1 when the body is inside the view cone plus margin.
    pub framing_factor: f64,
    /// Multiplier applied to the backdrop color.
    pub scalar: f64,
}

/// Angle between two vectors in degrees.
///
/// Returns 0 when either vector has (near) zero length.
pub fn angle_degrees(a: DVec3, b: DVec3) -> f64 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Apparent angular radius in degrees of a sphere of `radius` whose center is
/// `distance` away: `acos(sqrt(d² - r²) / d)`.
///
/// `None` when the observer is at or inside the surface, or the inputs are not
/// finite.
pub fn angular_radius_degrees(distance: f64, radius: f64) -> Option<f64> {
    if !distance.is_finite() || !radius.is_finite() || radius < 0.0 || distance <= radius {
        return None;
    }
    let cos = (distance * distance - radius * radius).sqrt() / distance;
    let degrees = cos.clamp(-1.0, 1.0).acos().to_degrees();
    degrees.is_finite().then_some(degrees)
}

fn phase_factor(phase_angle_deg: f64, angular_size_deg: f64) -> f64 {
    let clamped = phase_angle_deg
        .max(angular_size_deg)
        .min(MAX_PHASE_ANGLE_DEG);
    1.0 - (clamped - angular_size_deg) / (MAX_PHASE_ANGLE_DEG - angular_size_deg)
}

fn framing_factor(off_axis_deg: f64, fov_degrees: f64) -> f64 {
    let excess = (off_axis_deg - fov_degrees / 2.0 - FRAMING_MARGIN_DEG).max(0.0);
    let quarter_fov = fov_degrees / 4.0;
    let outside = if quarter_fov > 0.0 {
        (excess / quarter_fov).min(1.0)
    } else if excess > 0.0 {
        1.0
    } else {
        0.0
    };
    1.0 - outside
}

/// How `body` dims the backdrop, or `None` if it has no effect this frame
/// (too small, camera at/inside it, or non-finite geometry).
pub fn body_contribution(
    camera: &CameraState,
    light: &LightSource,
    body: &CelestialBody,
) -> Option<BodyContribution> {
    let to_body = body.position - camera.position;
    let distance = body.altitude(camera.position) + body.radius;

    let angular_size_deg = angular_radius_degrees(distance, body.radius)?;
    if angular_size_deg <= MIN_ANGULAR_SIZE_DEG {
        return None;
    }

    let phase_angle_deg = angle_degrees(light.position - body.position, -to_body);
    let phase_factor = phase_factor(phase_angle_deg, angular_size_deg);

    let off_axis_deg = (angle_degrees(camera.forward, to_body) - angular_size_deg).max(0.0);
    let framing_factor = framing_factor(off_axis_deg, camera.fov_degrees);

    let size_factor = (angular_size_deg.min(MAX_SCALE_SIZE_DEG) / MAX_SCALE_SIZE_DEG).sqrt();
    let scalar = 1.0 - phase_factor * size_factor * framing_factor;

    scalar.is_finite().then_some(BodyContribution {
        angular_size_deg,
        phase_angle_deg,
        phase_factor,
        framing_factor,
        scalar,
    })
}

/// Product of every contributing body's scalar. 1.0 when nothing contributes.
pub fn attenuation_scalar(
    camera: &CameraState,
    light: &LightSource,
    bodies: &[CelestialBody],
) -> f64 {
    bodies
        .iter()
        .filter_map(|body| body_contribution(camera, light, body))
        .fold(1.0, |acc, c| acc * c.scalar)
}

/// The backdrop color for this frame: `base_color` scaled by
/// [`attenuation_scalar`]. Not clamped.
pub fn compute_attenuated_color(
    camera: &CameraState,
    light: &LightSource,
    base_color: Vec3,
    bodies: &[CelestialBody],
) -> Vec3 {
    let scalar = attenuation_scalar(camera, light, bodies);
    if scalar == 1.0 {
        return base_color;
    }
    base_color * scalar as f32
}
