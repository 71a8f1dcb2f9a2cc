//! Per-frame scene values consumed by the attenuation calculation.

use glam::DVec3;

/// Camera pose for the current frame, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// World position.
    pub position: DVec3,
    /// View direction. Expected to be unit length; only its direction is used.
    pub forward: DVec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
}

impl CameraState {
    pub fn new(position: DVec3, forward: DVec3, fov_degrees: f64) -> Self {
        Self {
            position,
            forward,
            fov_degrees,
        }
    }

    /// Camera at `position` looking at `target`.
    pub fn looking_at(position: DVec3, target: DVec3, fov_degrees: f64) -> Self {
        Self::new(position, (target - position).normalize_or_zero(), fov_degrees)
    }
}

/// The light source (normally the primary star).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: DVec3,
}

impl LightSource {
    pub fn new(position: DVec3) -> Self {
        Self { position }
    }
}

/// A spherical body: planet, moon, or star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialBody {
    /// Center in world units.
    pub position: DVec3,
    /// Radius in world units.
    pub radius: f64,
}

impl CelestialBody {
    pub fn new(position: DVec3, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Height of `point` above the surface. Negative below it.
    pub fn altitude(&self, point: DVec3) -> f64 {
        self.position.distance(point) - self.radius
    }
}
