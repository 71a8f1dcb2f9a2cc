//! A toy host: a star, a planet and a moon on circular orbits, a camera in low
//! orbit, and an in-memory galaxy cube.

use glam::{DQuat, DVec3, Vec3};
use skyshade_sky::{CameraState, CelestialBody, GalaxyCube, SceneQuery};

/// Circular orbit in the XZ plane around another body.
#[derive(Clone, Copy, Debug)]
struct Orbit {
    parent: usize,
    radius: f64,
    period_s: f64,
    phase: f64,
}

impl Orbit {
    fn offset(&self, time_s: f64) -> DVec3 {
        let angle = self.phase + time_s / self.period_s * std::f64::consts::TAU;
        DVec3::new(angle.cos(), 0.0, angle.sin()) * self.radius
    }
}

/// Star at index 0, parents always listed before their satellites.
pub struct SimulatedSystem {
    bodies: Vec<CelestialBody>,
    orbits: Vec<Option<Orbit>>,
    time_s: f64,
}

pub const STAR: usize = 0;
pub const PLANET: usize = 1;
pub const MOON: usize = 2;

impl SimulatedSystem {
    /// Sun-like star, a small rocky planet and its moon, in meters.
    pub fn stock() -> Self {
        let mut system = Self {
            bodies: vec![
                CelestialBody::new(DVec3::ZERO, 2.616e8),
                CelestialBody::new(DVec3::ZERO, 6.0e5),
                CelestialBody::new(DVec3::ZERO, 2.0e5),
            ],
            orbits: vec![
                None,
                Some(Orbit {
                    parent: STAR,
                    radius: 1.36e10,
                    period_s: 9.2e6,
                    phase: 0.0,
                }),
                Some(Orbit {
                    parent: PLANET,
                    radius: 1.2e7,
                    period_s: 1.38e5,
                    phase: 1.2,
                }),
            ],
            time_s: 0.0,
        };
        system.advance(0.0);
        system
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn body(&self, index: usize) -> &CelestialBody {
        &self.bodies[index]
    }

    /// Step simulated time and move every body.
    pub fn advance(&mut self, dt_s: f64) {
        self.time_s += dt_s;
        for i in 0..self.bodies.len() {
            if let Some(orbit) = self.orbits[i] {
                self.bodies[i].position =
                    self.bodies[orbit.parent].position + orbit.offset(self.time_s);
            }
        }
    }
}

impl SceneQuery for SimulatedSystem {
    fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }
}

/// Camera in a circular orbit that slowly pans from the planet out to space.
pub struct OrbitingCamera {
    pub parent: usize,
    pub altitude_m: f64,
    pub period_s: f64,
    /// Seconds for the view to sweep a full turn.
    pub pan_period_s: f64,
    pub fov_degrees: f64,
}

impl OrbitingCamera {
    pub fn state(&self, system: &SimulatedSystem) -> CameraState {
        let parent = system.body(self.parent);
        let angle = system.time_s() / self.period_s * std::f64::consts::TAU;
        let radial = DVec3::new(angle.cos(), 0.0, angle.sin());
        let position = parent.position + radial * (parent.radius + self.altitude_m);

        let pan = system.time_s() / self.pan_period_s * std::f64::consts::TAU;
        let forward = DQuat::from_rotation_y(pan) * -radial;
        CameraState::new(position, forward, self.fov_degrees)
    }
}

/// Stand-in for the host's skybox renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct SimGalaxyCube {
    pub color: Vec3,
    pub glare_fade_limit: f32,
}

impl Default for SimGalaxyCube {
    fn default() -> Self {
        Self {
            color: Vec3::splat(1.0),
            glare_fade_limit: 0.3,
        }
    }
}

impl GalaxyCube for SimGalaxyCube {
    fn max_galaxy_color(&self) -> Vec3 {
        self.color
    }

    fn set_max_galaxy_color(&mut self, color: Vec3) {
        self.color = color;
    }

    fn glare_fade_limit(&self) -> f32 {
        self.glare_fade_limit
    }

    fn set_glare_fade_limit(&mut self, limit: f32) {
        self.glare_fade_limit = limit;
    }
}
