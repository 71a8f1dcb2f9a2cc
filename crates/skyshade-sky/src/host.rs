//! Seams to the host game: its body catalog and its galaxy cube renderer.

use glam::{DVec3, Vec3};

use crate::scene::CelestialBody;

/// Read-only view of the host's universe for the current frame.
pub trait SceneQuery {
    /// Every body in the universe. The first entry is the primary star.
    fn bodies(&self) -> &[CelestialBody];

    /// Whether a star-tracking extension is installed. Probed once per scene.
    fn has_star_tracker(&self) -> bool {
        false
    }

    /// Position of the star the extension currently considers the sun.
    fn tracked_star_position(&self) -> Option<DVec3> {
        None
    }
}

/// The host's skybox renderer state that the effect drives.
pub trait GalaxyCube {
    /// Brightness color applied to the galaxy backdrop.
    fn max_galaxy_color(&self) -> Vec3;
    fn set_max_galaxy_color(&mut self, color: Vec3);

    /// How quickly glare fades the backdrop.
    fn glare_fade_limit(&self) -> f32;
    fn set_glare_fade_limit(&mut self, limit: f32);
}
