//! Locating the light source.

use crate::host::SceneQuery;
use crate::scene::LightSource;

/// Where the light source comes from. Chosen once per scene by [`probe`](Self::probe).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightSourceLookup {
    /// The first body in the host's catalog.
    #[default]
    Primary,
    /// The star reported by the host's star-tracking extension.
    TrackedStar,
}

impl LightSourceLookup {
    /// Pick the tracked star when the extension is installed, the primary body otherwise.
    pub fn probe(scene: &impl SceneQuery) -> Self {
        if scene.has_star_tracker() {
            Self::TrackedStar
        } else {
            Self::Primary
        }
    }

    /// Light source for this frame, `None` if it cannot be located.
    pub fn resolve<S: SceneQuery + ?Sized>(self, scene: &S) -> Option<LightSource> {
        let position = match self {
            Self::Primary => scene.bodies().first().map(|b| b.position),
            Self::TrackedStar => scene.tracked_star_position(),
        }?;
        Some(LightSource::new(position))
    }
}
