//! Driving the host's galaxy cube from the attenuation calculation.
//!
//! [`DarkenSky`] is owned by the integration layer for the lifetime of a scene.
//! It remembers the galaxy cube's values from scene entry and puts them back on
//! exit, on deactivation, and while the map view is open.

use glam::Vec3;
use skyshade_config::SkyboxConfig;

use crate::attenuation::compute_attenuated_color;
use crate::host::{GalaxyCube, SceneQuery};
use crate::scene::CameraState;
use crate::solar_system::LightSourceLookup;

/// Glare fade limit held on the galaxy cube while the effect is running.
pub const ACTIVE_GLARE_FADE_LIMIT: f32 = 1.0;

/// Galaxy cube values captured at scene entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxySnapshot {
    pub max_galaxy_color: Vec3,
    pub glare_fade_limit: f32,
}

impl GalaxySnapshot {
    pub fn capture<G: GalaxyCube + ?Sized>(cube: &G) -> Self {
        Self {
            max_galaxy_color: cube.max_galaxy_color(),
            glare_fade_limit: cube.glare_fade_limit(),
        }
    }

    pub fn apply<G: GalaxyCube + ?Sized>(&self, cube: &mut G) {
        cube.set_max_galaxy_color(self.max_galaxy_color);
        cube.set_glare_fade_limit(self.glare_fade_limit);
    }
}

/// Host state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub camera: CameraState,
    /// The system map is open.
    pub map_view: bool,
}

/// What [`DarkenSky::update`] did this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No galaxy cube this frame.
    SkippedNoTarget,
    /// Effect switched off by [`DarkenSky::set_active`].
    SkippedInactive,
    /// Effect disabled in settings; snapshot values reapplied (if a snapshot exists).
    SkippedDisabled,
    /// Light source could not be located.
    SkippedNoLightSource,
    /// Map view open: snapshot values reapplied (if a snapshot exists).
    MapViewRestored,
    /// Darkened color written to the cube.
    Darkened(Vec3),
}

/// Per-scene controller for the sky darkening effect.
#[derive(Debug)]
pub struct DarkenSky {
    snapshot: Option<GalaxySnapshot>,
    active: bool,
    lookup: LightSourceLookup,
}

impl DarkenSky {
    /// Active controller with no snapshot.
    pub fn new(lookup: LightSourceLookup) -> Self {
        Self {
            snapshot: None,
            active: true,
            lookup,
        }
    }

    /// Probe `scene` for the light-source strategy and build a controller.
    pub fn for_scene(scene: &impl SceneQuery) -> Self {
        let lookup = LightSourceLookup::probe(scene);
        tracing::debug!(?lookup, "sky darkening light source selected");
        Self::new(lookup)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn snapshot(&self) -> Option<&GalaxySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn lookup(&self) -> LightSourceLookup {
        self.lookup
    }

    /// Snapshot the cube and, if the effect is enabled, take it over.
    pub fn on_scene_enter<G: GalaxyCube + ?Sized>(
        &mut self,
        target: Option<&mut G>,
        settings: &SkyboxConfig,
    ) {
        self.snapshot = None;
        let Some(cube) = target else {
            tracing::debug!("no galaxy cube on scene entry, nothing to restore later");
            return;
        };

        let snapshot = GalaxySnapshot::capture(&*cube);
        tracing::debug!(?snapshot, "galaxy cube captured");
        self.snapshot = Some(snapshot);

        if settings.change_skybox {
            cube.set_max_galaxy_color(Vec3::from_array(settings.base_color()));
            cube.set_glare_fade_limit(ACTIVE_GLARE_FADE_LIMIT);
        }
    }

    /// Run one frame.
    pub fn update<S, G>(
        &self,
        frame: &FrameInput,
        scene: &S,
        target: Option<&mut G>,
        settings: &SkyboxConfig,
    ) -> FrameOutcome
    where
        S: SceneQuery + ?Sized,
        G: GalaxyCube + ?Sized,
    {
        let Some(cube) = target else {
            return FrameOutcome::SkippedNoTarget;
        };
        if !self.active {
            return FrameOutcome::SkippedInactive;
        }
        if frame.map_view {
            if let Some(snapshot) = &self.snapshot {
                snapshot.apply(cube);
            }
            return FrameOutcome::MapViewRestored;
        }
        if !settings.change_skybox {
            // Settings may flip mid-scene; undo any darkening already written.
            if let Some(snapshot) = &self.snapshot {
                snapshot.apply(cube);
            }
            return FrameOutcome::SkippedDisabled;
        }

        let Some(light) = self.lookup.resolve(scene) else {
            tracing::trace!(lookup = ?self.lookup, "no light source this frame");
            return FrameOutcome::SkippedNoLightSource;
        };

        let base_color = Vec3::from_array(settings.base_color());
        let color = compute_attenuated_color(&frame.camera, &light, base_color, scene.bodies());
        cube.set_max_galaxy_color(color);
        cube.set_glare_fade_limit(ACTIVE_GLARE_FADE_LIMIT);
        FrameOutcome::Darkened(color)
    }

    /// Follow the host's vessel-rendering toggle.
    pub fn set_active<G: GalaxyCube + ?Sized>(
        &mut self,
        render_vessels: bool,
        target: Option<&mut G>,
    ) {
        if render_vessels {
            tracing::trace!("sky darkening enabled");
            self.active = true;
        } else {
            tracing::trace!("sky darkening disabled");
            self.active = false;
            self.restore(target);
        }
    }

    /// Put the cube back as it was at scene entry and forget the snapshot.
    pub fn on_scene_exit<G: GalaxyCube + ?Sized>(&mut self, target: Option<&mut G>) {
        self.restore(target);
        self.snapshot = None;
    }

    fn restore<G: GalaxyCube + ?Sized>(&self, target: Option<&mut G>) {
        if let (Some(snapshot), Some(cube)) = (&self.snapshot, target) {
            snapshot.apply(cube);
            tracing::debug!(?snapshot, "galaxy cube restored");
        }
    }
}
