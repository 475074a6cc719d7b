//! Per-frame composition of the scene.
//!
//! [`SceneAnimator::tick`] advances every animated element in a fixed order
//! and returns plain values; [`SceneAnimator::build_lines`] turns them into
//! line vertices for the renderer. Both front-ends drive the scene through
//! these two calls.

use crate::camera::{CameraDirector, CameraPose};
use crate::config::SceneConfig;
use crate::constants::FALLBACK_OPACITY;
use crate::edges::EdgeMesh;
use crate::fallback;
use crate::flicker::GlowSample;
use crate::intro::{IntroPhase, IntroSequencer};
use crate::lines::{rgba, LineBatch};
use crate::motion::{CenterpieceTransform, IdleAnimator, IdlePose};
use crate::particles::Streamlines;
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

/// Load state of the centerpiece model.
#[derive(Clone, Debug, Default)]
pub enum AssetState {
    #[default]
    Loading,
    Ready(EdgeMesh),
    Failed,
}

impl AssetState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Seconds since the scene was mounted.
    pub elapsed_sec: f64,
    /// Scroll progress snapshot for this tick.
    pub progress: f32,
    /// Whether the model is on screen; the intro waits for it.
    pub model_ready: bool,
}

/// Everything one tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    pub camera: CameraPose,
    pub intro_depth: f32,
    pub intro_phase: IntroPhase,
    pub idle: IdlePose,
    pub centerpiece: CenterpieceTransform,
    pub glow: GlowSample,
}

pub struct SceneAnimator<R: Rng = StdRng> {
    config: SceneConfig,
    director: CameraDirector,
    intro: IntroSequencer,
    idle: IdleAnimator,
    streams: Streamlines,
    rng: R,
    nacelle: EdgeMesh,
    afterburner: EdgeMesh,
    ticks: u64,
}

impl<R: Rng> SceneAnimator<R> {
    pub fn new(config: SceneConfig, mut rng: R) -> Self {
        let director = CameraDirector::new(config.timeline.clone(), config.camera.blend);
        let intro = IntroSequencer::new(config.intro);
        let idle = IdleAnimator::new(config.idle);
        let streams = Streamlines::new(config.streamlines, &mut rng);
        let n = &config.nacelle;
        let nacelle = EdgeMesh::tapered_tube(n.radius, n.radius * n.taper, n.length, n.segments);
        let a = &config.afterburner;
        let afterburner = EdgeMesh::cone(a.radius, a.length, a.segments);
        Self {
            config,
            director,
            intro,
            idle,
            streams,
            rng,
            nacelle,
            afterburner,
            ticks: 0,
        }
    }

    /// Mount hook: put the camera on the first keyframe.
    pub fn reset_camera(&mut self) {
        self.director.reset_to_first_keyframe();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn streamlines(&self) -> &Streamlines {
        &self.streams
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame: intro, idle motion, camera, particles, glow.
    ///
    /// The intro clock does not start until a tick reports the model ready,
    /// so the fly-in is never spent behind the fallback.
    pub fn tick(&mut self, input: FrameInput) -> SceneFrame {
        let t = input.elapsed_sec as f32;
        let intro_depth = if input.model_ready {
            self.intro.tick(input.elapsed_sec)
        } else {
            self.intro.depth()
        };
        let idle = self.idle.tick(t);
        let camera = self.director.tick(input.progress);
        self.streams.tick(t, &mut self.rng);
        let glow = GlowSample::at(&self.config.afterburner.flicker, t);
        self.ticks += 1;
        SceneFrame {
            camera,
            intro_depth,
            intro_phase: self.intro.phase(),
            idle,
            centerpiece: CenterpieceTransform::compose(intro_depth, &idle),
            glow,
        }
    }

    /// View-projection for the current camera pose.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let c = &self.config.camera;
        self.director
            .camera(aspect, c.fovy_deg.to_radians(), c.znear, c.zfar)
            .view_proj()
    }

    /// Fill `batch` with this frame's lines and return the matrix to draw them with.
    ///
    /// Until the model is ready the 3D scene is replaced by the flat
    /// silhouette, drawn directly in clip space.
    pub fn build_lines(
        &self,
        frame: &SceneFrame,
        asset: &AssetState,
        aspect: f32,
        batch: &mut LineBatch,
    ) -> Mat4 {
        batch.clear();
        let model = match asset {
            AssetState::Ready(mesh) => mesh,
            AssetState::Loading | AssetState::Failed => {
                let color = rgba(self.config.edges.color, FALLBACK_OPACITY);
                fallback::push_silhouette(batch, aspect, color);
                return Mat4::IDENTITY;
            }
        };

        let cfg = &self.config;
        let group = frame.centerpiece.matrix();
        batch.push_mesh(
            model,
            group * cfg.model.matrix(),
            rgba(cfg.edges.color, cfg.edges.opacity),
        );

        let lay_flat = Mat4::from_rotation_x(FRAC_PI_2);
        if cfg.nacelle.enabled {
            let color = rgba(cfg.edges.color, cfg.nacelle.opacity);
            for mount in cfg.nacelle.mounts {
                let m = group * Mat4::from_translation(mount) * lay_flat;
                batch.push_mesh(&self.nacelle, m, color);
            }
        }

        let ab = &cfg.afterburner;
        // emissive weighted against the base colour by its intensity
        let e = frame.glow.emissive_intensity.max(0.0);
        let glow_rgb = Vec3::from(ab.color)
            .lerp(Vec3::from(ab.emissive), e / (1.0 + e))
            .min(Vec3::ONE);
        let glow_color = rgba(glow_rgb.to_array(), frame.glow.opacity);
        for mount in ab.mounts {
            let m = group
                * Mat4::from_translation(mount)
                * lay_flat
                * Mat4::from_scale(Vec3::splat(ab.scale));
            batch.push_mesh(&self.afterburner, m, glow_color);
        }

        for p in self.streams.particles() {
            let head = p.position + Vec3::Z * p.length;
            batch.push_segment(p.position, head, rgba(cfg.edges.color, p.opacity));
        }

        self.view_proj(aspect)
    }
}

impl SceneAnimator<StdRng> {
    /// Scene with a deterministic particle stream.
    pub fn seeded(config: SceneConfig, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}
