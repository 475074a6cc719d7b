//! Scene configuration.
//!
//! Every tunable lives in one [`SceneConfig`]; its `Default` gathers the
//! constants from [`crate::constants`]. Front-ends build it once at startup and
//! call [`SceneConfig::validate`] before mounting.

use crate::camera::KeyframeTimeline;
use crate::constants::*;
use crate::error::ConfigError;
use crate::flicker::FlickerConfig;
use crate::intro::IntroConfig;
use crate::motion::IdleMotionConfig;
use crate::particles::StreamlineConfig;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Per-tick blend toward the keyframe target.
    pub blend: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_deg: CAMERA_FOVY_DEG,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            blend: CAMERA_BLEND,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    pub throttle_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: SCROLL_THROTTLE_MS,
        }
    }
}

/// Placement of the imported mesh inside the centerpiece group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelPlacement {
    pub scale: f32,
    pub offset: Vec3,
    pub rotation_y: f32,
}

impl Default for ModelPlacement {
    fn default() -> Self {
        Self {
            scale: MODEL_SCALE,
            offset: mesh_offset_vec3(),
            rotation_y: MESH_ROTATION_Y,
        }
    }
}

impl ModelPlacement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_translation(self.offset)
            * Mat4::from_rotation_y(self.rotation_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub threshold_deg: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            threshold_deg: EDGE_THRESHOLD_DEG,
            color: EDGE_COLOR,
            opacity: EDGE_OPACITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AfterburnerConfig {
    pub mounts: [Vec3; 2],
    pub scale: f32,
    pub length: f32,
    pub radius: f32,
    pub segments: u32,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub flicker: FlickerConfig,
}

impl Default for AfterburnerConfig {
    fn default() -> Self {
        Self {
            mounts: [
                Vec3::from(AFTERBURNER_LEFT),
                Vec3::from(AFTERBURNER_RIGHT),
            ],
            scale: AFTERBURNER_SCALE,
            length: AFTERBURNER_LENGTH,
            radius: AFTERBURNER_RADIUS,
            segments: AFTERBURNER_SEGMENTS,
            color: AFTERBURNER_COLOR,
            emissive: AFTERBURNER_EMISSIVE,
            flicker: FlickerConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NacelleConfig {
    pub enabled: bool,
    pub mounts: [Vec3; 2],
    pub radius: f32,
    pub taper: f32,
    pub length: f32,
    pub segments: u32,
    pub opacity: f32,
}

impl Default for NacelleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mounts: [Vec3::from(NACELLE_LEFT), Vec3::from(NACELLE_RIGHT)],
            radius: NACELLE_RADIUS,
            taper: NACELLE_TAPER,
            length: NACELLE_LENGTH,
            segments: NACELLE_SEGMENTS,
            opacity: NACELLE_OPACITY,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneConfig {
    pub timeline: KeyframeTimeline,
    pub camera: CameraConfig,
    pub scroll: ScrollConfig,
    pub intro: IntroConfig,
    pub idle: IdleMotionConfig,
    pub afterburner: AfterburnerConfig,
    pub nacelle: NacelleConfig,
    pub streamlines: StreamlineConfig,
    pub edges: EdgeStyle,
    pub model: ModelPlacement,
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        KeyframeTimeline::new(self.timeline.keyframes().to_vec())?;
        positive("intro.duration_sec", self.intro.duration_sec)?;
        positive("camera.blend", self.camera.blend)?;
        positive("idle.blend", self.idle.blend)?;
        positive("streamlines.fade_distance", self.streamlines.fade_distance)?;
        positive("model.scale", self.model.scale)?;
        if self.streamlines.count == 0 {
            return Err(ConfigError::EmptyParticlePool);
        }
        Ok(())
    }
}
