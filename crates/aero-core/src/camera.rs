//! Scroll-driven camera: keyframe timeline, eased segment blend and damped state.
//!
//! The director never jumps: each tick it computes a target pose from the
//! keyframe table and then moves the live camera a fixed fraction toward it.

use crate::easing::{damp_vec3, ease_in_out_quad};
use crate::error::ConfigError;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// A waypoint on the camera path, pinned to a scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraKeyframe {
    pub scroll_threshold: f32,
    pub position: Vec3,
    pub look_at: Vec3,
    pub label: &'static str,
}

impl CameraKeyframe {
    pub const fn new(
        scroll_threshold: f32,
        position: Vec3,
        look_at: Vec3,
        label: &'static str,
    ) -> Self {
        Self {
            scroll_threshold,
            position,
            look_at,
            label,
        }
    }
}

/// The portfolio page's camera path. Repeated thresholds are holds: the
/// camera parks while the page content scrolls beneath it.
pub const DEFAULT_KEYFRAMES: [CameraKeyframe; 6] = [
    CameraKeyframe::new(0.0, Vec3::new(-4.0, 3.0, -8.0), Vec3::new(0.0, 1.0, -2.0), "Hero"),
    CameraKeyframe::new(0.23, Vec3::new(-4.0, 4.0, -8.0), Vec3::new(1.0, 1.5, -4.0), "About"),
    CameraKeyframe::new(0.28, Vec3::new(-4.0, 4.0, -8.0), Vec3::new(1.0, 1.5, -4.0), "About"),
    CameraKeyframe::new(0.4, Vec3::new(-3.0, 3.0, 9.0), Vec3::new(1.0, 1.0, -6.0), "Engineering"),
    CameraKeyframe::new(
        0.786453,
        Vec3::new(-3.0, 3.0, 9.0),
        Vec3::new(1.0, 1.0, -6.0),
        "Engineering",
    ),
    CameraKeyframe::new(1.0, Vec3::new(-2.0, -3.0, 11.0), Vec3::new(-3.5, 5.0, -9.0), "Contact"),
];

/// Validated, immutable keyframe list.
#[derive(Clone, Debug)]
pub struct KeyframeTimeline {
    keyframes: Vec<CameraKeyframe>,
}

/// Where a progress value falls on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSample {
    pub start: usize,
    pub end: usize,
    /// Linear progress through the segment, 1 for zero-length segments.
    pub local: f32,
    pub eased: f32,
}

/// Position and look-at pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl KeyframeTimeline {
    pub fn new(keyframes: Vec<CameraKeyframe>) -> Result<Self, ConfigError> {
        if keyframes.len() < 2 {
            return Err(ConfigError::TooFewKeyframes(keyframes.len()));
        }
        for (i, pair) in keyframes.windows(2).enumerate() {
            if pair[1].scroll_threshold < pair[0].scroll_threshold {
                return Err(ConfigError::DecreasingThreshold {
                    index: i + 1,
                    label: pair[1].label,
                    threshold: pair[1].scroll_threshold,
                });
            }
        }
        let first = keyframes[0].scroll_threshold;
        let last = keyframes[keyframes.len() - 1].scroll_threshold;
        if first != 0.0 || last != 1.0 {
            return Err(ConfigError::TimelineBounds { first, last });
        }
        Ok(Self { keyframes })
    }

    pub fn keyframes(&self) -> &[CameraKeyframe] {
        &self.keyframes
    }

    pub fn first(&self) -> &CameraKeyframe {
        &self.keyframes[0]
    }

    pub fn last(&self) -> &CameraKeyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    /// Bracketing keyframe indices plus segment-local and eased progress.
    pub fn locate(&self, progress: f32) -> SegmentSample {
        let last = self.keyframes.len() - 1;
        let (start, end) = if progress >= self.keyframes[last].scroll_threshold {
            (last, last)
        } else {
            self.keyframes
                .windows(2)
                .position(|w| progress >= w[0].scroll_threshold && progress <= w[1].scroll_threshold)
                .map(|i| (i, i + 1))
                .unwrap_or((0, 1))
        };
        let a = self.keyframes[start].scroll_threshold;
        let b = self.keyframes[end].scroll_threshold;
        let range = b - a;
        let local = if range > 0.0 {
            (progress - a) / range
        } else {
            1.0
        };
        SegmentSample {
            start,
            end,
            local,
            eased: ease_in_out_quad(local),
        }
    }

    /// Target pose for `progress`, before damping.
    pub fn sample(&self, progress: f32) -> CameraPose {
        let seg = self.locate(progress);
        let a = &self.keyframes[seg.start];
        let b = &self.keyframes[seg.end];
        CameraPose {
            position: a.position.lerp(b.position, seg.eased),
            look_at: a.look_at.lerp(b.look_at, seg.eased),
        }
    }
}

impl Default for KeyframeTimeline {
    fn default() -> Self {
        Self {
            keyframes: DEFAULT_KEYFRAMES.to_vec(),
        }
    }
}

/// Owns the live camera pose and eases it toward the timeline each tick.
#[derive(Clone, Debug)]
pub struct CameraDirector {
    timeline: KeyframeTimeline,
    blend: f32,
    current: CameraPose,
    target: CameraPose,
}

impl CameraDirector {
    pub fn new(timeline: KeyframeTimeline, blend: f32) -> Self {
        let first = *timeline.first();
        let pose = CameraPose {
            position: first.position,
            look_at: first.look_at,
        };
        Self {
            timeline,
            blend,
            current: pose,
            target: pose,
        }
    }

    /// Mount hook: snap the camera onto the first keyframe.
    pub fn reset_to_first_keyframe(&mut self) {
        let first = self.timeline.first();
        self.current = CameraPose {
            position: first.position,
            look_at: first.look_at,
        };
        self.target = self.current;
    }

    pub fn tick(&mut self, progress: f32) -> CameraPose {
        self.target = self.timeline.sample(progress);
        self.current = CameraPose {
            position: damp_vec3(self.current.position, self.target.position, self.blend),
            look_at: damp_vec3(self.current.look_at, self.target.look_at, self.blend),
        };
        self.current
    }

    pub fn current(&self) -> CameraPose {
        self.current
    }

    pub fn target(&self) -> CameraPose {
        self.target
    }

    pub fn timeline(&self) -> &KeyframeTimeline {
        &self.timeline
    }

    /// Build a render camera from the current pose.
    pub fn camera(&self, aspect: f32, fovy_radians: f32, znear: f32, zfar: f32) -> Camera {
        Camera {
            eye: self.current.position,
            target: self.current.look_at,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear,
            zfar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_passes_validation() {
        assert!(KeyframeTimeline::new(DEFAULT_KEYFRAMES.to_vec()).is_ok());
    }

    #[test]
    fn hold_segment_reports_full_progress() {
        let tl = KeyframeTimeline::default();
        let seg = tl.locate(1.0);
        assert_eq!((seg.start, seg.end), (5, 5));
        assert_eq!(seg.local, 1.0);
    }

    #[test]
    fn view_proj_is_finite_for_keyframe_poses() {
        let dir = CameraDirector::new(KeyframeTimeline::default(), 0.08);
        let cam = dir.camera(16.0 / 9.0, 45f32.to_radians(), 0.1, 200.0);
        assert!(cam.view_proj().is_finite());
    }
}
