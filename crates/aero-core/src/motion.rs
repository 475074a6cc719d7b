//! Idle motion for the centerpiece: a slow bob, bank and yaw.
//!
//! Targets come from fixed sine/cosine waves of wall-clock time; the live
//! values are damped toward them the same way the camera is.

use crate::constants::*;
use crate::easing::damp;
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub amplitude: f32,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleMotionConfig {
    pub bob: Oscillator,
    pub bank: Oscillator,
    pub pitch_factor: f32,
    pub yaw: Oscillator,
    pub blend: f32,
}

impl Default for IdleMotionConfig {
    fn default() -> Self {
        Self {
            bob: Oscillator {
                amplitude: BOB_AMPLITUDE,
                speed: BOB_SPEED,
            },
            bank: Oscillator {
                amplitude: BANK_AMPLITUDE,
                speed: BANK_SPEED,
            },
            pitch_factor: BANK_PITCH_FACTOR,
            yaw: Oscillator {
                amplitude: YAW_AMPLITUDE,
                speed: YAW_SPEED,
            },
            blend: IDLE_BLEND,
        }
    }
}

/// Rotation (XYZ Euler, radians) and vertical offset of the centerpiece.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdlePose {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub bob: f32,
}

impl IdlePose {
    /// Target pose at wall-clock `t` seconds.
    pub fn at(config: &IdleMotionConfig, t: f32) -> Self {
        let bank = (t * config.bank.speed).cos() * config.bank.amplitude;
        Self {
            pitch: bank * config.pitch_factor,
            yaw: (t * config.yaw.speed).sin() * config.yaw.amplitude,
            roll: bank,
            bob: (t * config.bob.speed).sin() * config.bob.amplitude,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }
}

#[derive(Clone, Debug)]
pub struct IdleAnimator {
    config: IdleMotionConfig,
    current: IdlePose,
}

impl IdleAnimator {
    pub fn new(config: IdleMotionConfig) -> Self {
        Self {
            config,
            current: IdlePose::default(),
        }
    }

    pub fn tick(&mut self, t: f32) -> IdlePose {
        let target = IdlePose::at(&self.config, t);
        let b = self.config.blend;
        self.current = IdlePose {
            pitch: damp(self.current.pitch, target.pitch, b),
            yaw: damp(self.current.yaw, target.yaw, b),
            roll: damp(self.current.roll, target.roll, b),
            bob: damp(self.current.bob, target.bob, b),
        };
        self.current
    }

    pub fn current(&self) -> IdlePose {
        self.current
    }
}

impl Default for IdleAnimator {
    fn default() -> Self {
        Self::new(IdleMotionConfig::default())
    }
}

/// World transform of the centerpiece group.
///
/// Depth comes from the intro, height and rotation from idle motion; the two
/// write disjoint channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterpieceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl CenterpieceTransform {
    pub fn compose(depth: f32, pose: &IdlePose) -> Self {
        Self {
            translation: Vec3::new(0.0, pose.bob, depth),
            rotation: pose.rotation(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_targets_stay_within_amplitudes() {
        let cfg = IdleMotionConfig::default();
        for i in 0..2000 {
            let p = IdlePose::at(&cfg, i as f32 * 0.05);
            assert!(p.bob.abs() <= cfg.bob.amplitude + 1e-6);
            assert!(p.roll.abs() <= cfg.bank.amplitude + 1e-6);
            assert!(p.pitch.abs() <= cfg.bank.amplitude * cfg.pitch_factor + 1e-6);
            assert!(p.yaw.abs() <= cfg.yaw.amplitude + 1e-6);
        }
    }

    #[test]
    fn compose_keeps_channels_separate() {
        let pose = IdlePose {
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            bob: 0.2,
        };
        let t = CenterpieceTransform::compose(-7.5, &pose);
        assert_eq!(t.translation, Vec3::new(0.0, 0.2, -7.5));
        assert_eq!(t.rotation, Quat::IDENTITY);
    }
}
