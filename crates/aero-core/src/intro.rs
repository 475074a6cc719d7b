//! One-shot fly-in of the centerpiece along its depth axis.

use crate::constants::{INTRO_DURATION_SEC, INTRO_END_Z, INTRO_START_Z};
use crate::easing::{ease_out_cubic, lerp};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntroConfig {
    pub start_z: f32,
    pub end_z: f32,
    pub duration_sec: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            start_z: INTRO_START_Z,
            end_z: INTRO_END_Z,
            duration_sec: INTRO_DURATION_SEC,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IntroPhase {
    Unstarted,
    Running { started_at: f64 },
    Complete,
}

/// Drives `Unstarted -> Running -> Complete`, each transition at most once.
#[derive(Clone, Debug)]
pub struct IntroSequencer {
    config: IntroConfig,
    phase: IntroPhase,
    fraction: f32,
}

impl IntroSequencer {
    pub fn new(config: IntroConfig) -> Self {
        Self {
            config,
            phase: IntroPhase::Unstarted,
            fraction: 0.0,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Eased progress in \[0, 1\]; never decreases.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn is_complete(&self) -> bool {
        self.phase == IntroPhase::Complete
    }

    /// Current depth; the start depth until the first tick.
    pub fn depth(&self) -> f32 {
        lerp(self.config.start_z, self.config.end_z, self.fraction)
    }

    /// Advance to wall-clock `now_sec` and return the centerpiece depth.
    ///
    /// The clock starts on the first call, not at construction.
    pub fn tick(&mut self, now_sec: f64) -> f32 {
        let started_at = match self.phase {
            IntroPhase::Complete => return self.config.end_z,
            IntroPhase::Running { started_at } => started_at,
            IntroPhase::Unstarted => {
                self.phase = IntroPhase::Running {
                    started_at: now_sec,
                };
                now_sec
            }
        };
        let elapsed = (now_sec - started_at).max(0.0) as f32;
        let t = if self.config.duration_sec > 0.0 {
            (elapsed / self.config.duration_sec).clamp(0.0, 1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.phase = IntroPhase::Complete;
            self.fraction = 1.0;
            return self.config.end_z;
        }
        self.fraction = self.fraction.max(ease_out_cubic(t));
        self.depth()
    }
}

impl Default for IntroSequencer {
    fn default() -> Self {
        Self::new(IntroConfig::default())
    }
}
