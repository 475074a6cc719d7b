//! Afterburner glow flicker, derived purely from elapsed time.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlickerConfig {
    pub speed: f32,
    pub intensity: f32,
    pub base_opacity: f32,
    pub emissive_base: f32,
    pub emissive_span: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            speed: FLICKER_SPEED,
            intensity: FLICKER_INTENSITY,
            base_opacity: FLICKER_BASE_OPACITY,
            emissive_base: FLICKER_EMISSIVE_BASE,
            emissive_span: FLICKER_EMISSIVE_SPAN,
        }
    }
}

// (weight, frequency multiplier, phase); weights sum to 1
const WAVES: [(f32, f32, f32); 3] = [(0.4, 1.0, 0.0), (0.35, 1.7, 1.3), (0.25, 2.3, 2.1)];

/// Normalized flicker level in \[0, 1\] at time `t`.
///
/// Three sines at non-harmonic ratios keep the pattern from reading as periodic.
pub fn flicker_level(t: f32, speed: f32) -> f32 {
    let sum: f32 = WAVES
        .iter()
        .map(|&(w, f, phase)| (t * speed * f + phase).sin() * w)
        .sum();
    ((sum + 1.0) / 2.0).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlowSample {
    pub level: f32,
    pub opacity: f32,
    pub emissive_intensity: f32,
}

impl GlowSample {
    pub fn at(config: &FlickerConfig, t: f32) -> Self {
        let level = flicker_level(t, config.speed);
        Self {
            level,
            opacity: config.base_opacity + level * config.intensity,
            emissive_intensity: config.emissive_base + level * config.emissive_span,
        }
    }
}
