//! Airflow streamlines: a fixed pool of short segments drifting along +Z.
//!
//! Particles past the outlet are teleported back to the inlet with new random
//! lateral offsets. The pool is allocated once and never grows.

use crate::constants::*;
use crate::easing::clamp01;
use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamlineConfig {
    pub count: usize,
    pub spawn_spread: [f32; 2],
    pub respawn_spread: [f32; 2],
    pub length_range: [f32; 2],
    pub speed_range: [f32; 2],
    pub spawn_z_range: [f32; 2],
    pub inlet_z: f32,
    pub inlet_jitter: f32,
    pub outlet_z: f32,
    pub fade_distance: f32,
    pub step: f32,
    pub wobble_x: [f32; 2],
    pub wobble_y: [f32; 2],
    pub max_opacity: f32,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            count: STREAM_COUNT,
            spawn_spread: STREAM_SPAWN_SPREAD,
            respawn_spread: STREAM_RESPAWN_SPREAD,
            length_range: STREAM_LENGTH_RANGE,
            speed_range: STREAM_SPEED_RANGE,
            spawn_z_range: STREAM_SPAWN_Z_RANGE,
            inlet_z: STREAM_INLET_Z,
            inlet_jitter: STREAM_INLET_JITTER,
            outlet_z: STREAM_OUTLET_Z,
            fade_distance: STREAM_FADE_DISTANCE,
            step: STREAM_STEP,
            wobble_x: STREAM_WOBBLE_X,
            wobble_y: STREAM_WOBBLE_Y,
            max_opacity: STREAM_MAX_OPACITY,
        }
    }
}

impl StreamlineConfig {
    /// Fade-in near the inlet times fade-out near the outlet, scaled.
    pub fn opacity_at(&self, z: f32) -> f32 {
        let fade_in = clamp01((z - self.inlet_z) / self.fade_distance);
        let fade_out = clamp01((self.outlet_z - z) / self.fade_distance);
        self.max_opacity * fade_in * fade_out
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Tail of the segment; the head is `position + Z * length`.
    pub position: Vec3,
    pub speed: f32,
    pub length: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub opacity: f32,
}

#[inline]
fn spread<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

#[inline]
fn in_range<R: Rng + ?Sized>(rng: &mut R, range: [f32; 2]) -> f32 {
    range[0] + rng.gen::<f32>() * (range[1] - range[0])
}

pub struct Streamlines {
    config: StreamlineConfig,
    particles: Vec<Particle>,
    recycled: u64,
}

impl Streamlines {
    pub fn new<R: Rng + ?Sized>(config: StreamlineConfig, rng: &mut R) -> Self {
        let particles = (0..config.count)
            .map(|_| {
                let x_offset = spread(rng, config.spawn_spread[0]);
                let y_offset = spread(rng, config.spawn_spread[1]);
                let length = in_range(rng, config.length_range);
                let speed = in_range(rng, config.speed_range);
                let z = in_range(rng, config.spawn_z_range);
                Particle {
                    position: Vec3::new(x_offset, y_offset, z),
                    speed,
                    length,
                    x_offset,
                    y_offset,
                    opacity: config.opacity_at(z),
                }
            })
            .collect();
        Self {
            config,
            particles,
            recycled: 0,
        }
    }

    /// Advance every particle one fixed step at wall-clock `elapsed` seconds.
    pub fn tick<R: Rng + ?Sized>(&mut self, elapsed: f32, rng: &mut R) {
        let cfg = &self.config;
        for p in &mut self.particles {
            p.position.z += p.speed * cfg.step;

            let wave_x = (elapsed * cfg.wobble_x[0] + p.x_offset).sin() * cfg.wobble_x[1];
            let wave_y = (elapsed * cfg.wobble_y[0] + p.y_offset).cos() * cfg.wobble_y[1];
            p.position.x = p.x_offset + wave_x;
            p.position.y = p.y_offset + wave_y;

            if p.position.z > cfg.outlet_z {
                p.position.z = cfg.inlet_z - rng.gen::<f32>() * cfg.inlet_jitter;
                p.x_offset = spread(rng, cfg.respawn_spread[0]);
                p.y_offset = spread(rng, cfg.respawn_spread[1]);
                self.recycled += 1;
            }

            p.opacity = cfg.opacity_at(p.position.z);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &StreamlineConfig {
        &self.config
    }

    /// Total respawns since construction.
    pub fn recycled(&self) -> u64 {
        self.recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_ramps_are_zero_at_bounds() {
        let cfg = StreamlineConfig::default();
        assert_eq!(cfg.opacity_at(cfg.inlet_z), 0.0);
        assert_eq!(cfg.opacity_at(cfg.outlet_z), 0.0);
        assert_eq!(cfg.opacity_at(cfg.inlet_z - 1.5), 0.0);
        assert!((cfg.opacity_at(0.0) - cfg.max_opacity).abs() < 1e-6);
    }
}
