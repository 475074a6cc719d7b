// Host-side tests for the intro fly-in, idle motion, flicker and streamlines.

use aero_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn intro_starts_on_first_tick_and_lands_exactly() {
    let cfg = IntroConfig::default();
    let mut intro = IntroSequencer::new(cfg);
    assert_eq!(intro.phase(), IntroPhase::Unstarted);

    // first tick at an arbitrary wall-clock time starts the timer there
    let z0 = intro.tick(42.0);
    assert_eq!(z0, cfg.start_z);
    assert_eq!(intro.phase(), IntroPhase::Running { started_at: 42.0 });

    let z_end = intro.tick(42.0 + cfg.duration_sec as f64);
    assert_eq!(z_end, cfg.end_z);
    assert!(intro.is_complete());

    // inert afterwards
    assert_eq!(intro.tick(1000.0), cfg.end_z);
    assert_eq!(intro.phase(), IntroPhase::Complete);
}

#[test]
fn intro_depth_is_monotonic() {
    let mut intro = IntroSequencer::default();
    let mut prev = intro.tick(0.0);
    let mut prev_fraction = intro.fraction();
    for i in 1..=240 {
        let z = intro.tick(i as f64 / 120.0);
        assert!(z >= prev, "depth went backwards at step {i}: {prev} -> {z}");
        assert!(intro.fraction() >= prev_fraction);
        prev = z;
        prev_fraction = intro.fraction();
    }
    assert_eq!(prev, INTRO_END_Z);
}

#[test]
fn intro_follows_cubic_ease_out() {
    let cfg = IntroConfig::default();
    let mut intro = IntroSequencer::new(cfg);
    intro.tick(0.0);
    let half = intro.tick(cfg.duration_sec as f64 / 2.0);
    // 1 - 0.5^3 = 0.875 of the way there
    let expected = cfg.start_z + (cfg.end_z - cfg.start_z) * 0.875;
    assert!((half - expected).abs() < 1e-4, "{half} vs {expected}");
}

#[test]
fn idle_motion_converges_onto_its_targets() {
    let cfg = IdleMotionConfig::default();
    let mut anim = IdleAnimator::new(cfg);
    let t = 3.0;
    let mut pose = anim.current();
    for _ in 0..100 {
        pose = anim.tick(t);
    }
    let target = IdlePose::at(&cfg, t);
    assert!((pose.roll - target.roll).abs() < 1e-5);
    assert!((pose.pitch - target.pitch).abs() < 1e-5);
    assert!((pose.yaw - target.yaw).abs() < 1e-5);
    assert!((pose.bob - target.bob).abs() < 1e-5);
}

#[test]
fn flicker_stays_within_configured_band() {
    let cfg = FlickerConfig::default();
    for i in 0..20_000 {
        let s = GlowSample::at(&cfg, i as f32 * 0.0011);
        assert!(s.opacity >= cfg.base_opacity - 1e-6);
        assert!(s.opacity <= cfg.base_opacity + cfg.intensity + 1e-6);
        assert!(s.emissive_intensity >= cfg.emissive_base - 1e-6);
        assert!(s.emissive_intensity <= cfg.emissive_base + cfg.emissive_span + 1e-6);
    }
}

#[test]
fn flicker_is_not_a_single_sine() {
    // sample at the base period; a pure sine would repeat exactly
    let period = std::f32::consts::TAU / FLICKER_SPEED;
    let a = flicker_level(0.25, FLICKER_SPEED);
    let b = flicker_level(0.25 + period, FLICKER_SPEED);
    assert!((a - b).abs() > 1e-3);
}

#[test]
fn streamlines_stay_in_bounds_and_never_grow() {
    let cfg = StreamlineConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut streams = Streamlines::new(cfg, &mut rng);
    assert_eq!(streams.particles().len(), STREAM_COUNT);

    let lower = cfg.inlet_z - cfg.inlet_jitter;
    for tick in 0..5_000 {
        streams.tick(tick as f32 / 60.0, &mut rng);
        assert_eq!(streams.particles().len(), STREAM_COUNT);
        for p in streams.particles() {
            assert!(p.position.z >= lower - 1e-4, "z {} below inlet", p.position.z);
            assert!(p.position.z <= cfg.outlet_z, "z {} past outlet", p.position.z);
            assert!((0.0..=1.0).contains(&p.opacity));
        }
    }
    // 5000 ticks at >= 0.06 units each is far more than one lap
    assert!(streams.recycled() > 0);
}

#[test]
fn streamline_recycling_is_reproducible_with_a_seed() {
    let cfg = StreamlineConfig::default();
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = Streamlines::new(cfg, &mut rng);
        for tick in 0..1_000 {
            s.tick(tick as f32 / 60.0, &mut rng);
        }
        s.particles().to_vec()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}
