// Host-side tests for the scroll-driven camera director.

use aero_core::*;
use glam::Vec3;

fn converge(director: &mut CameraDirector, progress: f32) -> CameraPose {
    let mut pose = director.current();
    for _ in 0..400 {
        pose = director.tick(progress);
    }
    pose
}

fn close(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() < eps
}

#[test]
fn converges_to_first_keyframe_at_top_of_page() {
    let mut dir = CameraDirector::new(KeyframeTimeline::default(), CAMERA_BLEND);
    // start somewhere else so convergence is actually exercised
    converge(&mut dir, 1.0);
    let pose = converge(&mut dir, 0.0);
    let first = DEFAULT_KEYFRAMES[0];
    assert!(close(pose.position, first.position, 1e-3), "{pose:?}");
    assert!(close(pose.look_at, first.look_at, 1e-3), "{pose:?}");
}

#[test]
fn converges_to_last_keyframe_at_bottom_of_page() {
    let mut dir = CameraDirector::new(KeyframeTimeline::default(), CAMERA_BLEND);
    let pose = converge(&mut dir, 1.0);
    let last = DEFAULT_KEYFRAMES[DEFAULT_KEYFRAMES.len() - 1];
    assert!(close(pose.position, last.position, 1e-3), "{pose:?}");
    assert!(close(pose.look_at, last.look_at, 1e-3), "{pose:?}");
}

#[test]
fn mid_page_scroll_lands_in_engineering_hold() {
    let metrics = ScrollMetrics::new(600.0, 2000.0, 800.0);
    let progress = metrics.progress();
    assert!((progress - 0.5).abs() < 1e-6);

    let tl = KeyframeTimeline::default();
    let seg = tl.locate(progress);
    assert_eq!((seg.start, seg.end), (3, 4));
    assert!((seg.local - 0.2588).abs() < 1e-3, "local = {}", seg.local);
    assert!((seg.eased - 0.134).abs() < 1e-3, "eased = {}", seg.eased);

    // both ends share a pose, so the target is that pose
    let target = tl.sample(progress);
    assert!(close(target.position, Vec3::new(-3.0, 3.0, 9.0), 1e-5));
    assert!(close(target.look_at, Vec3::new(1.0, 1.0, -6.0), 1e-5));
}

#[test]
fn zero_length_segment_reports_full_progress() {
    let tl = KeyframeTimeline::new(vec![
        CameraKeyframe::new(0.0, Vec3::ZERO, Vec3::Z, "a"),
        CameraKeyframe::new(0.0, Vec3::X, Vec3::Z, "b"),
        CameraKeyframe::new(1.0, Vec3::Y, Vec3::Z, "c"),
    ])
    .unwrap();
    let seg = tl.locate(0.0);
    assert_eq!((seg.start, seg.end), (0, 1));
    assert_eq!(seg.local, 1.0);
    let pose = tl.sample(0.0);
    assert!(pose.position.is_finite());
    assert_eq!(pose.position, Vec3::X);
}

#[test]
fn progress_past_last_threshold_holds_last_pose() {
    let tl = KeyframeTimeline::default();
    let seg = tl.locate(1.0);
    assert_eq!(seg.start, seg.end);
    let pose = tl.sample(1.0);
    assert_eq!(pose.position, DEFAULT_KEYFRAMES[5].position);
}

#[test]
fn target_path_is_continuous_in_progress() {
    let tl = KeyframeTimeline::default();
    let mut prev = tl.sample(0.0);
    for i in 1..=1000 {
        let p = i as f32 / 1000.0;
        let pose = tl.sample(p);
        assert!(pose.position.is_finite() && pose.look_at.is_finite());
        assert!(
            (pose.position - prev.position).length() < 0.5,
            "position jump at progress {p}"
        );
        assert!(
            (pose.look_at - prev.look_at).length() < 0.5,
            "look-at jump at progress {p}"
        );
        prev = pose;
    }
}

#[test]
fn each_tick_moves_at_most_one_damping_step() {
    let mut dir = CameraDirector::new(KeyframeTimeline::default(), CAMERA_BLEND);
    for i in 0..=500 {
        let p = (i as f32 / 500.0).min(1.0);
        let before = dir.current();
        let target = dir.timeline().sample(p);
        let after = dir.tick(p);
        let max_step = (target.position - before.position).length() * CAMERA_BLEND;
        assert!((after.position - before.position).length() <= max_step + 1e-5);
    }
}

#[test]
fn reset_snaps_back_to_first_keyframe() {
    let mut dir = CameraDirector::new(KeyframeTimeline::default(), CAMERA_BLEND);
    converge(&mut dir, 0.9);
    dir.reset_to_first_keyframe();
    assert_eq!(dir.current().position, DEFAULT_KEYFRAMES[0].position);
    assert_eq!(dir.current().look_at, DEFAULT_KEYFRAMES[0].look_at);
}

#[test]
fn timeline_validation_rejects_bad_tables() {
    let one = vec![CameraKeyframe::new(0.0, Vec3::ZERO, Vec3::Z, "only")];
    assert_eq!(
        KeyframeTimeline::new(one).unwrap_err(),
        ConfigError::TooFewKeyframes(1)
    );

    let decreasing = vec![
        CameraKeyframe::new(0.0, Vec3::ZERO, Vec3::Z, "a"),
        CameraKeyframe::new(0.6, Vec3::ZERO, Vec3::Z, "b"),
        CameraKeyframe::new(0.4, Vec3::ZERO, Vec3::Z, "c"),
        CameraKeyframe::new(1.0, Vec3::ZERO, Vec3::Z, "d"),
    ];
    assert!(matches!(
        KeyframeTimeline::new(decreasing),
        Err(ConfigError::DecreasingThreshold { index: 2, .. })
    ));

    let short = vec![
        CameraKeyframe::new(0.1, Vec3::ZERO, Vec3::Z, "a"),
        CameraKeyframe::new(0.9, Vec3::ZERO, Vec3::Z, "b"),
    ];
    assert!(matches!(
        KeyframeTimeline::new(short),
        Err(ConfigError::TimelineBounds { .. })
    ));
}
