// Host-side tests for scroll sampling and throttling.

use aero_core::*;

fn metrics_at(scroll_y: f64) -> ScrollMetrics {
    ScrollMetrics::new(scroll_y, 2000.0, 800.0)
}

#[test]
fn progress_is_normalized_and_clamped() {
    assert_eq!(metrics_at(0.0).progress(), 0.0);
    assert!((metrics_at(600.0).progress() - 0.5).abs() < 1e-6);
    assert_eq!(metrics_at(1200.0).progress(), 1.0);
    // overscroll (rubber-banding) stays in range
    assert_eq!(metrics_at(1500.0).progress(), 1.0);
    assert_eq!(metrics_at(-40.0).progress(), 0.0);
}

#[test]
fn mount_publishes_initial_value_immediately() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(metrics_at(300.0));
    assert!((progress.get() - 0.25).abs() < 1e-6);
    assert_eq!(sampler.applied_count(), 1);
    assert!(!sampler.has_pending());
}

#[test]
fn burst_within_one_frame_applies_only_the_last_event() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(metrics_at(0.0));

    sampler.on_scroll(100.0, metrics_at(120.0));
    sampler.on_scroll(110.0, metrics_at(600.0));
    assert_eq!(sampler.due_ms(), Some(116.0), "later events keep the window");
    assert_eq!(sampler.poll(112.0), None);
    assert_eq!(progress.get(), 0.0, "superseded event must not land");

    assert_eq!(sampler.poll(116.0), Some(0.5));
    assert_eq!(sampler.applied_count(), 2);
    assert_eq!(sampler.poll(500.0), None);
}

#[test]
fn events_a_frame_apart_each_apply_once() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(metrics_at(0.0));

    sampler.on_scroll(100.0, metrics_at(120.0));
    sampler.on_scroll(116.0, metrics_at(600.0));
    assert!((progress.get() - 0.1).abs() < 1e-6);
    assert_eq!(sampler.applied_count(), 2);

    sampler.poll(132.0);
    assert!((progress.get() - 0.5).abs() < 1e-6);
    assert_eq!(sampler.applied_count(), 3);
}

#[test]
fn cancel_drops_pending_sample() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(metrics_at(0.0));
    sampler.on_scroll(10.0, metrics_at(1200.0));
    sampler.cancel();
    assert_eq!(sampler.poll(1000.0), None);
    assert_eq!(progress.get(), 0.0);
    assert_eq!(sampler.applied_count(), 1);
}

#[test]
fn unscrollable_document_reads_zero() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(ScrollMetrics::new(0.0, 700.0, 800.0));
    assert_eq!(progress.get(), 0.0);
}

#[test]
fn continuous_scrolling_keeps_landing_once_per_window() {
    let progress = ScrollProgress::new();
    let mut sampler = ScrollSampler::new(progress.clone(), SCROLL_THROTTLE_MS);
    sampler.mount(metrics_at(0.0));

    // 120 Hz scrolling for one second, one pixel per event
    let mut last_apply = 0.0;
    let mut longest_gap: f64 = 0.0;
    let mut seen = sampler.applied_count();
    for k in 0..125u32 {
        let t = k as f64 * 8.0;
        sampler.on_scroll(t, metrics_at(k as f64 + 1.0));
        sampler.poll(t + 4.0);
        if sampler.applied_count() > seen {
            seen = sampler.applied_count();
            longest_gap = longest_gap.max(t - last_apply);
            last_apply = t;
        }
    }

    let updates = sampler.applied_count() - 1;
    assert!(updates >= 60, "only {updates} updates in a second of scrolling");
    assert!(updates <= 63, "{updates} updates exceeds one per 16 ms");
    assert!(longest_gap <= SCROLL_THROTTLE_MS + 8.0, "camera stalled for {longest_gap} ms");
    // the reading trails the page by at most one window
    let latest = metrics_at(125.0).progress();
    assert!(latest - progress.get() <= 3.0 / 1200.0);

    sampler.poll(2000.0);
    assert_eq!(progress.get(), latest);
}
