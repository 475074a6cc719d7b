//! Scroll progress sampling.
//!
//! The page scroll position is reduced to a single normalized scalar that the
//! camera director reads once per frame. [`ScrollProgress`] is the shared
//! handle (single writer: the sampler); [`ScrollSampler`] owns the throttle.

use std::cell::Cell;
use std::rc::Rc;

/// Shared, cloneable scroll progress in \[0, 1\].
#[derive(Clone, Debug, Default)]
pub struct ScrollProgress(Rc<Cell<f32>>);

impl ScrollProgress {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    /// Store a new value, clamped to \[0, 1\]. NaN is stored as 0.
    pub fn set(&self, value: f32) {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.0.set(v);
    }
}

/// Raw document measurements, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    /// Normalized progress; 0 when the document cannot scroll.
    pub fn progress(&self) -> f32 {
        let range = self.scroll_height - self.viewport_height;
        if range > 0.0 {
            (self.scroll_y / range).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingSample {
    progress: f32,
    due_ms: f64,
}

/// Throttle in front of a [`ScrollProgress`].
///
/// The first unapplied event opens a throttle window; later events inside the
/// window only replace the pending sample. A pending sample that is already
/// due when the next event arrives is applied first, so bursts collapse to
/// their last sample and a continuous stream still lands once per window.
pub struct ScrollSampler {
    progress: ScrollProgress,
    throttle_ms: f64,
    pending: Option<PendingSample>,
    applied: u64,
}

impl ScrollSampler {
    pub fn new(progress: ScrollProgress, throttle_ms: f64) -> Self {
        Self {
            progress,
            throttle_ms: throttle_ms.max(0.0),
            pending: None,
            applied: 0,
        }
    }

    pub fn handle(&self) -> ScrollProgress {
        self.progress.clone()
    }

    pub fn throttle_ms(&self) -> f64 {
        self.throttle_ms
    }

    /// Establish the initial value before any user scroll.
    pub fn mount(&mut self, metrics: ScrollMetrics) {
        self.pending = None;
        self.apply(metrics.progress());
    }

    /// Record a scroll event at `now_ms`.
    pub fn on_scroll(&mut self, now_ms: f64, metrics: ScrollMetrics) {
        self.poll(now_ms);
        let progress = metrics.progress();
        // window stays anchored at its first event
        let due_ms = self.pending.map_or(now_ms + self.throttle_ms, |p| p.due_ms);
        self.pending = Some(PendingSample { progress, due_ms });
    }

    /// Apply the pending sample if its window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<f32> {
        match self.pending {
            Some(p) if now_ms >= p.due_ms => {
                self.pending = None;
                self.apply(p.progress);
                Some(self.progress.get())
            }
            _ => None,
        }
    }

    /// Drop any pending sample so nothing is written after teardown.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// When the pending sample lands, if there is one.
    pub fn due_ms(&self) -> Option<f64> {
        self.pending.map(|p| p.due_ms)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of updates written to the shared handle so far.
    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    fn apply(&mut self, progress: f32) {
        self.progress.set(progress);
        self.applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_handle_clamps_and_shares() {
        let a = ScrollProgress::new();
        let b = a.clone();
        a.set(1.7);
        assert_eq!(b.get(), 1.0);
        a.set(-0.3);
        assert_eq!(b.get(), 0.0);
        a.set(f32::NAN);
        assert_eq!(b.get(), 0.0);
    }

    #[test]
    fn zero_range_document_reads_zero() {
        assert_eq!(ScrollMetrics::new(120.0, 800.0, 800.0).progress(), 0.0);
        assert_eq!(ScrollMetrics::new(0.0, 600.0, 800.0).progress(), 0.0);
    }
}
