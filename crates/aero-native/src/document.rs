use aero_core::ScrollMetrics;

/// Page length in viewport heights; roughly one per section of the site.
pub const PAGE_VIEWPORTS: f64 = 6.0;
pub const LINE_PX: f64 = 40.0; // one wheel notch / arrow key

/// A stand-in for the scrolled page: only the numbers the sampler reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedDocument {
    scroll_y: f64,
    viewport_height: f64,
}

impl SimulatedDocument {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: viewport_height.max(1.0),
        }
    }

    pub fn scroll_height(&self) -> f64 {
        self.viewport_height * PAGE_VIEWPORTS
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Keep the same relative position when the window is resized.
    pub fn set_viewport_height(&mut self, height: f64) {
        let fraction = if self.max_scroll() > 0.0 {
            self.scroll_y / self.max_scroll()
        } else {
            0.0
        };
        self.viewport_height = height.max(1.0);
        self.scroll_y = fraction * self.max_scroll();
    }

    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_y + dy);
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn page(&self) -> f64 {
        self.viewport_height
    }

    pub fn end(&self) -> f64 {
        self.max_scroll()
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_y, self.scroll_height(), self.viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_is_clamped_to_the_page() {
        let mut doc = SimulatedDocument::new(800.0);
        doc.scroll_by(-100.0);
        assert_eq!(doc.scroll_y(), 0.0);
        doc.scroll_by(1.0e6);
        assert_eq!(doc.scroll_y(), 800.0 * (PAGE_VIEWPORTS - 1.0));
        assert!((doc.metrics().progress() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn resize_keeps_relative_position() {
        let mut doc = SimulatedDocument::new(800.0);
        doc.scroll_to(doc.end() / 2.0);
        doc.set_viewport_height(400.0);
        assert!((doc.metrics().progress() - 0.5).abs() < 1e-6);
    }
}
