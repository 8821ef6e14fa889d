//! Horizontal swipe detection across a touch-start/touch-end pair

/// Minimum horizontal displacement that counts as a swipe (exclusive)
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Start coordinate of the touch in progress, if any
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where a touch began, discarding any unpaired earlier start
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Close the gesture; returns true if it was a swipe in either direction
    ///
    /// A touch-end with no recorded start is never a swipe.
    pub fn touch_end(&mut self, x: f64) -> bool {
        match self.start_x.take() {
            Some(start) => (x - start).abs() > SWIPE_THRESHOLD,
            None => false,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }
}
