//! Quiet-window coalescing for viewport resizes.
//!
//! Every request restarts the countdown. The most recent request is handed
//! back once, after the window elapses without another request.

use std::time::Duration;

/// Pending resize request with its countdown.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
    window: Duration,
    pending: Option<([f32; 2], Duration)>,
}

impl ResizeDebounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a request, replacing any earlier one and restarting the timer.
    pub fn request(&mut self, width: f32, height: f32) {
        self.pending = Some(([width, height], self.window));
    }

    /// Advance the countdown by `dt`.
    ///
    /// Returns the settled bounds on the call where the quiet window runs out.
    pub fn advance(&mut self, dt: Duration) -> Option<[f32; 2]> {
        let (bounds, remaining) = self.pending.as_mut()?;
        *remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            let bounds = *bounds;
            self.pending = None;
            Some(bounds)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
