use std::time::{Duration, Instant};

/// Auto-hide for the navigation arrows and the details toggle.
#[derive(Debug, Clone)]
pub struct ControlFade {
    delay: Duration,
    deadline: Option<Instant>,
    visible: bool,
}

impl ControlFade {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            visible: false,
        }
    }

    /// Shows the controls and restarts the idle timer. Pinned controls (details
    /// panel expanded) have no timer and stay visible.
    pub fn show(&mut self, now: Instant, pinned: bool) {
        self.visible = true;
        self.deadline = if pinned { None } else { Some(now + self.delay) };
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.deadline = None;
    }

    /// Hides the controls once the idle delay has passed; true when this call
    /// hid them.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
