use super::{Control, FOCUS_ORDER};

/// Keeps keyboard focus cycling among the dialog controls.
#[derive(Debug, Clone)]
pub struct FocusTrap {
    controls: Vec<Control>,
}

impl Default for FocusTrap {
    fn default() -> Self {
        Self::new(FOCUS_ORDER.to_vec())
    }
}

impl FocusTrap {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    /// Control that Tab (or Shift+Tab when `backwards`) moves to from
    /// `current`. From the dialog itself, Tab enters at the first control and
    /// Shift+Tab at the last.
    pub fn next(&self, current: Option<Control>, backwards: bool) -> Option<Control> {
        let len = self.controls.len();
        if len == 0 {
            return None;
        }

        let position = current.and_then(|c| self.controls.iter().position(|&k| k == c));
        let index = match (position, backwards) {
            (None, false) => 0,
            (None, true) => len - 1,
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
        };
        Some(self.controls[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_wraps_last_to_first() {
        let trap = FocusTrap::default();
        assert_eq!(
            trap.next(Some(Control::DetailsToggle), false),
            Some(Control::Close)
        );
        assert_eq!(trap.next(Some(Control::Close), false), Some(Control::Previous));
    }

    #[test]
    fn test_shift_tab_wraps_first_to_last() {
        let trap = FocusTrap::default();
        assert_eq!(
            trap.next(Some(Control::Close), true),
            Some(Control::DetailsToggle)
        );
        assert_eq!(trap.next(None, true), Some(Control::DetailsToggle));
        assert_eq!(trap.next(None, false), Some(Control::Close));
    }

    #[test]
    fn test_empty_trap() {
        assert_eq!(FocusTrap::new(Vec::new()).next(None, false), None);
    }
}
