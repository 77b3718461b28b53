#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right to left; shows the next image.
    Left,
    /// Finger moved left to right; shows the previous image.
    Right,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start: Option<(f32, f32)>,
    end: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
            end: None,
        }
    }

    pub fn start(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
        self.end = None;
    }

    pub fn update(&mut self, x: f32, y: f32) {
        if self.start.is_some() {
            self.end = Some((x, y));
        }
    }

    /// Ends the gesture. A swipe needs a horizontal travel strictly greater
    /// than the threshold that also dominates the vertical travel.
    pub fn finish(&mut self) -> Option<SwipeDirection> {
        let start = self.start.take();
        let end = self.end.take();
        let ((x0, y0), (x1, y1)) = (start?, end?);

        let dx = x1 - x0;
        let dy = y1 - y0;
        if dx.abs() > dy.abs() && dx.abs() > self.threshold {
            Some(if dx < 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            })
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
    }
}
