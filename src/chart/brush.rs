//! Drag-to-zoom range selection.

use serde::{Deserialize, Serialize};

use crate::chart::scale::TimeScale;
use crate::state::BRUSH_MIN_WIDTH;

/// A time range selected by the user, start strictly before end
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub start: i64,
    pub end: i64,
}

impl ZoomRange {
    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// Horizontal selection state in plot pixels.
///
/// The controller only tracks the dragged span; the owner decides what a
/// finished selection means.
#[derive(Clone, Debug, Default)]
pub struct BrushController {
    /// Plot width the selection is clamped to
    width: f64,
    anchor: Option<f64>,
    current: f64,
}

impl BrushController {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
        self.cancel();
    }

    fn clamp(&self, x: f64) -> f64 {
        x.clamp(0.0, self.width)
    }

    pub fn begin(&mut self, x: f64) {
        let x = self.clamp(x);
        self.anchor = Some(x);
        self.current = x;
    }

    pub fn update(&mut self, x: f64) {
        if self.anchor.is_some() {
            self.current = self.clamp(x);
        }
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current `(left, right)` selection in plot pixels
    pub fn selection(&self) -> Option<(f64, f64)> {
        self.anchor
            .map(|anchor| (anchor.min(self.current), anchor.max(self.current)))
    }

    /// Finish the drag at `x`. Returns the selected range unless the
    /// selection is narrower than [`BRUSH_MIN_WIDTH`]. The selection is
    /// cleared either way.
    pub fn end(&mut self, x: f64, scale: &TimeScale) -> Option<ZoomRange> {
        self.update(x);
        let (left, right) = self.selection()?;
        self.cancel();

        if right - left < BRUSH_MIN_WIDTH {
            return None;
        }
        let start = scale.invert(left).round() as i64;
        let end = scale.invert(right).round() as i64;
        (start < end).then_some(ZoomRange { start, end })
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
        self.current = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_normalized_and_clamped() {
        let mut brush = BrushController::new(100.0);
        brush.begin(80.0);
        brush.update(150.0);
        assert_eq!(brush.selection(), Some((80.0, 100.0)));
        brush.update(-20.0);
        assert_eq!(brush.selection(), Some((0.0, 80.0)));
    }

    #[test]
    fn test_update_without_begin_is_ignored() {
        let mut brush = BrushController::new(100.0);
        brush.update(50.0);
        assert!(brush.selection().is_none());
        let x = TimeScale::new(0, 1000, 100.0);
        assert!(brush.end(60.0, &x).is_none());
    }

    #[test]
    fn test_end_inverts_edges() {
        let x = TimeScale::new(0, 1000, 100.0);
        let mut brush = BrushController::new(100.0);
        brush.begin(70.0);
        let range = brush.end(20.0, &x).unwrap();
        assert_eq!(range, ZoomRange { start: 200, end: 700 });
        assert!(!brush.is_active());
    }
}
