//! Classic smoke: a faint min-max column with a denser band on the average.

use super::{DensityRenderer, SmokeBar, SmokeStyle};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{LayerBuilder, Paint, Rect};

/// Minimum height of the average band in pixels
const BAND_MIN_HEIGHT: f64 = 4.0;

/// Average band height as a fraction of the bar height
const BAND_FRACTION: f64 = 0.3;

const RANGE_WEIGHT: f64 = 0.3;
const BAND_WEIGHT: f64 = 0.75;

pub struct ClassicRenderer;

impl DensityRenderer for ClassicRenderer {
    fn render(&self, bar: &SmokeBar<'_>, y: &LinearScale, style: &SmokeStyle, out: &mut LayerBuilder<'_>) {
        let Some(g) = bar.geometry(y) else {
            return;
        };

        out.fill_rect(
            Rect::from_edges(g.x0, g.top, g.x1, g.bottom),
            Paint::Solid(style.shade(RANGE_WEIGHT)),
        );

        let band = (g.height() * BAND_FRACTION).max(BAND_MIN_HEIGHT);
        out.fill_rect(
            Rect::new(g.x0, g.avg - band / 2.0, g.width(), band),
            Paint::Solid(style.shade(BAND_WEIGHT)),
        );
    }
}
