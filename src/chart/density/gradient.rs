//! Gradient smoke: one vertical gradient per bar, densest at the median.

use super::{DensityRenderer, SmokeBar, SmokeStyle};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{GradientStop, LayerBuilder, Paint, Rect};

/// Opacity weight at the outer edges of the bar
const EDGE_WEIGHT: f64 = 0.08;

/// Opacity weight at the bottom (minimum) when percentiles are known
const MIN_WEIGHT: f64 = 0.15;

pub struct GradientRenderer;

impl GradientRenderer {
    /// `(offset, weight)` pairs, top of the bar first
    fn stops(bar: &SmokeBar<'_>) -> Vec<(f64, f64)> {
        let point = bar.point;
        let range = point.range();
        let offset = |value: f64| ((point.max - value) / range).clamp(0.0, 1.0);

        let mut stops = match point.percentiles() {
            Some(p) => vec![
                (0.0, EDGE_WEIGHT),
                (offset(p.p99), 0.2),
                (offset(p.p95), 0.35),
                (offset(p.p90), 0.5),
                (offset(p.p75), 0.75),
                (offset(p.p50), 1.0),
                (1.0, MIN_WEIGHT),
            ],
            None => vec![(0.0, EDGE_WEIGHT), (offset(point.avg), 1.0), (1.0, EDGE_WEIGHT)],
        };
        stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        stops
    }
}

impl DensityRenderer for GradientRenderer {
    fn render(&self, bar: &SmokeBar<'_>, y: &LinearScale, style: &SmokeStyle, out: &mut LayerBuilder<'_>) {
        let Some(g) = bar.geometry(y) else {
            return;
        };

        let stops = Self::stops(bar)
            .into_iter()
            .map(|(offset, weight)| GradientStop {
                offset,
                color: style.shade(weight),
            })
            .collect();
        let gradient = out.define_gradient(stops);
        out.fill_rect(
            Rect::from_edges(g.x0, g.top, g.x1, g.bottom),
            Paint::Gradient(gradient),
        );
    }
}
