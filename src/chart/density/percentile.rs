//! Percentile bands: three nested bands of increasing opacity.
//!
//! With real percentiles the upper band edges are p95, p90 and p75 and the
//! lower edges mirror them around p50. Without percentiles the bands are
//! `avg ± z·σ` with `σ = range / 4` and z-scores for roughly 95%, 75% and 50%
//! coverage of a normal distribution. The fallback is a visual
//! approximation only.

use super::{DensityRenderer, SmokeBar, SmokeStyle};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{LayerBuilder, Paint, Rect};

/// z-scores for the outer, middle and inner band
const Z_SCORES: [f64; 3] = [1.96, 1.15, 0.67];

/// Opacity weights for the outer, middle and inner band
const BAND_WEIGHTS: [f64; 3] = [0.2, 0.35, 0.55];

pub struct PercentileBandRenderer;

impl PercentileBandRenderer {
    /// `(low, high)` latency bounds of the outer, middle and inner band
    pub fn bands(bar: &SmokeBar<'_>) -> [(f64, f64); 3] {
        let point = bar.point;
        let clamp = |v: f64| v.clamp(point.min, point.max);

        match point.percentiles() {
            Some(p) => {
                let mirror = |upper: f64| (clamp(2.0 * p.p50 - upper), clamp(upper));
                [mirror(p.p95), mirror(p.p90), mirror(p.p75)]
            }
            None => {
                let sd = bar.fallback_spread();
                Z_SCORES.map(|z| (clamp(point.avg - z * sd), clamp(point.avg + z * sd)))
            }
        }
    }
}

impl DensityRenderer for PercentileBandRenderer {
    fn render(&self, bar: &SmokeBar<'_>, y: &LinearScale, style: &SmokeStyle, out: &mut LayerBuilder<'_>) {
        let Some(g) = bar.geometry(y) else {
            return;
        };

        for ((low, high), weight) in Self::bands(bar).into_iter().zip(BAND_WEIGHTS) {
            let top = y.scale(high);
            let bottom = y.scale(low);
            if bottom - top <= 0.0 {
                continue;
            }
            out.fill_rect(
                Rect::from_edges(g.x0, top, g.x1, bottom),
                Paint::Solid(style.shade(weight)),
            );
        }
    }
}
