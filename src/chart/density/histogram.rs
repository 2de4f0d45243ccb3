//! Histogram bands: the bar is cut into equal latency bins, each shaded by
//! an estimated density.

use super::{DensityRenderer, SmokeBar, SmokeStyle};
use crate::chart::scale::LinearScale;
use crate::chart::scene::{LayerBuilder, Paint, Rect};
use crate::state::HISTOGRAM_BINS;

/// Bins never fade out completely
const MIN_WEIGHT: f64 = 0.05;

const BASE_WEIGHT: f64 = 0.1;
const PER_PERCENTILE_WEIGHT: f64 = 0.2;
const PROXIMITY_WEIGHT: f64 = 0.6;

pub struct HistogramBandRenderer;

impl HistogramBandRenderer {
    /// Opacity weight of every bin, lowest latency first
    pub fn bin_weights(bar: &SmokeBar<'_>) -> [f64; HISTOGRAM_BINS] {
        let point = bar.point;
        let range = point.range();
        let bin_height = range / HISTOGRAM_BINS as f64;

        std::array::from_fn(|i| {
            let low = point.min + i as f64 * bin_height;
            let high = low + bin_height;
            let center = low + bin_height / 2.0;
            let last = i == HISTOGRAM_BINS - 1;

            let weight = match point.percentiles() {
                Some(p) => {
                    let inside = p
                        .values()
                        .iter()
                        .filter(|&&v| v >= low && (v < high || (last && v <= high)))
                        .count();
                    let proximity = (1.0 - (center - p.p50).abs() / range).max(0.0);
                    BASE_WEIGHT
                        + PER_PERCENTILE_WEIGHT * inside as f64
                        + PROXIMITY_WEIGHT * proximity
                }
                None => {
                    let z = (center - point.avg) / bar.fallback_spread();
                    (-0.5 * z * z).exp()
                }
            };
            weight.clamp(MIN_WEIGHT, 1.0)
        })
    }
}

impl DensityRenderer for HistogramBandRenderer {
    fn render(&self, bar: &SmokeBar<'_>, y: &LinearScale, style: &SmokeStyle, out: &mut LayerBuilder<'_>) {
        let Some(g) = bar.geometry(y) else {
            return;
        };

        let point = bar.point;
        let bin_height = point.range() / HISTOGRAM_BINS as f64;
        for (i, weight) in Self::bin_weights(bar).into_iter().enumerate() {
            let low = point.min + i as f64 * bin_height;
            let top = y.scale(low + bin_height);
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
