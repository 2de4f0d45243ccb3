//! Smoke-bar density rendering.
//!
//! Every latency bucket becomes one bar spanning min→max. How the spread
//! inside the bar is shaded depends on the active [`DensityMode`]; each mode
//! is a [`DensityRenderer`] selected once per render pass.
//!
//! - [`classic`] - translucent range plus a dense band around the average
//! - [`gradient`] - per-bar vertical gradient peaking at the median
//! - [`percentile`] - three nested coverage bands
//! - [`histogram`] - eight binned opacity steps

pub mod classic;
pub mod gradient;
pub mod histogram;
pub mod percentile;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::analysis::{has_gap, Timestamped};
use crate::chart::scale::{ChartScales, LinearScale, TimeScale};
use crate::chart::scene::{Color, LayerBuilder};
use crate::state::{LatencyPoint, FALLBACK_SPREAD_DIVISOR, MIN_BAR_HALF_WIDTH, SMOKE_COLOR};

/// Which density encoding the smoke bars use
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DensityMode {
    #[default]
    Classic,
    Gradient,
    PercentileBand,
    HistogramBand,
}

impl DensityMode {
    /// Human readable name for menus and the legend
    pub fn label(&self) -> &'static str {
        match self {
            DensityMode::Classic => "Classic",
            DensityMode::Gradient => "Gradient",
            DensityMode::PercentileBand => "Percentile bands",
            DensityMode::HistogramBand => "Histogram bands",
        }
    }

    /// The renderer implementing this mode
    pub fn renderer(&self) -> &'static dyn DensityRenderer {
        match self {
            DensityMode::Classic => &classic::ClassicRenderer,
            DensityMode::Gradient => &gradient::GradientRenderer,
            DensityMode::PercentileBand => &percentile::PercentileBandRenderer,
            DensityMode::HistogramBand => &histogram::HistogramBandRenderer,
        }
    }
}

/// Base color and peak opacity of the smoke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmokeStyle {
    pub color: Color,
    pub max_opacity: f64,
}

impl Default for SmokeStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(SMOKE_COLOR),
            max_opacity: 0.85,
        }
    }
}

impl SmokeStyle {
    /// Smoke color at a fraction of the peak opacity
    pub fn shade(&self, weight: f64) -> Color {
        self.color.with_alpha(self.max_opacity * weight.clamp(0.0, 1.0))
    }
}

/// Horizontal extent of one bar in plot pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpan {
    pub x0: f64,
    pub x1: f64,
}

impl BarSpan {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

/// Compute tiled horizontal spans for an ordered series.
///
/// Each edge sits halfway to the neighbour on that side. At a gap or at the
/// ends of the series the edge sits half a bucket interval from the point.
/// Spans are at least one pixel wide.
pub fn bar_spans<T: Timestamped>(points: &[T], interval: i64, x: &TimeScale) -> Vec<BarSpan> {
    let half = if interval > 0 {
        x.width_of(interval as f64 / 2.0)
    } else {
        MIN_BAR_HALF_WIDTH
    };

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let t = point.timestamp();
            let center = x.scale(t);

            let left = match i.checked_sub(1).map(|j| points[j].timestamp()) {
                Some(prev) if !has_gap(prev, t, interval) => (x.scale(prev) + center) / 2.0,
                _ => center - half,
            };
            let right = match points.get(i + 1).map(|p| p.timestamp()) {
                Some(next) if !has_gap(t, next, interval) => (center + x.scale(next)) / 2.0,
                _ => center + half,
            };

            if right - left < 1.0 {
                BarSpan {
                    x0: center - 0.5,
                    x1: center + 0.5,
                }
            } else {
                BarSpan {
                    x0: left,
                    x1: right,
                }
            }
        })
        .collect()
}

/// One bucket ready to be shaded
#[derive(Clone, Copy, Debug)]
pub struct SmokeBar<'a> {
    pub span: BarSpan,
    pub point: &'a LatencyPoint,
}

/// Pixel geometry of a bar with a positive extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub x0: f64,
    pub x1: f64,
    /// Pixel row of the maximum (top edge)
    pub top: f64,
    /// Pixel row of the minimum (bottom edge)
    pub bottom: f64,
    pub avg: f64,
}

impl BarGeometry {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

impl SmokeBar<'_> {
    /// Geometry of the bar, or `None` when it has no latency spread
    pub fn geometry(&self, y: &LinearScale) -> Option<BarGeometry> {
        if self.point.range() <= 0.0 || self.span.width() <= 0.0 {
            return None;
        }
        let top = y.scale(self.point.max);
        let bottom = y.scale(self.point.min);
        let height = bottom - top;
        if !(height.is_finite() && height > 0.0) {
            return None;
        }
        Some(BarGeometry {
            x0: self.span.x0,
            x1: self.span.x1,
            top,
            bottom,
            avg: y.scale(self.point.avg),
        })
    }

    /// Standard deviation proxy used when no percentiles are known
    pub fn fallback_spread(&self) -> f64 {
        self.point.range() / FALLBACK_SPREAD_DIVISOR
    }
}

/// Draws the density shading of a single bar
pub trait DensityRenderer {
    fn render(&self, bar: &SmokeBar<'_>, y: &LinearScale, style: &SmokeStyle, out: &mut LayerBuilder<'_>);
}

/// Shade every bar of the series with the given mode; returns the number of
/// bars with drawable geometry
pub fn render_density(
    out: &mut LayerBuilder<'_>,
    valid: &[LatencyPoint],
    interval: i64,
    scales: &ChartScales,
    mode: DensityMode,
    style: &SmokeStyle,
) -> usize {
    let renderer = mode.renderer();
    let spans = bar_spans(valid, interval, &scales.x);

    let mut drawn = 0;
    for (point, span) in valid.iter().zip(spans) {
        let bar = SmokeBar { span, point };
        if bar.geometry(&scales.y).is_none() {
            continue;
        }
        renderer.render(&bar, &scales.y, style, out);
        drawn += 1;
    }
    drawn
}
