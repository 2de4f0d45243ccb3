//! Median/min/max/average lines drawn per gap-free segment.

use strum::EnumIter;

use crate::analysis::split_segments;
use crate::chart::curve::monotone_path;
use crate::chart::scale::ChartScales;
use crate::chart::scene::{Color, DrawCommand, LayerBuilder, Pos, Stroke};
use crate::settings::ChartPreferences;
use crate::state::{LatencyPoint, AVG_COLOR, MAX_COLOR, MAX_MEDIAN_MARKERS, MEDIAN_COLOR, MIN_COLOR};

const MARKER_RADIUS: f64 = 2.5;

/// One of the summary lines drawn over the smoke
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum StatLine {
    Max,
    Min,
    Avg,
    Median,
}

impl StatLine {
    pub fn value(&self, point: &LatencyPoint) -> f64 {
        match self {
            StatLine::Max => point.max,
            StatLine::Min => point.min,
            StatLine::Avg => point.avg,
            StatLine::Median => point.median(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatLine::Max => "Max",
            StatLine::Min => "Min",
            StatLine::Avg => "Avg",
            StatLine::Median => "Median",
        }
    }

    pub fn stroke(&self) -> Stroke {
        match self {
            StatLine::Max => Stroke::new(1.0, Color::rgb(MAX_COLOR).with_alpha(0.8)).dashed(4.0, 3.0),
            StatLine::Min => Stroke::new(1.0, Color::rgb(MIN_COLOR).with_alpha(0.8)).dashed(4.0, 3.0),
            StatLine::Avg => Stroke::new(1.25, Color::rgb(AVG_COLOR).with_alpha(0.9)),
            StatLine::Median => Stroke::new(2.0, Color::rgb(MEDIAN_COLOR)),
        }
    }

    pub fn is_enabled(&self, prefs: &ChartPreferences) -> bool {
        match self {
            StatLine::Max => prefs.show_max,
            StatLine::Min => prefs.show_min,
            StatLine::Avg => prefs.show_avg,
            StatLine::Median => prefs.show_median,
        }
    }
}

/// Indices of the median markers: evenly spaced, at most
/// [`MAX_MEDIAN_MARKERS`], always ending with the last point
pub fn median_marker_indices(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    if len <= MAX_MEDIAN_MARKERS {
        return (0..len).collect();
    }

    let step = len.div_ceil(MAX_MEDIAN_MARKERS - 1);
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// Draw every enabled stat line; returns the number of paths emitted
pub fn render_stat_lines(
    out: &mut LayerBuilder<'_>,
    valid: &[LatencyPoint],
    interval: i64,
    scales: &ChartScales,
    prefs: &ChartPreferences,
) -> usize {
    use strum::IntoEnumIterator;

    let segments = split_segments(valid, interval);
    let mut paths = 0;

    for line in StatLine::iter().filter(|l| l.is_enabled(prefs)) {
        for segment in segments.iter().filter(|s| s.len() >= 2) {
            let points: Vec<Pos> = segment
                .iter()
                .map(|p| Pos::new(scales.x.scale(p.timestamp()), scales.y.scale(line.value(p))))
                .collect();
            out.push(DrawCommand::Path {
                segments: monotone_path(&points),
                stroke: line.stroke(),
            });
            paths += 1;
        }

        if line == StatLine::Median {
            for i in median_marker_indices(valid.len()) {
                let point = &valid[i];
                out.push(DrawCommand::Circle {
                    center: Pos::new(
                        scales.x.scale(point.timestamp()),
                        scales.y.scale(point.median()),
                    ),
                    radius: MARKER_RADIUS,
                    fill: Color::rgb(point.point.severity().color()),
                    stroke: None,
                });
            }
        }
    }
    paths
}
