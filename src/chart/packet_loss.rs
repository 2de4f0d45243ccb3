//! Packet-loss background regions.
//!
//! Buckets are colored by loss severity. Runs of adjacent buckets with the
//! same severity and no time gap collapse into one rectangle, so a quiet
//! series costs a single primitive.

use crate::analysis::has_gap;
use crate::chart::density::bar_spans;
use crate::chart::scale::TimeScale;
use crate::chart::scene::{Color, LayerBuilder, Paint, Rect};
use crate::state::{ChartPoint, LossSeverity};

/// Opacity of the region fill
const REGION_OPACITY: f64 = 0.18;

/// A merged run of same-severity buckets
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LossRegion {
    pub severity: LossSeverity,
    /// Left edge of the first bucket in plot pixels
    pub x0: f64,
    /// Right edge of the last bucket in plot pixels
    pub x1: f64,
    /// Index of the first bucket in the point list
    pub first: usize,
    /// Index of the last bucket in the point list
    pub last: usize,
}

/// Severity of a bucket, `None` for buckets that break region continuity
fn region_severity(point: &ChartPoint) -> Option<LossSeverity> {
    if !point.has_samples() {
        return None;
    }
    match point.severity() {
        LossSeverity::None => None,
        severity => Some(severity),
    }
}

/// Greedy single-pass merge of lossy buckets into regions
pub fn loss_regions(points: &[ChartPoint], interval: i64, x: &TimeScale) -> Vec<LossRegion> {
    let spans = bar_spans(points, interval, x);
    let mut regions = Vec::new();
    let mut current: Option<LossRegion> = None;

    for (i, (point, span)) in points.iter().zip(&spans).enumerate() {
        let severity = region_severity(point);

        if let (Some(region), Some(severity)) = (current.as_mut(), severity) {
            let contiguous = region.last + 1 == i
                && !has_gap(points[region.last].timestamp, point.timestamp, interval);
            if region.severity == severity && contiguous {
                region.x1 = span.x1;
                region.last = i;
                continue;
            }
        }

        regions.extend(current.take());
        current = severity.map(|severity| LossRegion {
            severity,
            x0: span.x0,
            x1: span.x1,
            first: i,
            last: i,
        });
    }
    regions.extend(current);
    regions
}

/// Draw regions as full-height translucent columns
pub fn render_packet_loss(out: &mut LayerBuilder<'_>, regions: &[LossRegion], chart_height: f64) {
    for region in regions {
        out.fill_rect(
            Rect::from_edges(region.x0, 0.0, region.x1, chart_height),
            Paint::Solid(Color::rgb(region.severity.color()).with_alpha(REGION_OPACITY)),
        );
    }
}
