//! Bucket interval estimation and gap-aware segmentation.

use crate::state::{ChartPoint, LatencyPoint, GAP_FACTOR, INTERVAL_SAMPLE_LIMIT};

/// Anything positioned on the time axis
pub trait Timestamped {
    /// Start of the item in milliseconds
    fn timestamp(&self) -> i64;
}

impl Timestamped for ChartPoint {
    #[inline]
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Timestamped for LatencyPoint {
    #[inline]
    fn timestamp(&self) -> i64 {
        self.point.timestamp
    }
}

/// Infer the typical spacing between consecutive buckets.
///
/// Takes the deltas between consecutive points among the first
/// [`INTERVAL_SAMPLE_LIMIT`] and returns their lower median. Returns 0 when
/// there are fewer than two points.
pub fn estimate_interval<T: Timestamped>(points: &[T]) -> i64 {
    let limit = points.len().min(INTERVAL_SAMPLE_LIMIT);
    if limit < 2 {
        return 0;
    }

    let mut deltas: Vec<i64> = points[..limit]
        .windows(2)
        .map(|w| w[1].timestamp() - w[0].timestamp())
        .collect();
    deltas.sort_unstable();
    deltas[(deltas.len() - 1) / 2]
}

/// True when the distance between two adjacent timestamps is a data gap
#[inline]
pub fn has_gap(previous: i64, next: i64, interval: i64) -> bool {
    interval > 0 && next - previous > GAP_FACTOR * interval
}

/// Split an ordered sequence into maximal runs without internal gaps.
///
/// Concatenating the returned slices yields the input; no slice is empty.
pub fn split_segments<T: Timestamped>(points: &[T], interval: i64) -> Vec<&[T]> {
    let mut segments = Vec::new();
    if points.is_empty() {
        return segments;
    }

    let mut start = 0;
    for i in 1..points.len() {
        if has_gap(points[i - 1].timestamp(), points[i].timestamp(), interval) {
            segments.push(&points[start..i]);
            start = i;
        }
    }
    segments.push(&points[start..]);
    segments
}
