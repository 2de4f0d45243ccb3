//! Bucket normalization.

use rayon::prelude::*;

use crate::state::{ChartPoint, LatencyPoint, RawBucket};

/// Above this many buckets conversion and sorting run on the rayon pool
const PARALLEL_THRESHOLD: usize = 10_000;

/// Packet-loss percentage for a bucket, always within `[0, 100]`
pub fn packet_loss_percent(failed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (failed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Convert raw buckets into chart points sorted by start timestamp.
///
/// The sort is stable, so buckets with equal start times keep input order.
pub fn prepare_points(buckets: &[RawBucket]) -> Vec<ChartPoint> {
    if buckets.len() > PARALLEL_THRESHOLD {
        let mut points: Vec<ChartPoint> = buckets.par_iter().map(to_chart_point).collect();
        points.par_sort_by_key(|p| p.timestamp);
        points
    } else {
        let mut points: Vec<ChartPoint> = buckets.iter().map(to_chart_point).collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }
}

/// Points whose min, avg and max are all known, in the same order
pub fn valid_latency_points(points: &[ChartPoint]) -> Vec<LatencyPoint> {
    points.iter().filter_map(ChartPoint::latency).collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn to_chart_point(bucket: &RawBucket) -> ChartPoint {
    let mut min = finite(bucket.min);
    let mut max = finite(bucket.max);
    let mut avg = finite(bucket.avg);

    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            tracing::debug!(
                "Bucket at {} has min {} above max {}, swapping",
                bucket.start,
                lo,
                hi
            );
            min = Some(hi);
            max = Some(lo);
        }
    }
    if let (Some(lo), Some(hi), Some(mean)) = (min, max, avg) {
        avg = Some(mean.clamp(lo, hi));
    }

    ChartPoint {
        timestamp: bucket.start,
        end_timestamp: bucket.end,
        min,
        max,
        avg,
        count: bucket.count,
        successful: bucket.successful,
        failed: bucket.failed,
        packet_loss: packet_loss_percent(bucket.failed, bucket.count),
        percentiles: bucket.percentiles.as_ref().and_then(|p| p.complete()),
    }
}
