//! Deterministic synthetic latency series for the viewer.
//!
//! The series has a slow diurnal swing, short congestion spikes, a few
//! lossy stretches, one outage with no probes and one hole in the data so
//! every layer of the chart has something to show.

use crate::state::{RawBucket, RawPercentiles};

/// Probes per bucket
const PROBES: u64 = 20;

/// Generate `count` buckets of `interval_ms` starting at `start_ms`
pub fn generate_buckets(start_ms: i64, count: usize, interval_ms: i64) -> Vec<RawBucket> {
    let hole = (count * 2 / 3)..(count * 2 / 3 + 6);
    let outage = count / 3;

    (0..count)
        .filter(|i| !hole.contains(i))
        .map(|i| {
            let start = start_ms + i as i64 * interval_ms;
            let end = start + interval_ms;
            let phase = i as f64;

            if i == outage {
                return RawBucket {
                    start,
                    end,
                    min: None,
                    max: None,
                    avg: None,
                    count: PROBES,
                    successful: 0,
                    failed: PROBES,
                    percentiles: None,
                };
            }

            let spike = if i % 47 < 3 { 25.0 } else { 0.0 };
            let base = 18.0 + 6.0 * (phase / 24.0).sin() + 2.0 * (phase / 5.0).cos() + spike;
            let spread = 4.0 + 3.0 * (phase / 11.0).sin().abs() + spike / 2.0;
            let min = (base - spread / 2.0).max(0.5);
            let max = base + spread * 2.0;
            let p50 = base;
            let avg = (p50 + spread * 0.2).min(max);

            let failed = match i % 61 {
                0..=2 => 1,
                3 => 3,
                4 => 6,
                _ => 0,
            };

            // Older probe agents did not report percentiles
            let percentiles = (i % 5 != 0).then(|| RawPercentiles {
                p50: Some(p50),
                p75: Some(p50 + spread * 0.4),
                p90: Some(p50 + spread * 0.8),
                p95: Some(p50 + spread * 1.2),
                p99: Some(p50 + spread * 1.8),
            });

            RawBucket {
                start,
                end,
                min: Some(min),
                max: Some(max),
                avg: Some(avg),
                count: PROBES,
                successful: PROBES - failed,
                failed,
                percentiles,
            }
        })
        .collect()
}
