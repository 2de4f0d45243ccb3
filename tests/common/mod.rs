//! Common test utilities shared across all test modules
//!
//! Bucket builders and engine fixtures.

#![allow(dead_code)]

use pingsmoke::chart::{ChartEngine, ChartOptions};
use pingsmoke::settings::ChartPreferences;
use pingsmoke::state::{RawBucket, RawPercentiles, MARGIN_LEFT, MARGIN_RIGHT};

/// Plot width of charts built with [`engine_with`] when the stats panel is hidden
pub const PLOT_WIDTH: f64 = 600.0;

/// A bucket with explicit latency and probe counts
pub fn bucket(start: i64, min: f64, avg: f64, max: f64, count: u64, failed: u64) -> RawBucket {
    RawBucket {
        start,
        end: start + 60,
        min: Some(min),
        max: Some(max),
        avg: Some(avg),
        count,
        successful: count - failed,
        failed,
        percentiles: None,
    }
}

/// A lossless bucket spanning `avg ± 5`
pub fn latency_bucket(start: i64, avg: f64) -> RawBucket {
    bucket(start, avg - 5.0, avg, avg + 5.0, 10, 0)
}

/// A bucket with probes but no latency figures
pub fn null_bucket(start: i64, count: u64, failed: u64) -> RawBucket {
    RawBucket {
        start,
        end: start + 60,
        min: None,
        max: None,
        avg: None,
        count,
        successful: count - failed,
        failed,
        percentiles: None,
    }
}

/// A bucket with a full percentile set
pub fn percentile_bucket(start: i64) -> RawBucket {
    RawBucket {
        percentiles: Some(RawPercentiles {
            p50: Some(20.0),
            p75: Some(24.0),
            p90: Some(30.0),
            p95: Some(36.0),
            p99: Some(44.0),
        }),
        ..bucket(start, 10.0, 22.0, 50.0, 10, 0)
    }
}

/// Bucket where min, avg and max coincide
pub fn flat_bucket(start: i64, value: f64) -> RawBucket {
    bucket(start, value, value, value, 10, 0)
}

/// `n` evenly spaced lossless buckets
pub fn regular_series(n: usize, interval: i64) -> Vec<RawBucket> {
    (0..n)
        .map(|i| latency_bucket(i as i64 * interval, 20.0 + (i % 7) as f64))
        .collect()
}

/// Preferences with the stats panel hidden so the plot is exactly
/// [`PLOT_WIDTH`] wide
pub fn prefs_without_stats() -> ChartPreferences {
    ChartPreferences {
        show_stats: false,
        ..Default::default()
    }
}

/// An engine with data and a fixed width, already rendered
pub fn engine_with(buckets: &[RawBucket], prefs: ChartPreferences) -> ChartEngine {
    let options = ChartOptions {
        width: Some(PLOT_WIDTH + MARGIN_LEFT + MARGIN_RIGHT),
        ..Default::default()
    };
    let mut engine = ChartEngine::new(options, prefs);
    engine.set_data(buckets);
    engine.render();
    engine
}

/// Unique scratch path inside the system temp dir
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pingsmoke-{}-{}", std::process::id(), name))
}
