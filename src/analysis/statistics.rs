//! Statistical summaries.
//!
//! Provides the descriptive statistics behind the stats panel and the
//! percentile estimate used for value-scale clipping.

use crate::state::{ChartPoint, LatencyPoint};

/// Container for descriptive statistics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Compute descriptive statistics
pub fn compute_descriptive_stats(data: &[f64]) -> DescriptiveStats {
    if data.is_empty() {
        return DescriptiveStats::default();
    }

    let n = data.len();

    let mean = data.iter().sum::<f64>() / n as f64;

    // Variance (two-pass for stability)
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1).max(1) as f64;
    let stdev = variance.sqrt();

    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    #[allow(clippy::manual_is_multiple_of)]
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    DescriptiveStats {
        count: n,
        mean,
        median,
        stdev,
        min,
        max,
        range: max - min,
    }
}

/// Aggregate figures for one rendered series
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartStats {
    /// Statistics over the per-bucket average latency, `None` without latency data
    pub latency: Option<DescriptiveStats>,
    /// Average latency of the most recent bucket with latency data
    pub current_latency: Option<f64>,
    pub mean_loss: f64,
    pub min_loss: f64,
    pub max_loss: f64,
    /// Loss of the most recent bucket that received probes
    pub current_loss: f64,
    /// Sum of probe counts over all buckets
    pub total_samples: u64,
    pub bucket_count: usize,
    /// Start of the most recent bucket that received probes
    pub last_sample: Option<i64>,
}

/// Summarize a prepared series.
///
/// Loss figures only consider buckets that received probes; empty buckets
/// carry no loss information.
pub fn compute_chart_stats(points: &[ChartPoint], valid: &[LatencyPoint]) -> ChartStats {
    let averages: Vec<f64> = valid.iter().map(|p| p.avg).collect();
    let latency = (!averages.is_empty()).then(|| compute_descriptive_stats(&averages));

    let sampled: Vec<&ChartPoint> = points.iter().filter(|p| p.has_samples()).collect();
    let (mean_loss, min_loss, max_loss) = if sampled.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let losses = sampled.iter().map(|p| p.packet_loss);
        let sum: f64 = losses.clone().sum();
        (
            sum / sampled.len() as f64,
            losses.clone().fold(f64::INFINITY, f64::min),
            losses.fold(f64::NEG_INFINITY, f64::max),
        )
    };
    let last = sampled.last();

    ChartStats {
        latency,
        current_latency: valid.last().map(|p| p.avg),
        mean_loss,
        min_loss,
        max_loss,
        current_loss: last.map(|p| p.packet_loss).unwrap_or(0.0),
        total_samples: points.iter().map(|p| p.count).sum(),
        bucket_count: points.len(),
        last_sample: last.map(|p| p.timestamp),
    }
}

/// 99th percentile of the per-bucket maxima (nearest-rank)
pub fn p99_of_max(valid: &[LatencyPoint]) -> Option<f64> {
    if valid.is_empty() {
        return None;
    }
    let mut maxima: Vec<f64> = valid.iter().map(|p| p.max).collect();
    maxima.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rank = (maxima.len() as f64 * 0.99).ceil() as usize;
    Some(maxima[rank.saturating_sub(1)])
}
