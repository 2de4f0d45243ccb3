//! Core data types and constants.
//!
//! This module contains the fundamental data structures shared by the chart
//! engine and the viewer: the raw bucket input record, the prepared chart
//! point, loss severity classes, layout constants and color palettes.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Chart height used when the host does not supply one
pub const DEFAULT_CHART_HEIGHT: f64 = 400.0;

/// Chart width used for headless rendering when no container width is known
pub const DEFAULT_CHART_WIDTH: f64 = 960.0;

/// Half-width added around a single-point time domain (one minute)
pub const SINGLE_POINT_DOMAIN_PADDING_MS: i64 = 60_000;

/// Headroom multiplier applied to the value-scale upper bound
pub const VALUE_HEADROOM: f64 = 1.15;

/// Value-scale upper bound when there is no latency data at all
pub const DEFAULT_UPPER_BOUND: f64 = 100.0;

/// Number of leading points used to estimate the bucket interval
pub const INTERVAL_SAMPLE_LIMIT: usize = 20;

/// A delta larger than this multiple of the bucket interval is a gap
pub const GAP_FACTOR: i64 = 2;

/// Maximum number of markers drawn on the median line
pub const MAX_MEDIAN_MARKERS: usize = 100;

/// Minimum interval between two processed pointer-move events (~60 Hz)
pub const TOOLTIP_THROTTLE_MS: u64 = 16;

/// Brush selections narrower than this (in pixels) are treated as clicks
pub const BRUSH_MIN_WIDTH: f64 = 10.0;

/// Number of latency bins in the histogram-band density mode
pub const HISTOGRAM_BINS: usize = 8;

/// Divisor turning a bucket's min-max range into a std-dev estimate
pub const FALLBACK_SPREAD_DIVISOR: f64 = 4.0;

/// Bar half-width used when no bucket interval can be inferred
pub const MIN_BAR_HALF_WIDTH: f64 = 3.0;

/// Packet loss at or below this percentage is classed as low
pub const LOSS_LOW_MAX: f64 = 5.0;

/// Packet loss at or below this percentage is classed as medium
pub const LOSS_MEDIUM_MAX: f64 = 20.0;

/// Fixed chart margins in pixels
pub const MARGIN_TOP: f64 = 20.0;
pub const MARGIN_LEFT: f64 = 64.0;
pub const MARGIN_BOTTOM: f64 = 64.0;
pub const MARGIN_RIGHT: f64 = 24.0;

/// Extra right margin reserved for the stats panel when it is visible
pub const STATS_PANEL_WIDTH: f64 = 190.0;

// ============================================================================
// Colors
// ============================================================================

/// Smoke bar base color
pub const SMOKE_COLOR: [u8; 3] = [71, 108, 155];

/// Stat line colors
pub const MEDIAN_COLOR: [u8; 3] = [159, 166, 119]; // Sage green
pub const MIN_COLOR: [u8; 3] = [100, 149, 237]; // Cornflower blue
pub const MAX_COLOR: [u8; 3] = [191, 78, 48]; // Rust orange
pub const AVG_COLOR: [u8; 3] = [246, 247, 235]; // Cream

/// Chart chrome
pub const BACKGROUND_COLOR: [u8; 3] = [30, 30, 30];
pub const GRID_COLOR: [u8; 3] = [60, 60, 60];
pub const AXIS_COLOR: [u8; 3] = [140, 140, 140];
pub const TEXT_COLOR: [u8; 3] = [220, 220, 220];
pub const MUTED_TEXT_COLOR: [u8; 3] = [150, 150, 150];

/// Hover crosshair (cyan, matches the cursor line of the log viewer)
pub const CROSSHAIR_COLOR: [u8; 3] = [0, 255, 255];

/// Brush selection fill
pub const BRUSH_COLOR: [u8; 3] = [100, 150, 255];

// ============================================================================
// Core Types
// ============================================================================

/// Percentile set as delivered by the aggregation backend; any value may be missing
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPercentiles {
    #[serde(default)]
    pub p50: Option<f64>,
    #[serde(default)]
    pub p75: Option<f64>,
    #[serde(default)]
    pub p90: Option<f64>,
    #[serde(default)]
    pub p95: Option<f64>,
    #[serde(default)]
    pub p99: Option<f64>,
}

/// A complete percentile set, all values finite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentiles {
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Percentiles {
    /// Values in ascending percentile order
    pub fn values(&self) -> [f64; 5] {
        [self.p50, self.p75, self.p90, self.p95, self.p99]
    }
}

impl RawPercentiles {
    /// Returns the set only when every percentile is present and finite
    pub fn complete(&self) -> Option<Percentiles> {
        let p = Percentiles {
            p50: self.p50?,
            p75: self.p75?,
            p90: self.p90?,
            p95: self.p95?,
            p99: self.p99?,
        };
        p.values().iter().all(|v| v.is_finite()).then_some(p)
    }
}

/// One pre-aggregated latency bucket as received from the data layer.
///
/// Timestamps are milliseconds since the Unix epoch; RFC 3339 strings are
/// accepted on input as well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBucket {
    #[serde(
        alias = "bucketStart",
        alias = "bucket_start",
        deserialize_with = "deserialize_timestamp"
    )]
    pub start: i64,
    #[serde(
        alias = "bucketEnd",
        alias = "bucket_end",
        deserialize_with = "deserialize_timestamp"
    )]
    pub end: i64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default, alias = "total")]
    pub count: u64,
    #[serde(default, alias = "successfulCount", alias = "successful_count")]
    pub successful: u64,
    #[serde(default, alias = "failedCount", alias = "failed_count")]
    pub failed: u64,
    #[serde(default)]
    pub percentiles: Option<RawPercentiles>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

/// Accept epoch milliseconds (integer or float) or an RFC 3339 string
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match TimestampRepr::deserialize(deserializer)? {
        TimestampRepr::Millis(ms) => Ok(ms),
        TimestampRepr::Fractional(ms) => Ok(ms.round() as i64),
        TimestampRepr::Text(text) => chrono::DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.timestamp_millis())
            .map_err(serde::de::Error::custom),
    }
}

/// A prepared bucket, one per [`RawBucket`], ordered by timestamp
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPoint {
    /// Bucket start in milliseconds
    pub timestamp: i64,
    /// Bucket end in milliseconds
    pub end_timestamp: i64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    /// Total number of probes in the bucket
    pub count: u64,
    pub successful: u64,
    pub failed: u64,
    /// `failed / count * 100`, 0 when the bucket has no probes
    pub packet_loss: f64,
    pub percentiles: Option<Percentiles>,
}

impl ChartPoint {
    /// The latency view of this point, if min, avg and max are all known
    pub fn latency(&self) -> Option<LatencyPoint> {
        Some(LatencyPoint {
            point: *self,
            min: self.min?,
            avg: self.avg?,
            max: self.max?,
        })
    }

    #[inline]
    pub fn has_samples(&self) -> bool {
        self.count > 0
    }

    pub fn severity(&self) -> LossSeverity {
        LossSeverity::from_percent(self.packet_loss)
    }
}

/// A chart point with a complete min/avg/max triple
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatencyPoint {
    pub point: ChartPoint,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl LatencyPoint {
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.point.timestamp
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn percentiles(&self) -> Option<Percentiles> {
        self.point.percentiles
    }

    /// Median latency: the real p50 when known, otherwise the average
    pub fn median(&self) -> f64 {
        self.point.percentiles.map(|p| p.p50).unwrap_or(self.avg)
    }
}

/// Packet-loss severity class used for region and marker coloring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LossSeverity {
    /// No loss
    None,
    /// Up to 5%
    Low,
    /// Up to 20%
    Medium,
    /// Above 20%
    High,
}

impl LossSeverity {
    pub fn from_percent(loss: f64) -> Self {
        if loss <= 0.0 {
            LossSeverity::None
        } else if loss <= LOSS_LOW_MAX {
            LossSeverity::Low
        } else if loss <= LOSS_MEDIUM_MAX {
            LossSeverity::Medium
        } else {
            LossSeverity::High
        }
    }

    /// Base color for this severity
    pub fn color(&self) -> [u8; 3] {
        match self {
            LossSeverity::None => [113, 120, 78],   // Olive green
            LossSeverity::Low => [253, 193, 73],    // Amber
            LossSeverity::Medium => [255, 127, 80], // Coral
            LossSeverity::High => [200, 40, 36],    // Red
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LossSeverity::None => "0%",
            LossSeverity::Low => "≤5%",
            LossSeverity::Medium => "≤20%",
            LossSeverity::High => ">20%",
        }
    }

    /// Severities that produce a background region, in legend order
    pub const WITH_LOSS: [LossSeverity; 3] =
        [LossSeverity::Low, LossSeverity::Medium, LossSeverity::High];
}

/// Outer chart dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Type of toast notification (determines color)
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    /// Informational message (blue)
    #[default]
    Info,
    /// Success message (green)
    Success,
    /// Warning message (amber)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastType {
    /// Get the background color for this toast type
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],    // Blue
            ToastType::Success => [113, 120, 78], // Olive green
            ToastType::Warning => [253, 193, 73], // Amber
            ToastType::Error => [135, 30, 28],    // Dark red
        }
    }

    /// Get the text color for this toast type
    pub fn text_color(&self) -> [u8; 3] {
        match self {
            ToastType::Warning => [30, 30, 30], // Dark text for amber background
            _ => [255, 255, 255],               // White text for other backgrounds
        }
    }
}
