//! Data preparation and statistics for bucketed latency series.
//!
//! Everything in here is a pure function of the bucket list:
//! - [`prepare`] turns raw buckets into sorted [`ChartPoint`](crate::state::ChartPoint)s
//! - [`interval`] infers the bucket spacing and splits series at gaps
//! - [`statistics`] computes the aggregate figures shown in the stats panel

pub mod interval;
pub mod prepare;
pub mod statistics;

pub use interval::{estimate_interval, has_gap, split_segments, Timestamped};
pub use prepare::{packet_loss_percent, prepare_points, valid_latency_points};
pub use statistics::{compute_chart_stats, compute_descriptive_stats, p99_of_max, ChartStats, DescriptiveStats};
