//! Tests for bucket preparation
//!
//! Tests cover:
//! - Packet-loss bounds
//! - Ordering and invariant repair
//! - Valid latency point selection
//! - The two-bucket round trip

use crate::common::{bucket, latency_bucket, null_bucket};
use pingsmoke::analysis::{
    estimate_interval, packet_loss_percent, prepare_points, split_segments, valid_latency_points,
};
use pingsmoke::state::RawBucket;

// ============================================
// Packet Loss Tests
// ============================================

#[test]
fn test_packet_loss_within_bounds() {
    for total in [0u64, 1, 7, 100] {
        for failed in [0u64, 1, 7, 100, 250] {
            let loss = packet_loss_percent(failed, total);
            assert!((0.0..=100.0).contains(&loss), "{}/{} -> {}", failed, total, loss);
        }
    }
}

#[test]
fn test_packet_loss_zero_total() {
    assert_eq!(packet_loss_percent(5, 0), 0.0);
}

#[test]
fn test_packet_loss_values() {
    assert_eq!(packet_loss_percent(1, 10), 10.0);
    assert_eq!(packet_loss_percent(10, 10), 100.0);
}

// ============================================
// Preparation Tests
// ============================================

#[test]
fn test_points_sorted_by_timestamp() {
    let buckets = vec![latency_bucket(120, 10.0), latency_bucket(0, 11.0), latency_bucket(60, 12.0)];
    let points = prepare_points(&buckets);
    let times: Vec<i64> = points.iter().map(|p| p.timestamp).collect();
    assert_eq!(times, vec![0, 60, 120]);
    assert_eq!(points[0].avg, Some(11.0));
}

#[test]
fn test_reversed_min_max_repaired() {
    let points = prepare_points(&[bucket(0, 30.0, 50.0, 10.0, 10, 0)]);
    let p = &points[0];
    assert_eq!(p.min, Some(10.0));
    assert_eq!(p.max, Some(30.0));
    assert_eq!(p.avg, Some(30.0));
}

#[test]
fn test_non_finite_latency_dropped() {
    let raw = RawBucket {
        avg: Some(f64::NAN),
        ..latency_bucket(0, 10.0)
    };
    let points = prepare_points(&[raw]);
    assert_eq!(points[0].avg, None);
    assert!(valid_latency_points(&points).is_empty());
}

#[test]
fn test_null_bucket_counts_for_loss_only() {
    let points = prepare_points(&[latency_bucket(0, 10.0), null_bucket(60, 10, 10)]);
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].packet_loss, 100.0);
    let valid = valid_latency_points(&points);
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].timestamp(), 0);
}

#[test]
fn test_large_input_matches_sequential_order() {
    let buckets: Vec<RawBucket> = (0..12_000)
        .rev()
        .map(|i| latency_bucket(i * 60, 10.0 + (i % 13) as f64))
        .collect();
    let points = prepare_points(&buckets);
    assert_eq!(points.len(), 12_000);
    assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

// ============================================
// Round Trip Tests
// ============================================

#[test]
fn test_two_bucket_round_trip() {
    let buckets = vec![bucket(0, 10.0, 15.0, 20.0, 10, 0), bucket(60, 10.0, 15.0, 20.0, 10, 1)];
    let points = prepare_points(&buckets);

    assert_eq!(points[0].packet_loss, 0.0);
    assert_eq!(points[1].packet_loss, 10.0);

    let interval = estimate_interval(&points);
    assert_eq!(interval, 60);

    let valid = valid_latency_points(&points);
    let segments = split_segments(&valid, interval);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 2);
}
