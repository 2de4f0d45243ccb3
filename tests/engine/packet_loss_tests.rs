//! Tests for packet-loss region merging

use crate::common::{bucket, engine_with, null_bucket, prefs_without_stats};
use pingsmoke::analysis::{estimate_interval, prepare_points};
use pingsmoke::chart::packet_loss::loss_regions;
use pingsmoke::chart::scale::TimeScale;
use pingsmoke::chart::scene::LayerKind;
use pingsmoke::state::{LossSeverity, RawBucket};

fn lossy(start: i64, failed: u64) -> RawBucket {
    bucket(start, 10.0, 15.0, 20.0, 100, failed)
}

fn regions_for(buckets: &[RawBucket]) -> Vec<pingsmoke::chart::packet_loss::LossRegion> {
    let points = prepare_points(buckets);
    let interval = estimate_interval(&points);
    let end = points.last().map(|p| p.timestamp).unwrap_or(0);
    let x = TimeScale::new(0, end.max(1), 1000.0);
    loss_regions(&points, interval, &x)
}

#[test]
fn test_uniform_loss_single_region() {
    let buckets: Vec<_> = (0..50).map(|i| lossy(i * 60, 10)).collect();
    let regions = regions_for(&buckets);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].severity, LossSeverity::Medium);
    assert_eq!((regions[0].first, regions[0].last), (0, 49));
}

#[test]
fn test_alternating_severity_one_region_each() {
    let buckets: Vec<_> = (0..20)
        .map(|i| lossy(i * 60, if i % 2 == 0 { 3 } else { 50 }))
        .collect();
    let regions = regions_for(&buckets);
    assert_eq!(regions.len(), 20);
    for (i, region) in regions.iter().enumerate() {
        let expected = if i % 2 == 0 {
            LossSeverity::Low
        } else {
            LossSeverity::High
        };
        assert_eq!(region.severity, expected);
    }
    // Neighbouring regions share an edge
    for pair in regions.windows(2) {
        assert!((pair[0].x1 - pair[1].x0).abs() < 1e-9);
    }
}

#[test]
fn test_no_data_bucket_breaks_region() {
    let buckets = vec![lossy(0, 10), lossy(60, 10), null_bucket(120, 0, 0), lossy(180, 10)];
    let regions = regions_for(&buckets);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[1].first, 3);
}

#[test]
fn test_total_outage_is_high_severity() {
    let buckets = vec![lossy(0, 0), null_bucket(60, 10, 10), lossy(120, 0)];
    let regions = regions_for(&buckets);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].severity, LossSeverity::High);
}

#[test]
fn test_engine_draws_one_rect_per_region() {
    let buckets: Vec<_> = (0..12)
        .map(|i| lossy(i * 60, if i < 6 { 0 } else { 30 }))
        .collect();
    let engine = engine_with(&buckets, prefs_without_stats());
    assert_eq!(engine.frame().unwrap().loss_region_count, 1);
    assert_eq!(engine.scene().layer(LayerKind::PacketLoss).unwrap().commands.len(), 1);
}
