//! Tests for chart scales and the layout they are built from

use crate::common::{engine_with, latency_bucket, prefs_without_stats, regular_series, PLOT_WIDTH};
use pingsmoke::analysis::{prepare_points, valid_latency_points};
use pingsmoke::chart::engine::time_domain;
use pingsmoke::chart::scale::{value_upper_bound, ChartScales};
use pingsmoke::chart::ChartLayout;
use pingsmoke::state::{
    ChartSize, DEFAULT_UPPER_BOUND, MARGIN_RIGHT, SINGLE_POINT_DOMAIN_PADDING_MS, STATS_PANEL_WIDTH,
};

#[test]
fn test_y_scale_endpoints_map_exactly() {
    let points = prepare_points(&regular_series(30, 60_000));
    let valid = valid_latency_points(&points);
    let scales = ChartScales::build((0, 29 * 60_000), &valid, 800.0, 316.0, false);

    assert_eq!(scales.y.scale(0.0), 316.0);
    assert_eq!(scales.y.scale(scales.upper_bound), 0.0);
    assert_eq!(scales.x.scale(0), 0.0);
    assert_eq!(scales.x.scale(29 * 60_000), 800.0);
}

#[test]
fn test_upper_bound_covers_true_max() {
    for peak in [0.3, 7.0, 26.0, 99.9, 1234.5] {
        let points = prepare_points(&[latency_bucket(0, peak), latency_bucket(60, peak / 2.0)]);
        let valid = valid_latency_points(&points);
        let bound = value_upper_bound(&valid, false);
        let true_max = peak + 5.0;
        assert!(bound >= true_max * 1.15 - 1e-9, "peak {} bound {}", peak, bound);
    }
}

#[test]
fn test_upper_bound_without_latency() {
    assert_eq!(value_upper_bound(&[], false), DEFAULT_UPPER_BOUND);
}

#[test]
fn test_p99_clipping_ignores_outlier() {
    let mut buckets = regular_series(300, 60);
    buckets.push(latency_bucket(300 * 60, 5_000.0));
    let points = prepare_points(&buckets);
    let valid = valid_latency_points(&points);

    let full = value_upper_bound(&valid, false);
    let clipped = value_upper_bound(&valid, true);
    assert!(full > 5_000.0);
    assert!(clipped < 100.0);
}

#[test]
fn test_single_point_domain_widened() {
    let points = prepare_points(&[latency_bucket(1_000_000, 10.0)]);
    assert_eq!(
        time_domain(&points),
        Some((
            1_000_000 - SINGLE_POINT_DOMAIN_PADDING_MS,
            1_000_000 + SINGLE_POINT_DOMAIN_PADDING_MS
        ))
    );
    assert_eq!(time_domain(&[]), None);
}

#[test]
fn test_single_point_renders_centered() {
    let engine = engine_with(&[latency_bucket(1_000_000, 10.0)], prefs_without_stats());
    let frame = engine.frame().unwrap();
    assert_eq!(frame.interval, 0);
    assert_eq!(frame.scales.x.scale(1_000_000), PLOT_WIDTH / 2.0);
    assert_eq!(frame.density_bars, 1);
}

#[test]
fn test_stats_margin_collapses_when_hidden() {
    let size = ChartSize::new(1000.0, 400.0);
    let with = ChartLayout::compute(size, true);
    let without = ChartLayout::compute(size, false);
    assert_eq!(with.margins.right, MARGIN_RIGHT + STATS_PANEL_WIDTH);
    assert_eq!(without.margins.right, MARGIN_RIGHT);
    assert_eq!(without.inner_width - with.inner_width, STATS_PANEL_WIDTH);
}
