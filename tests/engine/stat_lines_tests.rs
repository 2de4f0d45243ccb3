//! Tests for the smoothed stat lines and median markers

use crate::common::{engine_with, latency_bucket, prefs_without_stats};
use pingsmoke::chart::scene::{DrawCommand, LayerKind};
use pingsmoke::chart::ChartEngine;
use pingsmoke::settings::ChartPreferences;
use pingsmoke::state::RawBucket;

/// Three runs: three buckets, a lone bucket, then two buckets
fn gapped_series() -> Vec<RawBucket> {
    [0, 60, 120, 1000, 3000, 3060]
        .iter()
        .map(|&t| latency_bucket(t, 20.0 + (t % 7) as f64))
        .collect()
}

fn count_stat_commands(engine: &ChartEngine) -> (usize, usize) {
    let layer = engine.scene().layer(LayerKind::StatLines).unwrap();
    let paths = layer
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Path { .. }))
        .count();
    let circles = layer
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { .. }))
        .count();
    (paths, circles)
}

#[test]
fn test_one_path_per_segment_of_two_or_more() {
    let prefs = ChartPreferences {
        show_min: true,
        ..prefs_without_stats()
    };
    let engine = engine_with(&gapped_series(), prefs);
    let frame = engine.frame().unwrap();
    assert_eq!(frame.interval, 60);
    assert_eq!(frame.segment_count, 3);

    // The lone bucket gets no path; median and min draw two paths each
    assert_eq!(frame.stat_line_paths, 4);
    assert_eq!(count_stat_commands(&engine), (4, 6));
}

#[test]
fn test_lines_toggle_independently() {
    let series = gapped_series();

    let median_only = engine_with(&series, prefs_without_stats());
    assert_eq!(median_only.frame().unwrap().stat_line_paths, 2);

    let with_min = engine_with(
        &series,
        ChartPreferences {
            show_min: true,
            ..prefs_without_stats()
        },
    );
    assert_eq!(with_min.frame().unwrap().stat_line_paths, 4);

    let all = engine_with(
        &series,
        ChartPreferences {
            show_min: true,
            show_max: true,
            show_avg: true,
            ..prefs_without_stats()
        },
    );
    assert_eq!(all.frame().unwrap().stat_line_paths, 8);
}

#[test]
fn test_markers_follow_median_toggle() {
    let prefs = ChartPreferences {
        show_median: false,
        show_avg: true,
        ..prefs_without_stats()
    };
    let engine = engine_with(&gapped_series(), prefs);
    assert_eq!(count_stat_commands(&engine), (2, 0));
}

#[test]
fn test_markers_capped_for_long_series() {
    let series: Vec<_> = (0..500).map(|i| latency_bucket(i * 60, 20.0)).collect();
    let engine = engine_with(&series, prefs_without_stats());
    let (paths, circles) = count_stat_commands(&engine);
    assert_eq!(paths, 1);
    assert!(circles <= 100 && circles > 1);
}
