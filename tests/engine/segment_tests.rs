//! Tests for interval estimation and gap segmentation

use crate::common::{latency_bucket, regular_series};
use pingsmoke::analysis::{estimate_interval, has_gap, prepare_points, split_segments};
use pingsmoke::state::ChartPoint;

fn points_at(times: &[i64]) -> Vec<ChartPoint> {
    prepare_points(&times.iter().map(|&t| latency_bucket(t, 10.0)).collect::<Vec<_>>())
}

#[test]
fn test_regular_series_interval() {
    for interval in [1_000, 60_000, 300_000] {
        let points = prepare_points(&regular_series(40, interval));
        assert_eq!(estimate_interval(&points), interval);
    }
}

#[test]
fn test_gap_scenario() {
    let points = points_at(&[0, 300, 600, 1500]);
    let interval = estimate_interval(&points);
    assert_eq!(interval, 300);

    let segments = split_segments(&points, interval);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].len(), 3);
    assert_eq!(segments[1][0].timestamp, 1500);
}

#[test]
fn test_segments_concatenate_to_input() {
    let points = points_at(&[0, 60, 120, 500, 560, 2000, 5000, 5060]);
    let interval = estimate_interval(&points);
    let segments = split_segments(&points, interval);

    assert!(segments.iter().all(|s| !s.is_empty()));
    let joined: Vec<ChartPoint> = segments.iter().flat_map(|s| s.iter().copied()).collect();
    assert_eq!(joined, points);

    // Every boundary is a gap, every internal step is not
    for pair in segments.windows(2) {
        let last = pair[0][pair[0].len() - 1].timestamp;
        assert!(has_gap(last, pair[1][0].timestamp, interval));
    }
    for segment in &segments {
        assert!(segment
            .windows(2)
            .all(|w| !has_gap(w[0].timestamp, w[1].timestamp, interval)));
    }
}

#[test]
fn test_zero_interval_single_segment() {
    let points = points_at(&[0, 1_000_000]);
    assert_eq!(split_segments(&points, 0).len(), 1);
}

#[test]
fn test_empty_input_no_segments() {
    assert!(split_segments::<ChartPoint>(&[], 60).is_empty());
}

#[test]
fn test_exactly_double_interval_is_not_a_gap() {
    assert!(!has_gap(0, 120, 60));
    assert!(has_gap(0, 121, 60));
}
