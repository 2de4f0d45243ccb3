//! Tests for SVG export and bucket file decoding

use crate::common::{engine_with, percentile_bucket, prefs_without_stats, regular_series};
use pingsmoke::chart::DensityMode;
use pingsmoke::export::render_svg;
use pingsmoke::loader::{parse_buckets, LoadError};
use pingsmoke::settings::ChartPreferences;

#[test]
fn test_svg_document_shape() {
    let engine = engine_with(&regular_series(20, 60_000), ChartPreferences::default());
    let svg = render_svg(engine.scene());

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("class=\"Density\""));
    assert!(svg.contains("class=\"Legend\""));
    assert!(svg.contains("clip-path"));
}

#[test]
fn test_svg_gradient_defs() {
    let prefs = ChartPreferences {
        density_mode: DensityMode::Gradient,
        ..prefs_without_stats()
    };
    let buckets: Vec<_> = (0..4).map(|i| percentile_bucket(i * 60)).collect();
    let engine = engine_with(&buckets, prefs);
    let svg = render_svg(engine.scene());

    assert_eq!(svg.matches("<linearGradient").count(), 4);
    assert!(svg.contains("url(#gradient-0)"));
}

#[test]
fn test_svg_placeholder_for_empty_chart() {
    let engine = engine_with(&[], prefs_without_stats());
    let svg = render_svg(engine.scene());
    assert!(svg.contains("No data"));
    assert!(!svg.contains("<linearGradient"));
}

#[test]
fn test_parsed_file_renders() {
    let json = r#"{
        "buckets": [
            {"bucketStart": 0, "bucketEnd": 60000, "min": 10, "avg": 12, "max": 20,
             "count": 10, "successfulCount": 10, "failedCount": 0},
            {"bucketStart": 60000, "bucketEnd": 120000, "min": 11, "avg": 14, "max": 30,
             "count": 10, "successfulCount": 8, "failedCount": 2},
            {"nonsense": true},
            {"bucketStart": 120000, "bucketEnd": 180000, "min": 9, "avg": 13, "max": 25,
             "count": 10, "successfulCount": 10, "failedCount": 0}
        ]
    }"#;
    let buckets = parse_buckets(json).unwrap();
    assert_eq!(buckets.len(), 3);

    let engine = engine_with(&buckets, prefs_without_stats());
    let frame = engine.frame().unwrap();
    assert_eq!(frame.interval, 60_000);
    assert_eq!(frame.density_bars, 3);
    assert_eq!(frame.loss_region_count, 1);
}

#[test]
fn test_unexpected_shape_rejected() {
    assert!(matches!(parse_buckets("42"), Err(LoadError::UnexpectedShape)));
    assert!(matches!(parse_buckets("{\"rows\": []}"), Err(LoadError::UnexpectedShape)));
    assert!(matches!(parse_buckets("[1, 2"), Err(LoadError::Json(_))));
}
