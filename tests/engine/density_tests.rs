//! Tests for the four density strategies

use strum::IntoEnumIterator;

use crate::common::{engine_with, flat_bucket, latency_bucket, percentile_bucket, prefs_without_stats};
use pingsmoke::chart::density::DensityMode;
use pingsmoke::chart::scene::{DrawCommand, LayerKind, Paint};
use pingsmoke::chart::{ChartEngine, ChartOptions};
use pingsmoke::settings::ChartPreferences;
use pingsmoke::state::{MARGIN_BOTTOM, MARGIN_TOP};

fn prefs(mode: DensityMode) -> ChartPreferences {
    ChartPreferences {
        density_mode: mode,
        show_median: false,
        ..prefs_without_stats()
    }
}

#[test]
fn test_zero_range_buckets_draw_nothing() {
    let buckets: Vec<_> = (0..10).map(|i| flat_bucket(i * 60, 25.0)).collect();
    for mode in DensityMode::iter() {
        let engine = engine_with(&buckets, prefs(mode));
        let density = engine.scene().layer(LayerKind::Density).unwrap();
        assert!(density.commands.is_empty(), "{:?} drew {} commands", mode, density.commands.len());
        assert_eq!(engine.frame().unwrap().density_bars, 0);
    }
}

#[test]
fn test_geometry_is_never_degenerate() {
    let mut buckets: Vec<_> = (0..20).map(|i| latency_bucket(i * 60, 10.0 + i as f64)).collect();
    buckets.extend((20..30).map(|i| percentile_bucket(i * 60)));
    buckets.push(flat_bucket(30 * 60, 5.0));

    for mode in DensityMode::iter() {
        let engine = engine_with(&buckets, prefs(mode));
        let density = engine.scene().layer(LayerKind::Density).unwrap();
        assert!(!density.commands.is_empty(), "{:?} drew nothing", mode);
        for command in &density.commands {
            if let DrawCommand::Rect { rect, .. } = command {
                assert!(rect.width > 0.0 && rect.height > 0.0, "{:?}: {:?}", mode, rect);
            }
        }
        assert_eq!(engine.frame().unwrap().density_bars, 30);
    }
}

#[test]
fn test_gradient_mode_defines_one_gradient_per_bar() {
    let buckets: Vec<_> = (0..5).map(|i| percentile_bucket(i * 60)).collect();
    let engine = engine_with(&buckets, prefs(DensityMode::Gradient));
    let scene = engine.scene();
    assert_eq!(scene.gradients.len(), 5);

    for command in &scene.layer(LayerKind::Density).unwrap().commands {
        match command {
            DrawCommand::Rect {
                fill: Paint::Gradient(id),
                ..
            } => assert!(scene.gradient(*id).is_some()),
            other => panic!("unexpected command {:?}", other),
        }
    }
}

#[test]
fn test_gradient_ids_reset_each_pass() {
    let buckets: Vec<_> = (0..3).map(|i| percentile_bucket(i * 60)).collect();
    let mut engine = engine_with(&buckets, prefs(DensityMode::Gradient));
    engine.render();
    assert_eq!(engine.scene().gradients.len(), 3);
}

#[test]
fn test_hidden_smoke_has_no_density_layer() {
    let prefs = ChartPreferences {
        show_smoke: false,
        ..prefs_without_stats()
    };
    let engine = engine_with(&[latency_bucket(0, 10.0), latency_bucket(60, 12.0)], prefs);
    assert!(engine.scene().layer(LayerKind::Density).is_none());
}

#[test]
fn test_bars_stay_inside_plot_height() {
    let buckets: Vec<_> = (0..10).map(|i| percentile_bucket(i * 60)).collect();
    for mode in DensityMode::iter() {
        let engine = engine_with(&buckets, prefs(mode));
        let height = engine.frame().unwrap().layout.chart_height;
        for command in &engine.scene().layer(LayerKind::Density).unwrap().commands {
            if let DrawCommand::Rect { rect, .. } = command {
                assert!(rect.y >= -1e-9 && rect.bottom() <= height + 1e-9);
            }
        }
    }
}

#[test]
fn test_collapsed_plot_counts_no_bars() {
    // Height below the margins leaves a zero-height plot
    let options = ChartOptions {
        width: Some(800.0),
        height: MARGIN_TOP + MARGIN_BOTTOM - 4.0,
        ..Default::default()
    };
    let buckets: Vec<_> = (0..10).map(|i| percentile_bucket(i * 60)).collect();
    for mode in DensityMode::iter() {
        let mut engine = ChartEngine::new(options, prefs(mode));
        engine.set_data(&buckets);
        engine.render();
        let frame = engine.frame().unwrap();
        assert_eq!(frame.layout.chart_height, 0.0);
        assert_eq!(frame.density_bars, 0, "{:?}", mode);
        assert!(engine.scene().layer(LayerKind::Density).unwrap().commands.is_empty());
    }
}
