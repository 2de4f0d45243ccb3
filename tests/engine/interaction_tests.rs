//! Tests for hover, brush, resize and teardown

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::common::{engine_with, latency_bucket, null_bucket, prefs_without_stats, regular_series};
use pingsmoke::chart::scene::{LayerKind, Pos};
use pingsmoke::chart::{ChartEngine, ChartOptions, EventSource, ZoomRange};
use pingsmoke::state::{MARGIN_LEFT, MARGIN_TOP};

/// Chart-pixel position of a plot-pixel position
fn chart_pos(x: f64, y: f64) -> Pos {
    Pos::new(MARGIN_LEFT + x, MARGIN_TOP + y)
}

// ============================================
// Tooltip Tests
// ============================================

#[test]
fn test_exact_tie_picks_later_bucket() {
    let mut engine = engine_with(
        &[latency_bucket(0, 10.0), latency_bucket(60_000, 20.0)],
        prefs_without_stats(),
    );
    // Plot is 600 px over 60 s: 300 px is exactly between both buckets
    assert!(engine.pointer_move(0, chart_pos(300.0, 50.0)));
    assert_eq!(engine.hover().unwrap().index, 1);
}

#[test]
fn test_nearest_bucket_selected() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    // 10 intervals over 600 px: 60 px per bucket
    engine.pointer_move(0, chart_pos(170.0, 50.0));
    let hover = engine.hover().unwrap();
    assert_eq!(hover.index, 3);
    assert!((hover.crosshair_x - 180.0).abs() < 1e-9);
    assert!(hover.marker.is_some());
    assert!(hover.panel.title.contains(':'));
}

#[test]
fn test_marker_hidden_without_latency() {
    let mut engine = engine_with(
        &[latency_bucket(0, 10.0), null_bucket(60_000, 10, 10)],
        prefs_without_stats(),
    );
    engine.pointer_move(0, chart_pos(590.0, 50.0));
    let hover = engine.hover().unwrap();
    assert_eq!(hover.index, 1);
    assert!(hover.marker.is_none());
    assert_eq!(hover.panel.rows[3].1, "100.0%");
}

#[test]
fn test_pointer_moves_are_throttled() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    assert!(engine.pointer_move(1_000, chart_pos(0.0, 50.0)));
    assert!(!engine.pointer_move(1_010, chart_pos(600.0, 50.0)));
    assert_eq!(engine.hover().unwrap().index, 0);
    assert!(engine.pointer_move(1_016, chart_pos(600.0, 50.0)));
    assert_eq!(engine.hover().unwrap().index, 10);
}

#[test]
fn test_leave_and_outside_hide_tooltip() {
    let mut engine = engine_with(&regular_series(5, 60_000), prefs_without_stats());
    engine.pointer_move(0, chart_pos(100.0, 50.0));
    assert!(engine.hover().is_some());
    engine.pointer_leave();
    assert!(engine.hover().is_none());

    engine.pointer_move(100, chart_pos(100.0, 50.0));
    assert!(engine.hover().is_some());
    engine.pointer_move(200, chart_pos(100.0, -10.0));
    assert!(engine.hover().is_none());
}

#[test]
fn test_render_drops_stale_tooltip() {
    let mut engine = engine_with(&regular_series(5, 60_000), prefs_without_stats());
    engine.pointer_move(0, chart_pos(100.0, 50.0));
    assert!(engine.overlay().layer(LayerKind::Overlay).is_some_and(|l| !l.commands.is_empty()));
    engine.render();
    assert!(engine.hover().is_none());
    assert!(engine.overlay().layer(LayerKind::Overlay).is_some_and(|l| l.commands.is_empty()));
}

// ============================================
// Brush Tests
// ============================================

fn zoom_recorder(engine: &ChartEngine) -> (Rc<RefCell<Vec<ZoomRange>>>, pingsmoke::chart::Subscription) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    let subscription = engine.on_zoom(move |range| sink.borrow_mut().push(*range));
    (events, subscription)
}

#[test]
fn test_narrow_brush_emits_nothing() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    let (events, _sub) = zoom_recorder(&engine);

    engine.brush_start(chart_pos(100.0, 0.0).x);
    engine.brush_drag(chart_pos(103.0, 0.0).x);
    assert!(engine.brush_end(chart_pos(105.0, 0.0).x).is_none());
    assert!(events.borrow().is_empty());
    assert!(engine.brush_selection().is_none());
}

#[test]
fn test_wide_brush_emits_range() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    let (events, _sub) = zoom_recorder(&engine);

    engine.brush_start(chart_pos(150.0, 0.0).x);
    engine.brush_drag(chart_pos(120.0, 0.0).x);
    assert_eq!(engine.brush_selection(), Some((120.0, 150.0)));
    engine.brush_drag(chart_pos(180.0, 0.0).x);
    let range = engine.brush_end(chart_pos(200.0, 0.0).x).unwrap();

    assert!(range.start < range.end);
    assert_eq!(range, ZoomRange { start: 150_000, end: 200_000 });
    assert_eq!(events.borrow().as_slice(), &[range]);
    assert!(engine.brush_selection().is_none());
}

#[test]
fn test_brush_does_not_touch_scales() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    let before = engine.frame().unwrap().scales;
    engine.brush_start(chart_pos(10.0, 0.0).x);
    engine.brush_end(chart_pos(300.0, 0.0).x);
    assert_eq!(engine.frame().unwrap().scales, before);
}

// ============================================
// Resize & Teardown Tests
// ============================================

#[test]
fn test_resize_subscription_rerenders() {
    let engine = Rc::new(RefCell::new(ChartEngine::new(
        ChartOptions::default(),
        prefs_without_stats(),
    )));
    engine.borrow_mut().set_data(&regular_series(10, 60_000));
    let resizes = EventSource::new();
    ChartEngine::observe_resize(&engine, &resizes);
    assert_eq!(resizes.listener_count(), 1);

    resizes.emit(&1200.0);
    {
        let engine = engine.borrow();
        assert_eq!(engine.size().width, 1200.0);
        assert!(!engine.is_dirty());
        assert_eq!(engine.scene().size.width, 1200.0);
    }

    engine.borrow_mut().dispose();
    assert_eq!(resizes.listener_count(), 0);
    resizes.emit(&500.0);
    assert_eq!(engine.borrow().size().width, 1200.0);
}

#[test]
fn test_dispose_drops_zoom_listeners() {
    let mut engine = engine_with(&regular_series(11, 60_000), prefs_without_stats());
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let _sub = engine.on_zoom(move |_| counter.set(counter.get() + 1));

    engine.dispose();
    assert!(engine.is_disposed());
    assert!(!engine.render_if_needed());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_empty_data_renders_placeholder() {
    let engine = engine_with(&[], prefs_without_stats());
    let scene = engine.scene();
    assert!(scene.layer(LayerKind::Placeholder).is_some());
    assert!(scene.layer(LayerKind::Density).is_none());
    assert!(engine.frame().is_none());

    let mut engine = engine;
    assert!(!engine.pointer_move(0, chart_pos(10.0, 10.0)));
    assert!(engine.brush_end(100.0).is_none());
}
