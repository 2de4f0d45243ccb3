//! The chart orchestrator.
//!
//! [`ChartEngine`] owns the prepared data, the chart dimensions and the
//! interactive controllers. Every render pass resolves the layout, builds
//! the scales once and then runs the layer renderers in a fixed order into a
//! fresh [`Scene`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{FixedOffset, Offset, Utc};

use crate::analysis::{
    compute_chart_stats, estimate_interval, prepare_points, split_segments, valid_latency_points,
    ChartStats,
};
use crate::chart::axes::{render_axes, render_grid};
use crate::chart::brush::{BrushController, ZoomRange};
use crate::chart::density::{render_density, SmokeStyle};
use crate::chart::events::{EventSource, Subscription};
use crate::chart::legend::{legend_items, render_legend};
use crate::chart::packet_loss::{loss_regions, render_packet_loss};
use crate::chart::scale::ChartScales;
use crate::chart::scene::{
    Color, DrawCommand, LayerKind, Paint, Pos, Rect, RenderContext, Scene, Stroke, TextAnchor,
};
use crate::chart::stat_lines::render_stat_lines;
use crate::chart::stats_panel::render_stats_panel;
use crate::chart::tooltip::{render_hover, HoverState, TooltipController};
use crate::settings::ChartPreferences;
use crate::state::{
    ChartPoint, ChartSize, LatencyPoint, RawBucket, BACKGROUND_COLOR, BRUSH_COLOR,
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP,
    MUTED_TEXT_COLOR, SINGLE_POINT_DOMAIN_PADDING_MS, STATS_PANEL_WIDTH,
};

/// Gap between the plot's right edge and the stats panel
const STATS_PANEL_GAP: f64 = 10.0;
/// Distance from the time axis to the legend row
const LEGEND_OFFSET: f64 = 42.0;

// ============================================================================
// Options & Layout
// ============================================================================

/// Host-supplied dimensions and display settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartOptions {
    pub height: f64,
    /// Fixed width; `None` follows the observed container width
    pub width: Option<f64>,
    /// Time zone used for axis and tooltip labels
    pub time_offset: FixedOffset,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            height: DEFAULT_CHART_HEIGHT,
            width: None,
            time_offset: Utc.fix(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Resolved geometry of one render pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub size: ChartSize,
    pub margins: Margins,
    pub inner_width: f64,
    pub chart_height: f64,
}

impl ChartLayout {
    /// Margins first, then the plot area; the stats panel's margin collapses
    /// when the panel is hidden
    pub fn compute(size: ChartSize, show_stats: bool) -> Self {
        let margins = Margins {
            top: MARGIN_TOP,
            right: MARGIN_RIGHT + if show_stats { STATS_PANEL_WIDTH } else { 0.0 },
            bottom: MARGIN_BOTTOM,
            left: MARGIN_LEFT,
        };
        Self {
            size,
            margins,
            inner_width: (size.width - margins.left - margins.right).max(0.0),
            chart_height: (size.height - margins.top - margins.bottom).max(0.0),
        }
    }

    /// Top-left corner of the plot area in chart pixels
    pub fn plot_origin(&self) -> Pos {
        Pos::new(self.margins.left, self.margins.top)
    }

    /// Plot area in its own coordinates
    pub fn plot_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.inner_width, self.chart_height)
    }

    /// Convert chart pixels to plot pixels
    pub fn to_plot(&self, pos: Pos) -> Pos {
        Pos::new(pos.x - self.margins.left, pos.y - self.margins.top)
    }
}

/// Everything derived during the last render pass
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub layout: ChartLayout,
    pub scales: ChartScales,
    pub interval: i64,
    pub segment_count: usize,
    pub density_bars: usize,
    pub loss_region_count: usize,
    pub stat_line_paths: usize,
}

/// Time domain covering every point, widened around a single timestamp
pub fn time_domain(points: &[ChartPoint]) -> Option<(i64, i64)> {
    let start = points.iter().map(|p| p.timestamp).min()?;
    let end = points.iter().map(|p| p.timestamp).max()?;
    if start == end {
        Some((
            start - SINGLE_POINT_DOMAIN_PADDING_MS,
            end + SINGLE_POINT_DOMAIN_PADDING_MS,
        ))
    } else {
        Some((start, end))
    }
}

// ============================================================================
// Engine
// ============================================================================

pub struct ChartEngine {
    options: ChartOptions,
    prefs: ChartPreferences,
    container_width: Option<f64>,

    points: Vec<ChartPoint>,
    valid: Vec<LatencyPoint>,
    interval: i64,
    stats: ChartStats,

    scene: Scene,
    frame: Option<RenderFrame>,
    dirty: bool,

    tooltip: TooltipController,
    brush: BrushController,
    zoom: EventSource<ZoomRange>,
    resize_subscription: Option<Subscription>,
    disposed: bool,
}

impl ChartEngine {
    pub fn new(options: ChartOptions, prefs: ChartPreferences) -> Self {
        let size = ChartSize::new(options.width.unwrap_or(DEFAULT_CHART_WIDTH), options.height);
        Self {
            options,
            prefs,
            container_width: None,
            points: Vec::new(),
            valid: Vec::new(),
            interval: 0,
            stats: ChartStats::default(),
            scene: Scene::empty(size),
            frame: None,
            dirty: true,
            tooltip: TooltipController::default(),
            brush: BrushController::default(),
            zoom: EventSource::new(),
            resize_subscription: None,
            disposed: false,
        }
    }

    /// Replace the data set
    pub fn set_data(&mut self, buckets: &[RawBucket]) {
        self.points = prepare_points(buckets);
        self.valid = valid_latency_points(&self.points);
        self.interval = estimate_interval(&self.points);
        self.stats = compute_chart_stats(&self.points, &self.valid);
        self.dirty = true;
        tracing::info!(
            "Loaded {} buckets ({} with latency), interval {} ms",
            self.points.len(),
            self.valid.len(),
            self.interval
        );
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn valid_points(&self) -> &[LatencyPoint] {
        &self.valid
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn stats(&self) -> &ChartStats {
        &self.stats
    }

    pub fn preferences(&self) -> &ChartPreferences {
        &self.prefs
    }

    pub fn set_preferences(&mut self, prefs: ChartPreferences) {
        if prefs != self.prefs {
            self.prefs = prefs;
            self.dirty = true;
        }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ChartOptions) {
        if options != self.options {
            self.options = options;
            self.dirty = true;
        }
    }

    /// Effective outer size: fixed width, else container width, else default
    pub fn size(&self) -> ChartSize {
        let width = self
            .options
            .width
            .or(self.container_width)
            .unwrap_or(DEFAULT_CHART_WIDTH);
        ChartSize::new(width, self.options.height)
    }

    /// Record a new container width; marks the chart dirty when it changed
    pub fn set_container_width(&mut self, width: f64) {
        if !width.is_finite() || width < 0.0 {
            return;
        }
        if self.container_width != Some(width) {
            self.container_width = Some(width);
            if self.options.width.is_none() {
                self.dirty = true;
            }
        }
    }

    /// Re-render `engine` whenever `source` reports a new container width.
    /// The subscription lives until [`ChartEngine::dispose`].
    pub fn observe_resize(engine: &Rc<RefCell<ChartEngine>>, source: &EventSource<f64>) {
        let weak: Weak<RefCell<ChartEngine>> = Rc::downgrade(engine);
        let subscription = source.subscribe(move |width| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            let Ok(mut engine) = engine.try_borrow_mut() else {
                tracing::debug!("Resize event while the chart is busy, skipping");
                return;
            };
            engine.set_container_width(*width);
            engine.render_if_needed();
        });
        engine.borrow_mut().resize_subscription = Some(subscription);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Render only when data, preferences or size changed since the last pass
    pub fn render_if_needed(&mut self) -> bool {
        if self.dirty && !self.disposed {
            self.render();
            true
        } else {
            false
        }
    }

    /// Run a full render pass
    pub fn render(&mut self) -> &Scene {
        self.tooltip.clear();
        self.brush.cancel();
        self.dirty = false;

        let size = self.size();
        let layout = ChartLayout::compute(size, self.prefs.show_stats);
        let mut ctx = RenderContext::new(size);

        ctx.layer(LayerKind::Background, Pos::default(), None).fill_rect(
            Rect::new(0.0, 0.0, size.width, size.height),
            Paint::Solid(Color::rgb(BACKGROUND_COLOR)),
        );

        let Some(domain) = time_domain(&self.points) else {
            ctx.layer(LayerKind::Placeholder, Pos::default(), None).text(
                Pos::new(size.width / 2.0, size.height / 2.0),
                "No data",
                TextAnchor::Middle,
                14.0,
                Color::rgb(MUTED_TEXT_COLOR),
            );
            self.frame = None;
            self.scene = ctx.finish();
            tracing::debug!("Rendered placeholder ({}x{})", size.width, size.height);
            return &self.scene;
        };

        let scales = ChartScales::build(
            domain,
            &self.valid,
            layout.inner_width,
            layout.chart_height,
            self.prefs.clip_to_p99,
        );
        self.brush.set_width(layout.inner_width);

        let origin = layout.plot_origin();
        let clip = Some(layout.plot_rect());
        let offset = self.options.time_offset;

        render_grid(
            &mut ctx.layer(LayerKind::Grid, origin, None),
            &scales,
            layout.inner_width,
            layout.chart_height,
            offset,
        );

        let mut loss_region_count = 0;
        if self.prefs.show_packet_loss {
            let regions = loss_regions(&self.points, self.interval, &scales.x);
            loss_region_count = regions.len();
            render_packet_loss(
                &mut ctx.layer(LayerKind::PacketLoss, origin, clip),
                &regions,
                layout.chart_height,
            );
        }

        let mut density_bars = 0;
        if self.prefs.show_smoke {
            density_bars = render_density(
                &mut ctx.layer(LayerKind::Density, origin, clip),
                &self.valid,
                self.interval,
                &scales,
                self.prefs.density_mode,
                &SmokeStyle::default(),
            );
        }

        let stat_line_paths = render_stat_lines(
            &mut ctx.layer(LayerKind::StatLines, origin, clip),
            &self.valid,
            self.interval,
            &scales,
            &self.prefs,
        );

        render_axes(
            &mut ctx.layer(LayerKind::Axes, origin, None),
            &scales,
            layout.inner_width,
            layout.chart_height,
            offset,
        );

        if self.prefs.show_stats {
            let panel_origin = Pos::new(
                layout.margins.left + layout.inner_width + STATS_PANEL_GAP,
                layout.margins.top,
            );
            render_stats_panel(
                &mut ctx.layer(LayerKind::StatsPanel, panel_origin, None),
                &self.stats,
                offset,
            );
        }

        render_legend(
            &mut ctx.layer(
                LayerKind::Legend,
                Pos::new(layout.margins.left, layout.margins.top + layout.chart_height + LEGEND_OFFSET),
                None,
            ),
            &legend_items(&self.prefs),
            layout.inner_width,
        );

        let segment_count = split_segments(&self.valid, self.interval).len();
        tracing::debug!(
            "Rendered {} points in {} segments ({} bars, {} loss regions)",
            self.points.len(),
            segment_count,
            density_bars,
            loss_region_count
        );

        self.frame = Some(RenderFrame {
            layout,
            scales,
            interval: self.interval,
            segment_count,
            density_bars,
            loss_region_count,
            stat_line_paths,
        });
        self.scene = ctx.finish();
        &self.scene
    }

    /// The scene of the last render pass
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> Option<&RenderFrame> {
        self.frame.as_ref()
    }

    // ------------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------------

    /// Pointer moved to `pos` (chart pixels) at `now_ms`. Returns true when
    /// the hover state was recomputed.
    pub fn pointer_move(&mut self, now_ms: u64, pos: Pos) -> bool {
        let Some(frame) = &self.frame else {
            return false;
        };
        let layout = frame.layout;
        self.tooltip.pointer_move(
            now_ms,
            layout.to_plot(pos),
            &self.points,
            &frame.scales,
            (layout.inner_width, layout.chart_height),
            self.options.time_offset,
        )
    }

    pub fn pointer_leave(&mut self) {
        self.tooltip.pointer_leave();
    }

    pub fn hover(&self) -> Option<&HoverState> {
        self.tooltip.hover()
    }

    /// Start a brush drag at `x` (chart pixels)
    pub fn brush_start(&mut self, x: f64) {
        if let Some(frame) = &self.frame {
            self.brush.begin(x - frame.layout.margins.left);
        }
    }

    pub fn brush_drag(&mut self, x: f64) {
        if let Some(frame) = &self.frame {
            self.brush.update(x - frame.layout.margins.left);
        }
    }

    /// Release the brush at `x`; a wide enough selection is emitted to the
    /// zoom listeners and returned
    pub fn brush_end(&mut self, x: f64) -> Option<ZoomRange> {
        let frame = self.frame.as_ref()?;
        let range = self
            .brush
            .end(x - frame.layout.margins.left, &frame.scales.x)?;
        tracing::info!("Zoom selection {} - {}", range.start, range.end);
        self.zoom.emit(&range);
        Some(range)
    }

    pub fn brush_cancel(&mut self) {
        self.brush.cancel();
    }

    /// Current brush selection in plot pixels
    pub fn brush_selection(&self) -> Option<(f64, f64)> {
        self.brush.selection()
    }

    /// Listen for zoom selections
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn on_zoom(&self, listener: impl FnMut(&ZoomRange) + 'static) -> Subscription {
        self.zoom.subscribe(listener)
    }

    /// Hover and brush feedback on top of the last scene
    pub fn overlay(&self) -> Scene {
        let mut ctx = RenderContext::new(self.scene.size);
        if let Some(frame) = &self.frame {
            let layout = frame.layout;
            let mut layer = ctx.layer(LayerKind::Overlay, layout.plot_origin(), Some(layout.plot_rect()));

            if let Some((left, right)) = self.brush.selection() {
                let fill = Color::rgb(BRUSH_COLOR);
                layer.push(DrawCommand::Rect {
                    rect: Rect::from_edges(left, 0.0, right, layout.chart_height),
                    fill: Paint::Solid(fill.with_alpha(0.2)),
                    stroke: Some(Stroke::new(1.0, fill.with_alpha(0.8))),
                });
            }
            if let Some(hover) = self.tooltip.hover() {
                render_hover(&mut layer, hover, layout.chart_height);
            }
        }
        ctx.finish()
    }

    /// Tear down: drop listeners, the resize subscription and the panel
    pub fn dispose(&mut self) {
        self.resize_subscription.take();
        self.tooltip.clear();
        self.brush.cancel();
        self.zoom = EventSource::new();
        self.disposed = true;
    }
}
