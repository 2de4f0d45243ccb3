//! Hover inspection: nearest bucket, crosshair, marker and info panel.

use chrono::FixedOffset;

use crate::analysis::Timestamped;
use crate::chart::axes::format_full_timestamp;
use crate::chart::scale::ChartScales;
use crate::chart::scene::{Color, DrawCommand, LayerBuilder, Paint, Pos, Rect, Stroke, TextAnchor};
use crate::chart::stats_panel::{format_ms, format_percent};
use crate::state::{
    ChartPoint, LossSeverity, BACKGROUND_COLOR, CROSSHAIR_COLOR, MUTED_TEXT_COLOR, TEXT_COLOR,
    TOOLTIP_THROTTLE_MS,
};

const PANEL_WIDTH: f64 = 190.0;
const PANEL_OFFSET: f64 = 12.0;
const ROW_HEIGHT: f64 = 15.0;
const PADDING: f64 = 8.0;
const TEXT_SIZE: f64 = 11.0;
const MARKER_RADIUS: f64 = 5.0;

/// Leading-edge throttle: the first event of a window passes, the rest of
/// the window is dropped
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    window_ms: u64,
    last: Option<u64>,
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(TOOLTIP_THROTTLE_MS)
    }
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    /// True when an event at `now_ms` should be processed
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last {
            Some(last) if now_ms.saturating_sub(last) < self.window_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Index of the point closest in time to `t`.
///
/// Bisects for the first point at or after `t` and compares it with its
/// predecessor; when both are equally far away the later point wins.
pub fn nearest_index<T: Timestamped>(points: &[T], t: f64) -> Option<usize> {
    if points.is_empty() || t.is_nan() {
        return None;
    }
    let i = points.partition_point(|p| (p.timestamp() as f64) < t);
    if i == 0 {
        return Some(0);
    }
    if i == points.len() {
        return Some(points.len() - 1);
    }
    let before = t - points[i - 1].timestamp() as f64;
    let after = points[i].timestamp() as f64 - t;
    Some(if before < after { i - 1 } else { i })
}

/// Floating info panel content and position (plot pixels, top-left corner)
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPanel {
    pub title: String,
    pub rows: Vec<(&'static str, String)>,
    pub severity: LossSeverity,
    pub origin: Pos,
}

impl TooltipPanel {
    fn for_point(point: &ChartPoint, offset: FixedOffset) -> Self {
        let ms = |v: Option<f64>| v.map(format_ms).unwrap_or_else(|| "-".to_string());
        Self {
            title: format_full_timestamp(point.timestamp, offset),
            rows: vec![
                ("Avg", ms(point.avg)),
                ("Min", ms(point.min)),
                ("Max", ms(point.max)),
                ("Loss", format_percent(point.packet_loss)),
                ("Failed", format!("{}/{}", point.failed, point.count)),
            ],
            severity: point.severity(),
            origin: Pos::default(),
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (
            PANEL_WIDTH,
            (self.rows.len() + 1) as f64 * ROW_HEIGHT + 2.0 * PADDING,
        )
    }
}

/// What the pointer currently highlights
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    pub index: usize,
    pub crosshair_x: f64,
    /// Marker on the average line, absent when the bucket has no latency
    pub marker: Option<Pos>,
    pub panel: TooltipPanel,
}

/// Tracks the pointer and owns the single info panel of a chart
#[derive(Clone, Debug, Default)]
pub struct TooltipController {
    throttle: Throttle,
    hover: Option<HoverState>,
}

impl TooltipController {
    /// Handle a pointer move at plot position `pos`. Returns false when the
    /// event was throttled away.
    pub fn pointer_move(
        &mut self,
        now_ms: u64,
        pos: Pos,
        points: &[ChartPoint],
        scales: &ChartScales,
        plot: (f64, f64),
        offset: FixedOffset,
    ) -> bool {
        if !self.throttle.ready(now_ms) {
            return false;
        }

        let (width, height) = plot;
        if !Rect::new(0.0, 0.0, width, height).contains(pos) {
            self.hover = None;
            return true;
        }

        let t = scales.x.invert(pos.x);
        self.hover = nearest_index(points, t).map(|index| {
            let point = &points[index];
            let crosshair_x = scales.x.scale(point.timestamp);
            let marker = point.avg.map(|avg| Pos::new(crosshair_x, scales.y.scale(avg)));

            let mut panel = TooltipPanel::for_point(point, offset);
            let (panel_width, panel_height) = panel.size();
            let x = if crosshair_x + PANEL_OFFSET + panel_width > width {
                crosshair_x - PANEL_OFFSET - panel_width
            } else {
                crosshair_x + PANEL_OFFSET
            };
            let y = (pos.y - panel_height / 2.0).clamp(0.0, (height - panel_height).max(0.0));
            panel.origin = Pos::new(x.max(0.0), y);

            HoverState {
                index,
                crosshair_x,
                marker,
                panel,
            }
        });
        true
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    pub fn hover(&self) -> Option<&HoverState> {
        self.hover.as_ref()
    }

    /// Drop the panel, e.g. before the chart is rebuilt
    pub fn clear(&mut self) {
        self.hover = None;
        self.throttle.reset();
    }
}

/// Crosshair, marker and panel for the current hover
pub fn render_hover(out: &mut LayerBuilder<'_>, hover: &HoverState, chart_height: f64) {
    let accent = Color::rgb(CROSSHAIR_COLOR);
    out.line(
        Pos::new(hover.crosshair_x, 0.0),
        Pos::new(hover.crosshair_x, chart_height),
        Stroke::new(1.0, accent.with_alpha(0.7)).dashed(4.0, 4.0),
    );

    if let Some(marker) = hover.marker {
        out.push(DrawCommand::Circle {
            center: marker,
            radius: MARKER_RADIUS,
            fill: accent,
            stroke: Some(Stroke::new(1.5, Color::rgb(BACKGROUND_COLOR))),
        });
    }

    let panel = &hover.panel;
    let (width, height) = panel.size();
    let severity = Color::rgb(panel.severity.color());
    out.push(DrawCommand::Rect {
        rect: Rect::new(panel.origin.x, panel.origin.y, width, height),
        fill: Paint::Solid(Color::rgb(BACKGROUND_COLOR).with_alpha(0.95)),
        stroke: Some(Stroke::new(1.0, severity)),
    });

    let left = panel.origin.x + PADDING;
    let right = panel.origin.x + width - PADDING;
    let mut y = panel.origin.y + PADDING + ROW_HEIGHT / 2.0;
    out.bold_text(Pos::new(left, y), panel.title.as_str(), TextAnchor::Start, TEXT_SIZE, Color::rgb(TEXT_COLOR));
    for (label, value) in &panel.rows {
        y += ROW_HEIGHT;
        let value_color = match *label {
            "Loss" | "Failed" if panel.severity != LossSeverity::None => severity,
            _ => Color::rgb(TEXT_COLOR),
        };
        out.text(Pos::new(left, y), *label, TextAnchor::Start, TEXT_SIZE, Color::rgb(MUTED_TEXT_COLOR));
        out.text(Pos::new(right, y), value.as_str(), TextAnchor::End, TEXT_SIZE, value_color);
    }
}
