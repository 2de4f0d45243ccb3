//! Grid lines, axis lines and tick labels.

use chrono::{DateTime, FixedOffset};

use crate::chart::scale::ChartScales;
use crate::chart::scene::{Color, LayerBuilder, Pos, Stroke, TextAnchor};
use crate::state::{AXIS_COLOR, GRID_COLOR, MUTED_TEXT_COLOR, TEXT_COLOR};

/// Horizontal room one time label needs
const PIXELS_PER_TIME_TICK: f64 = 110.0;

const VALUE_TICK_COUNT: usize = 5;
const TICK_LENGTH: f64 = 5.0;
const LABEL_SIZE: f64 = 11.0;

const SECOND_MS: i64 = 1_000;
const HOUR_MS: i64 = 3_600 * SECOND_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Time label granularity, chosen from the visible span
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFormat {
    Seconds,
    Minutes,
    DateTime,
    Date,
}

impl TimeFormat {
    pub fn for_span(span_ms: i64) -> Self {
        if span_ms <= HOUR_MS {
            TimeFormat::Seconds
        } else if span_ms <= DAY_MS {
            TimeFormat::Minutes
        } else if span_ms <= 7 * DAY_MS {
            TimeFormat::DateTime
        } else {
            TimeFormat::Date
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::Seconds => "%H:%M:%S",
            TimeFormat::Minutes => "%H:%M",
            TimeFormat::DateTime => "%m/%d %H:%M",
            TimeFormat::Date => "%Y-%m-%d",
        }
    }
}

/// Format epoch milliseconds with a strftime pattern in the given zone
pub fn format_timestamp(ms: i64, pattern: &str, offset: FixedOffset) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.with_timezone(&offset).format(pattern).to_string(),
        None => ms.to_string(),
    }
}

/// Full date and time, used by the tooltip and the stats panel
pub fn format_full_timestamp(ms: i64, offset: FixedOffset) -> String {
    format_timestamp(ms, "%Y-%m-%d %H:%M:%S", offset)
}

/// Value axis label; drops the fraction for whole numbers
pub fn format_tick_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Number of time ticks that fit into the plot width
pub fn time_tick_count(inner_width: f64) -> usize {
    ((inner_width / PIXELS_PER_TIME_TICK).floor() as usize).max(2)
}

/// Horizontal and vertical grid lines at tick positions
pub fn render_grid(
    out: &mut LayerBuilder<'_>,
    scales: &ChartScales,
    inner_width: f64,
    chart_height: f64,
    offset: FixedOffset,
) {
    let stroke = Stroke::new(1.0, Color::rgb(GRID_COLOR)).dashed(2.0, 3.0);

    for value in scales.y.ticks(VALUE_TICK_COUNT) {
        let y = scales.y.scale(value);
        out.line(Pos::new(0.0, y), Pos::new(inner_width, y), stroke);
    }
    for t in scales.x.ticks(time_tick_count(inner_width), offset) {
        let x = scales.x.scale(t);
        out.line(Pos::new(x, 0.0), Pos::new(x, chart_height), stroke);
    }
}

/// Axis lines with their tick marks and labels
pub fn render_axes(
    out: &mut LayerBuilder<'_>,
    scales: &ChartScales,
    inner_width: f64,
    chart_height: f64,
    offset: FixedOffset,
) {
    let axis = Stroke::new(1.0, Color::rgb(AXIS_COLOR));
    let text = Color::rgb(TEXT_COLOR);

    // Value axis
    out.line(Pos::new(0.0, 0.0), Pos::new(0.0, chart_height), axis);
    for value in scales.y.ticks(VALUE_TICK_COUNT) {
        let y = scales.y.scale(value);
        out.line(Pos::new(-TICK_LENGTH, y), Pos::new(0.0, y), axis);
        out.text(
            Pos::new(-TICK_LENGTH - 3.0, y),
            format_tick_value(value),
            TextAnchor::End,
            LABEL_SIZE,
            text,
        );
    }

    let title = if scales.clipped {
        "Latency (ms, p99 clipped)"
    } else {
        "Latency (ms)"
    };
    out.text(
        Pos::new(0.0, -10.0),
        title,
        TextAnchor::Middle,
        LABEL_SIZE,
        Color::rgb(MUTED_TEXT_COLOR),
    );

    // Time axis
    out.line(Pos::new(0.0, chart_height), Pos::new(inner_width, chart_height), axis);
    let format = TimeFormat::for_span(scales.x.span_ms());
    for t in scales.x.ticks(time_tick_count(inner_width), offset) {
        let x = scales.x.scale(t);
        out.line(Pos::new(x, chart_height), Pos::new(x, chart_height + TICK_LENGTH), axis);
        out.text(
            Pos::new(x, chart_height + TICK_LENGTH + 9.0),
            format_timestamp(t, format.pattern(), offset),
            TextAnchor::Middle,
            LABEL_SIZE,
            text,
        );
    }
}
