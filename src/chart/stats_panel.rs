//! Side panel listing the summary statistics of the rendered series.

use chrono::FixedOffset;

use crate::analysis::ChartStats;
use crate::chart::axes::format_full_timestamp;
use crate::chart::scene::{Color, DrawCommand, LayerBuilder, Paint, Pos, Rect, Stroke, TextAnchor};
use crate::state::{
    LossSeverity, AXIS_COLOR, BACKGROUND_COLOR, MUTED_TEXT_COLOR, STATS_PANEL_WIDTH, TEXT_COLOR,
};

const ROW_HEIGHT: f64 = 16.0;
const PADDING: f64 = 10.0;
const TEXT_SIZE: f64 = 11.0;
const HEADING_SIZE: f64 = 12.0;

/// Milliseconds with two decimals
pub fn format_ms(value: f64) -> String {
    format!("{:.2} ms", value)
}

/// Percentage with one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn format_optional_ms(value: Option<f64>) -> String {
    value.map(format_ms).unwrap_or_else(|| "-".to_string())
}

/// A labelled value, optionally tinted
#[derive(Clone, Debug, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
    pub color: Option<[u8; 3]>,
}

impl StatRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            color: None,
        }
    }

    fn loss(label: &'static str, value: f64) -> Self {
        let severity = LossSeverity::from_percent(value);
        Self {
            label,
            value: format_percent(value),
            color: (severity != LossSeverity::None).then(|| severity.color()),
        }
    }
}

/// Grouped rows of the panel: heading plus rows
pub fn stat_sections(stats: &ChartStats, offset: FixedOffset) -> Vec<(&'static str, Vec<StatRow>)> {
    let latency = stats.latency.as_ref();
    vec![
        (
            "Latency",
            vec![
                StatRow::plain("Average", format_optional_ms(latency.map(|s| s.mean))),
                StatRow::plain("Median", format_optional_ms(latency.map(|s| s.median))),
                StatRow::plain("Min", format_optional_ms(latency.map(|s| s.min))),
                StatRow::plain("Max", format_optional_ms(latency.map(|s| s.max))),
                StatRow::plain("Current", format_optional_ms(stats.current_latency)),
                StatRow::plain("Std dev", format_optional_ms(latency.map(|s| s.stdev))),
            ],
        ),
        (
            "Packet loss",
            vec![
                StatRow::loss("Average", stats.mean_loss),
                StatRow::loss("Min", stats.min_loss),
                StatRow::loss("Max", stats.max_loss),
                StatRow::loss("Current", stats.current_loss),
            ],
        ),
        (
            "Samples",
            vec![
                StatRow::plain("Total", stats.total_samples.to_string()),
                StatRow::plain("Buckets", stats.bucket_count.to_string()),
                StatRow::plain(
                    "Last",
                    stats
                        .last_sample
                        .map(|t| format_full_timestamp(t, offset))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ],
        ),
    ]
}

/// Draw the panel into a layer positioned at its top-left corner
pub fn render_stats_panel(out: &mut LayerBuilder<'_>, stats: &ChartStats, offset: FixedOffset) {
    let sections = stat_sections(stats, offset);
    let rows: usize = sections.iter().map(|(_, rows)| rows.len() + 1).sum();
    let width = STATS_PANEL_WIDTH - 2.0 * PADDING;
    let height = rows as f64 * ROW_HEIGHT + 2.0 * PADDING;

    out.push(DrawCommand::Rect {
        rect: Rect::new(0.0, 0.0, width, height),
        fill: Paint::Solid(Color::rgb(BACKGROUND_COLOR).with_alpha(0.9)),
        stroke: Some(Stroke::new(1.0, Color::rgb(AXIS_COLOR))),
    });

    let mut y = PADDING + ROW_HEIGHT / 2.0;
    for (heading, rows) in sections {
        out.bold_text(
            Pos::new(PADDING, y),
            heading,
            TextAnchor::Start,
            HEADING_SIZE,
            Color::rgb(TEXT_COLOR),
        );
        y += ROW_HEIGHT;
        for row in rows {
            out.text(
                Pos::new(PADDING, y),
                row.label,
                TextAnchor::Start,
                TEXT_SIZE,
                Color::rgb(MUTED_TEXT_COLOR),
            );
            out.text(
                Pos::new(width - PADDING, y),
                row.value,
                TextAnchor::End,
                TEXT_SIZE,
                Color::rgb(row.color.unwrap_or(TEXT_COLOR)),
            );
            y += ROW_HEIGHT;
        }
    }
}
