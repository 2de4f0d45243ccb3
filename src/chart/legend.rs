//! Legend row below the time axis.

use strum::IntoEnumIterator;

use crate::chart::scene::{Color, LayerBuilder, Paint, Pos, Rect, Stroke, TextAnchor};
use crate::chart::stat_lines::StatLine;
use crate::settings::ChartPreferences;
use crate::state::{LossSeverity, MUTED_TEXT_COLOR, SMOKE_COLOR};

const SWATCH_WIDTH: f64 = 14.0;
const SWATCH_GAP: f64 = 5.0;
const ITEM_GAP: f64 = 14.0;
const TEXT_SIZE: f64 = 11.0;
/// Rough glyph advance used to lay out labels without a font
const CHAR_WIDTH: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Swatch {
    Line(Stroke),
    Block(Color),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub swatch: Swatch,
    pub label: String,
}

/// Items for everything currently drawn, in drawing order
pub fn legend_items(prefs: &ChartPreferences) -> Vec<LegendItem> {
    let mut items = Vec::new();

    if prefs.show_smoke {
        items.push(LegendItem {
            swatch: Swatch::Block(Color::rgb(SMOKE_COLOR).with_alpha(0.6)),
            label: format!("Smoke ({})", prefs.density_mode.label()),
        });
    }
    for line in StatLine::iter().rev().filter(|l| l.is_enabled(prefs)) {
        items.push(LegendItem {
            swatch: Swatch::Line(line.stroke()),
            label: line.label().to_string(),
        });
    }
    if prefs.show_packet_loss {
        for severity in LossSeverity::WITH_LOSS {
            items.push(LegendItem {
                swatch: Swatch::Block(Color::rgb(severity.color()).with_alpha(0.5)),
                label: format!("Loss {}", severity.label()),
            });
        }
    }
    items
}

/// Lay the items out left to right, wrapping at `width`
pub fn render_legend(out: &mut LayerBuilder<'_>, items: &[LegendItem], width: f64) {
    let text = Color::rgb(MUTED_TEXT_COLOR);
    let mut x = 0.0;
    let mut y = 0.0;

    for item in items {
        let item_width = SWATCH_WIDTH + SWATCH_GAP + item.label.chars().count() as f64 * CHAR_WIDTH;
        if x > 0.0 && x + item_width > width {
            x = 0.0;
            y += TEXT_SIZE + 6.0;
        }

        match &item.swatch {
            Swatch::Line(stroke) => {
                out.line(Pos::new(x, y), Pos::new(x + SWATCH_WIDTH, y), *stroke);
            }
            Swatch::Block(color) => {
                out.fill_rect(Rect::new(x, y - 5.0, SWATCH_WIDTH, 10.0), Paint::Solid(*color));
            }
        }
        out.text(
            Pos::new(x + SWATCH_WIDTH + SWATCH_GAP, y),
            item.label.as_str(),
            TextAnchor::Start,
            TEXT_SIZE,
            text,
        );
        x += item_width + ITEM_GAP;
    }
}
