//! SVG serialization of scenes.

use std::fmt::Write as _;

use crate::chart::scene::{
    Color, DrawCommand, Layer, Paint, PathSegment, Rect, Scene, Stroke, TextAnchor,
};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Compact number formatting: at most two decimals, no trailing zeros
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let text = format!("{:.2}", v);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn fill_attrs(color: &Color) -> String {
    if color.a >= 1.0 {
        format!("fill=\"{}\"", color.hex())
    } else {
        format!("fill=\"{}\" fill-opacity=\"{}\"", color.hex(), num(color.a))
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        "stroke=\"{}\" stroke-width=\"{}\"",
        stroke.color.hex(),
        num(stroke.width)
    );
    if stroke.color.a < 1.0 {
        let _ = write!(attrs, " stroke-opacity=\"{}\"", num(stroke.color.a));
    }
    if let Some([dash, gap]) = stroke.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{} {}\"", num(dash), num(gap));
    }
    attrs
}

fn path_data(segments: &[PathSegment]) -> String {
    let mut d = String::new();
    for segment in segments {
        if !d.is_empty() {
            d.push(' ');
        }
        match segment {
            PathSegment::MoveTo(p) => {
                let _ = write!(d, "M{},{}", num(p.x), num(p.y));
            }
            PathSegment::LineTo(p) => {
                let _ = write!(d, "L{},{}", num(p.x), num(p.y));
            }
            PathSegment::CubicTo { c1, c2, to } => {
                let _ = write!(
                    d,
                    "C{},{} {},{} {},{}",
                    num(c1.x),
                    num(c1.y),
                    num(c2.x),
                    num(c2.y),
                    num(to.x),
                    num(to.y)
                );
            }
        }
    }
    d
}

fn rect_attrs(rect: &Rect) -> String {
    format!(
        "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height)
    )
}

fn write_command(out: &mut String, command: &DrawCommand) {
    match command {
        DrawCommand::Rect { rect, fill, stroke } => {
            let fill = match fill {
                Paint::Solid(color) => fill_attrs(color),
                Paint::Gradient(id) => format!("fill=\"url(#gradient-{})\"", id.0),
            };
            let stroke = stroke
                .as_ref()
                .map(|s| format!(" {}", stroke_attrs(s)))
                .unwrap_or_default();
            let _ = writeln!(out, "<rect {} {}{}/>", rect_attrs(rect), fill, stroke);
        }
        DrawCommand::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {}/>",
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(stroke)
            );
        }
        DrawCommand::Path { segments, stroke } => {
            if segments.is_empty() {
                return;
            }
            let _ = writeln!(
                out,
                "<path d=\"{}\" fill=\"none\" {}/>",
                path_data(segments),
                stroke_attrs(stroke)
            );
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let stroke = stroke
                .as_ref()
                .map(|s| format!(" {}", stroke_attrs(s)))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}{}/>",
                num(center.x),
                num(center.y),
                num(*radius),
                fill_attrs(fill),
                stroke
            );
        }
        DrawCommand::Text {
            pos,
            text,
            anchor,
            size,
            color,
            bold,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = if *bold { " font-weight=\"bold\"" } else { "" };
            let _ = writeln!(
                out,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\" font-size=\"{}\" {}{}>{}</text>",
                num(pos.x),
                num(pos.y),
                anchor,
                num(*size),
                fill_attrs(color),
                weight,
                escape(text)
            );
        }
    }
}

fn write_layer(out: &mut String, index: usize, layer: &Layer) {
    let clip = if layer.clip.is_some() {
        format!(" clip-path=\"url(#clip-{})\"", index)
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        "<g class=\"{:?}\" transform=\"translate({},{})\"{}>",
        layer.kind,
        num(layer.offset.x),
        num(layer.offset.y),
        clip
    );
    for command in &layer.commands {
        write_command(out, command);
    }
    out.push_str("</g>\n");
}

/// Serialize a scene as a standalone SVG document
pub fn render_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}\">",
        w = num(scene.size.width),
        h = num(scene.size.height),
        font = FONT_FAMILY
    );

    out.push_str("<defs>\n");
    for gradient in &scene.gradients {
        let _ = writeln!(
            out,
            "<linearGradient id=\"gradient-{}\" x1=\"0\" y1=\"0\" x2=\"0\" y2=\"1\">",
            gradient.id.0
        );
        for stop in &gradient.stops {
            let _ = writeln!(
                out,
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                num(stop.offset),
                stop.color.hex(),
                num(stop.color.a)
            );
        }
        out.push_str("</linearGradient>\n");
    }
    for (i, layer) in scene.layers.iter().enumerate() {
        if let Some(clip) = &layer.clip {
            let _ = writeln!(
                out,
                "<clipPath id=\"clip-{}\"><rect {}/></clipPath>",
                i,
                rect_attrs(clip)
            );
        }
    }
    out.push_str("</defs>\n");

    for (i, layer) in scene.layers.iter().enumerate() {
        write_layer(&mut out, i, layer);
    }
    out.push_str("</svg>\n");
    out
}
