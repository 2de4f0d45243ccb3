//! Paints a [`Scene`] with an egui painter.

use eframe::egui;

use crate::chart::scene::{
    Color, DrawCommand, GradientStop, Paint, PathSegment, Pos, Rect, Scene, Stroke, TextAnchor,
};

/// Line segments used to approximate one cubic Bézier segment
const CURVE_STEPS: usize = 12;

fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, (color.a * 255.0).round() as u8)
}

fn stroke32(stroke: &Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width as f32, color32(stroke.color))
}

/// Maps scene coordinates of one layer to screen coordinates
#[derive(Clone, Copy)]
struct Transform {
    origin: egui::Pos2,
}

impl Transform {
    fn pos(&self, p: Pos) -> egui::Pos2 {
        egui::pos2(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }

    fn rect(&self, r: &Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.pos(Pos::new(r.x, r.y)),
            egui::vec2(r.width as f32, r.height as f32),
        )
    }
}

/// Paint every layer of `scene` with its top-left corner at `origin`
pub fn paint_scene(painter: &egui::Painter, origin: egui::Pos2, scene: &Scene) {
    for layer in &scene.layers {
        let transform = Transform {
            origin: origin + egui::vec2(layer.offset.x as f32, layer.offset.y as f32),
        };
        let painter = match &layer.clip {
            Some(clip) => painter.with_clip_rect(transform.rect(clip).intersect(painter.clip_rect())),
            None => painter.clone(),
        };
        for command in &layer.commands {
            paint_command(&painter, transform, scene, command);
        }
    }
}

fn paint_command(painter: &egui::Painter, t: Transform, scene: &Scene, command: &DrawCommand) {
    match command {
        DrawCommand::Rect { rect, fill, stroke } => {
            let screen = t.rect(rect);
            match fill {
                Paint::Solid(color) => {
                    painter.rect_filled(screen, 0.0, color32(*color));
                }
                Paint::Gradient(id) => {
                    if let Some(gradient) = scene.gradient(*id) {
                        painter.add(gradient_mesh(screen, &gradient.stops));
                    }
                }
            }
            if let Some(stroke) = stroke {
                painter.rect_stroke(
                    screen,
                    egui::CornerRadius::ZERO,
                    stroke32(stroke),
                    egui::StrokeKind::Inside,
                );
            }
        }
        DrawCommand::Line { from, to, stroke } => {
            paint_polyline(painter, vec![t.pos(*from), t.pos(*to)], stroke);
        }
        DrawCommand::Path { segments, stroke } => {
            paint_polyline(painter, flatten(segments, t), stroke);
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let center = t.pos(*center);
            painter.circle_filled(center, *radius as f32, color32(*fill));
            if let Some(stroke) = stroke {
                painter.circle_stroke(center, *radius as f32, stroke32(stroke));
            }
        }
        DrawCommand::Text {
            pos,
            text,
            anchor,
            size,
            color,
            bold,
        } => {
            let align = match anchor {
                TextAnchor::Start => egui::Align2::LEFT_CENTER,
                TextAnchor::Middle => egui::Align2::CENTER_CENTER,
                TextAnchor::End => egui::Align2::RIGHT_CENTER,
            };
            let font = egui::FontId::proportional(*size as f32);
            let pos = t.pos(*pos);
            painter.text(pos, align, text, font.clone(), color32(*color));
            if *bold {
                painter.text(pos + egui::vec2(0.6, 0.0), align, text, font, color32(*color));
            }
        }
    }
}

fn paint_polyline(painter: &egui::Painter, points: Vec<egui::Pos2>, stroke: &Stroke) {
    if points.len() < 2 {
        return;
    }
    let egui_stroke = stroke32(stroke);
    match stroke.dash {
        Some([dash, gap]) => {
            painter.extend(egui::Shape::dashed_line(&points, egui_stroke, dash as f32, gap as f32));
        }
        None => {
            painter.add(egui::Shape::line(points, egui_stroke));
        }
    }
}

/// Sample a path into screen-space points
fn flatten(segments: &[PathSegment], t: Transform) -> Vec<egui::Pos2> {
    let mut points = Vec::new();
    let mut cursor = Pos::default();
    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                points.push(t.pos(p));
                cursor = p;
            }
            PathSegment::CubicTo { c1, c2, to } => {
                for step in 1..=CURVE_STEPS {
                    let s = step as f64 / CURVE_STEPS as f64;
                    let u = 1.0 - s;
                    let x = u * u * u * cursor.x
                        + 3.0 * u * u * s * c1.x
                        + 3.0 * u * s * s * c2.x
                        + s * s * s * to.x;
                    let y = u * u * u * cursor.y
                        + 3.0 * u * u * s * c1.y
                        + 3.0 * u * s * s * c2.y
                        + s * s * s * to.y;
                    points.push(t.pos(Pos::new(x, y)));
                }
                cursor = to;
            }
        }
    }
    points
}

/// Vertical gradient as a strip of colored quads
fn gradient_mesh(rect: egui::Rect, stops: &[GradientStop]) -> egui::Shape {
    let mut mesh = egui::Mesh::default();
    for stop in stops {
        let y = rect.top() + rect.height() * stop.offset.clamp(0.0, 1.0) as f32;
        let color = color32(stop.color);
        mesh.colored_vertex(egui::pos2(rect.left(), y), color);
        mesh.colored_vertex(egui::pos2(rect.right(), y), color);
    }
    for i in 1..stops.len() as u32 {
        let (a, b) = (2 * (i - 1), 2 * i);
        mesh.add_triangle(a, a + 1, b);
        mesh.add_triangle(a + 1, b + 1, b);
    }
    egui::Shape::mesh(mesh)
}
