//! Backend-neutral scene graph produced by one render pass.
//!
//! A [`Scene`] is an ordered list of [`Layer`]s, each holding plain
//! [`DrawCommand`]s in layer-local pixel coordinates, plus the gradient
//! definitions referenced by those commands. Scenes are rebuilt from scratch
//! on every pass through a [`RenderContext`] and never patched in place.

use crate::state::ChartSize;

/// RGB color with a separate opacity in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgb(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// `#rrggbb` form, opacity excluded
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; width and height are never negative
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build from two corners in any order
    pub fn from_edges(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Pos) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.x.is_finite() && self.y.is_finite()
    }
}

/// Handle to a gradient defined in the current scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GradientId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// 0 = top of the filled shape, 1 = bottom
    pub offset: f64,
    pub color: Color,
}

/// Vertical linear gradient spanning the bounding box of the shape it fills
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub id: GradientId,
    pub stops: Vec<GradientStop>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(GradientId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
    /// Dash and gap lengths
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    pub fn dashed(self, dash: f64, gap: f64) -> Self {
        Self {
            dash: Some([dash, gap]),
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Pos),
    LineTo(Pos),
    CubicTo { c1: Pos, c2: Pos, to: Pos },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A single drawing primitive. Text positions refer to the vertical centre
/// of the line of text.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Line {
        from: Pos,
        to: Pos,
        stroke: Stroke,
    },
    Path {
        segments: Vec<PathSegment>,
        stroke: Stroke,
    },
    Circle {
        center: Pos,
        radius: f64,
        fill: Color,
        stroke: Option<Stroke>,
    },
    Text {
        pos: Pos,
        text: String,
        anchor: TextAnchor,
        size: f64,
        color: Color,
        bold: bool,
    },
}

/// What a layer depicts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Grid,
    PacketLoss,
    Density,
    StatLines,
    Axes,
    StatsPanel,
    Legend,
    Placeholder,
    /// Hover and brush feedback, drawn above everything else
    Overlay,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Translation applied to every command of the layer
    pub offset: Pos,
    /// Clip rectangle in layer-local coordinates
    pub clip: Option<Rect>,
    pub commands: Vec<DrawCommand>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub size: ChartSize,
    pub layers: Vec<Layer>,
    pub gradients: Vec<LinearGradient>,
}

impl Scene {
    pub fn empty(size: ChartSize) -> Self {
        Self {
            size,
            layers: Vec::new(),
            gradients: Vec::new(),
        }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn gradient(&self, id: GradientId) -> Option<&LinearGradient> {
        self.gradients.iter().find(|g| g.id == id)
    }

    /// Total number of primitives across all layers
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|l| l.commands.len()).sum()
    }
}

/// Owned builder for one render pass. Dropping it discards everything built
/// so far; [`RenderContext::finish`] hands the scene over.
pub struct RenderContext {
    scene: Scene,
}

impl RenderContext {
    pub fn new(size: ChartSize) -> Self {
        Self {
            scene: Scene::empty(size),
        }
    }

    /// Start a new layer on top of all previous ones
    pub fn layer(&mut self, kind: LayerKind, offset: Pos, clip: Option<Rect>) -> LayerBuilder<'_> {
        let Scene {
            layers, gradients, ..
        } = &mut self.scene;
        layers.push(Layer {
            kind,
            offset,
            clip,
            commands: Vec::new(),
        });
        let layer = layers.len() - 1;
        LayerBuilder {
            layer: &mut layers[layer],
            gradients,
        }
    }

    pub fn finish(self) -> Scene {
        self.scene
    }
}

/// Appends commands to one layer and registers gradients for it
pub struct LayerBuilder<'a> {
    layer: &'a mut Layer,
    gradients: &'a mut Vec<LinearGradient>,
}

impl LayerBuilder<'_> {
    pub fn push(&mut self, command: DrawCommand) {
        self.layer.commands.push(command);
    }

    /// Filled rectangle; degenerate rectangles are dropped
    pub fn fill_rect(&mut self, rect: Rect, fill: Paint) {
        if rect.is_drawable() {
            self.push(DrawCommand::Rect {
                rect,
                fill,
                stroke: None,
            });
        }
    }

    pub fn line(&mut self, from: Pos, to: Pos, stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    pub fn text(&mut self, pos: Pos, text: impl Into<String>, anchor: TextAnchor, size: f64, color: Color) {
        self.push(DrawCommand::Text {
            pos,
            text: text.into(),
            anchor,
            size,
            color,
            bold: false,
        });
    }

    pub fn bold_text(&mut self, pos: Pos, text: impl Into<String>, anchor: TextAnchor, size: f64, color: Color) {
        self.push(DrawCommand::Text {
            pos,
            text: text.into(),
            anchor,
            size,
            color,
            bold: true,
        });
    }

    /// Register a vertical gradient, scoped to the scene being built
    pub fn define_gradient(&mut self, stops: Vec<GradientStop>) -> GradientId {
        let id = GradientId(self.gradients.len());
        self.gradients.push(LinearGradient { id, stops });
        id
    }

    pub fn len(&self) -> usize {
        self.layer.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layer.commands.is_empty()
    }
}
