//! Monotone cubic interpolation in x (Fritsch-Carlson tangents).
//!
//! Produces a smooth path through every input point that never overshoots
//! between neighbouring points, so a latency line cannot dip below zero or
//! invent peaks that are not in the data.

use crate::chart::scene::{PathSegment, Pos};

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at an interior point from its two neighbours
fn interior_tangent(p0: Pos, p1: Pos, p2: Pos) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = if h0 != 0.0 { (p1.y - p0.y) / h0 } else { 0.0 };
    let s1 = if h1 != 0.0 { (p2.y - p1.y) / h1 } else { 0.0 };
    if h0 + h1 == 0.0 {
        return 0.0;
    }
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

/// One-sided tangent at an end point given the tangent of its neighbour
fn end_tangent(p0: Pos, p1: Pos, neighbour: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.y - p0.y) / h - neighbour) / 2.0
    }
}

/// Path segments through `points`; fewer than two points give an empty path
pub fn monotone_path(points: &[Pos]) -> Vec<PathSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(n);
    segments.push(PathSegment::MoveTo(points[0]));
    if n == 2 {
        segments.push(PathSegment::LineTo(points[1]));
        return segments;
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    for i in 0..n - 1 {
        let (a, b) = (points[i], points[i + 1]);
        let dx = (b.x - a.x) / 3.0;
        segments.push(PathSegment::CubicTo {
            c1: Pos::new(a.x + dx, a.y + dx * tangents[i]),
            c2: Pos::new(b.x - dx, b.y - dx * tangents[i + 1]),
            to: b,
        });
    }
    segments
}
