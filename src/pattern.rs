//! Pattern stamps.
//!
//! Patterns travel on the wire as icon identifiers.  Rather than shipping an
//! asset pipeline, each pattern is a procedural mask rasterized from a
//! signed distance function (negative = inside).  The mask's anti-aliased
//! coverage becomes the stamp's alpha and every covered pixel takes the
//! operation's fill color, so any icon reads as a solid recolorable shape.

use image::Rgba;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::surface::{source_over, Surface};

/// Smallest pattern size (logical units); smaller drags are floored to this
/// so a tap still leaves a visible stamp.
pub const MIN_PATTERN_SIZE: f32 = 5.0;

/// Pattern identifiers.  Wire names keep their historical casing quirks
/// (`"Star"` but `"snowflake"`).  Anything unrecognized decodes to
/// `Unknown`, which stamps nothing — a peer with newer patterns must not
/// break us.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatternKind {
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
    Cloud,
    Moon,
    Lightning,
    Snowflake,
    Cross,
    Rhombus,
    Hexagon,
    Flower,
    Diamond,
    Unknown,
}

impl PatternKind {
    /// The identifier peers exchange.
    pub fn wire_name(self) -> &'static str {
        match self {
            PatternKind::Circle => "Circle",
            PatternKind::Square => "Square",
            PatternKind::Triangle => "Triangle",
            PatternKind::Star => "Star",
            PatternKind::Heart => "Heart",
            PatternKind::Cloud => "Cloud",
            PatternKind::Moon => "Moon",
            PatternKind::Lightning => "Lightning",
            PatternKind::Snowflake => "snowflake",
            PatternKind::Cross => "cross",
            PatternKind::Rhombus => "rhombus",
            PatternKind::Hexagon => "hexagon",
            PatternKind::Flower => "flower",
            PatternKind::Diamond => "diamond",
            PatternKind::Unknown => "unknown",
        }
    }

    /// Reconstruct from a wire identifier (unknown names map to `Unknown`).
    pub fn from_wire(name: &str) -> Self {
        match name {
            "Circle" => PatternKind::Circle,
            "Square" => PatternKind::Square,
            "Triangle" => PatternKind::Triangle,
            "Star" => PatternKind::Star,
            "Heart" => PatternKind::Heart,
            "Cloud" => PatternKind::Cloud,
            "Moon" => PatternKind::Moon,
            "Lightning" => PatternKind::Lightning,
            "snowflake" => PatternKind::Snowflake,
            "cross" => PatternKind::Cross,
            "rhombus" => PatternKind::Rhombus,
            "hexagon" => PatternKind::Hexagon,
            "flower" => PatternKind::Flower,
            "diamond" => PatternKind::Diamond,
            _ => PatternKind::Unknown,
        }
    }
}

impl From<String> for PatternKind {
    fn from(name: String) -> Self {
        PatternKind::from_wire(&name)
    }
}

impl From<PatternKind> for String {
    fn from(kind: PatternKind) -> Self {
        kind.wire_name().to_string()
    }
}

/// Stamp a pattern mask onto `target`, centered at `center` (device pixels),
/// recolored to `color`, composited source-over.  Unknown kinds are a no-op.
pub fn stamp(target: &mut Surface, kind: PatternKind, center: (f32, f32), size_px: f32, color: Rgba<u8>) {
    if kind == PatternKind::Unknown {
        log::debug!("ignoring stamp with unknown pattern kind");
        return;
    }
    let size = size_px.max(1.0);
    let half = size / 2.0;

    let x0 = ((center.0 - half).floor() as i32).max(0);
    let y0 = ((center.1 - half).floor() as i32).max(0);
    let x1 = ((center.0 + half).ceil() as i32).min(target.width() as i32);
    let y1 = ((center.1 + half).ceil() as i32).min(target.height() as i32);
    let buf_w = (x1 - x0).max(0) as usize;
    let buf_h = (y1 - y0).max(0) as usize;
    if buf_w == 0 || buf_h == 0 {
        return;
    }

    // Rasterize the recolored mask into a scratch buffer, row-parallel.
    let mut mask = vec![0u8; buf_w * buf_h];
    mask.par_chunks_mut(buf_w).enumerate().for_each(|(row, row_buf)| {
        let py = (y0 + row as i32) as f32 + 0.5 - center.1;
        for (col, out) in row_buf.iter_mut().enumerate() {
            let px = (x0 + col as i32) as f32 + 0.5 - center.0;
            let d = pattern_sdf(kind, px, py, half);
            let coverage = smoothstep(0.5, -0.5, d);
            *out = (coverage * 255.0).round() as u8;
        }
    });

    for row in 0..buf_h {
        for col in 0..buf_w {
            let coverage = mask[row * buf_w + col];
            if coverage == 0 {
                continue;
            }
            let x = (x0 + col as i32) as u32;
            let y = (y0 + row as i32) as u32;
            let a = (color[3] as u16 * coverage as u16 / 255) as u8;
            let stamped = Rgba([color[0], color[1], color[2], a]);
            target.put_pixel(x, y, source_over(target.get_pixel(x, y), stamped));
        }
    }
}

// ============================================================================
// SDF toolkit — negative inside, in pixels
// ============================================================================

fn pattern_sdf(kind: PatternKind, px: f32, py: f32, h: f32) -> f32 {
    match kind {
        PatternKind::Circle => sdf_circle(px, py, h),
        PatternKind::Square => sdf_box(px, py, h * 0.9, h * 0.9),
        PatternKind::Triangle => sdf_polygon(px, py, h, 3),
        PatternKind::Hexagon => sdf_polygon(px, py, h, 6),
        PatternKind::Star => sdf_star(px, py, h, h * 0.45, 5),
        PatternKind::Heart => sdf_heart(px, py, h),
        PatternKind::Cloud => sdf_cloud(px, py, h),
        PatternKind::Moon => sdf_moon(px, py, h),
        PatternKind::Lightning => sdf_lightning(px, py, h),
        PatternKind::Snowflake => sdf_snowflake(px, py, h),
        PatternKind::Cross => sdf_cross(px, py, h),
        PatternKind::Rhombus => sdf_diamond(px, py, h * 0.6, h),
        PatternKind::Diamond => sdf_diamond(px, py, h * 0.85, h * 0.85),
        PatternKind::Flower => sdf_flower(px, py, h),
        PatternKind::Unknown => f32::MAX,
    }
}

#[inline]
fn sdf_circle(px: f32, py: f32, r: f32) -> f32 {
    (px * px + py * py).sqrt() - r
}

#[inline]
fn sdf_box(px: f32, py: f32, hx: f32, hy: f32) -> f32 {
    let dx = px.abs() - hx;
    let dy = py.abs() - hy;
    let outside = (dx.max(0.0) * dx.max(0.0) + dy.max(0.0) * dy.max(0.0)).sqrt();
    outside + dx.max(dy).min(0.0)
}

#[inline]
fn sdf_diamond(px: f32, py: f32, hx: f32, hy: f32) -> f32 {
    let d = px.abs() / hx + py.abs() / hy - 1.0;
    d / (1.0 / (hx * hx) + 1.0 / (hy * hy)).sqrt()
}

/// Regular polygon with `n` sides, circumscribed radius `r`.
fn sdf_polygon(px: f32, py: f32, r: f32, n: u32) -> f32 {
    let sector = std::f32::consts::TAU / n as f32;
    let half = sector * 0.5;
    let theta = py.atan2(px) + std::f32::consts::FRAC_PI_2;
    let theta = ((theta % sector) + sector) % sector - half;
    let len = (px * px + py * py).sqrt();
    len * theta.cos() - r * half.cos()
}

/// Star with `n` points, outer radius `ro`, inner radius `ri`: distance to
/// the edge of the repeating wedge sector.
fn sdf_star(px: f32, py: f32, ro: f32, ri: f32, n: u32) -> f32 {
    let sector = std::f32::consts::PI / n as f32;
    let theta = py.atan2(px) + std::f32::consts::FRAC_PI_2;
    let theta = ((theta % (2.0 * sector)) + 2.0 * sector) % (2.0 * sector);
    let len = (px * px + py * py).sqrt();

    // Edge runs from the outer tip (ro, 0) to the inner notch.
    let (ax, ay) = (ro, 0.0);
    let (bx, by) = (ri * sector.cos(), ri * sector.sin());
    let qx = len * (theta - sector).cos();
    let qy = len * (theta - sector).sin();

    let ex = bx - ax;
    let ey = by - ay;
    let fx = qx - ax;
    let fy = qy - ay;
    let t = ((fx * ex + fy * ey) / (ex * ex + ey * ey)).clamp(0.0, 1.0);
    let cx = ax + ex * t - qx;
    let cy = ay + ey * t - qy;
    let dist = (cx * cx + cy * cy).sqrt();
    if ex * fy - ey * fx < 0.0 { -dist } else { dist }
}

/// Signed distance to a simple polygon (any winding).
fn sdf_polygon_pts(verts: &[(f32, f32)], px: f32, py: f32) -> f32 {
    let n = verts.len();
    let mut d = (px - verts[0].0).powi(2) + (py - verts[0].1).powi(2);
    let mut s = 1.0_f32;
    let mut j = n - 1;
    for i in 0..n {
        let ex = verts[j].0 - verts[i].0;
        let ey = verts[j].1 - verts[i].1;
        let wx = px - verts[i].0;
        let wy = py - verts[i].1;
        let t = ((wx * ex + wy * ey) / (ex * ex + ey * ey)).clamp(0.0, 1.0);
        let bx = wx - ex * t;
        let by = wy - ey * t;
        d = d.min(bx * bx + by * by);
        let c1 = py >= verts[i].1;
        let c2 = py < verts[j].1;
        let c3 = ex * wy > ey * wx;
        if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
            s = -s;
        }
        j = i;
    }
    s * d.sqrt()
}

#[inline]
fn sdf_segment(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    let t = (((px - ax) * dx + (py - ay) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
    let cx = ax + t * dx;
    let cy = ay + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Two lobes and a point: union of two circles and a triangle.
fn sdf_heart(px: f32, py: f32, h: f32) -> f32 {
    let lobe_r = h * 0.5;
    let left = sdf_circle(px + h * 0.43, py + h * 0.32, lobe_r);
    let right = sdf_circle(px - h * 0.43, py + h * 0.32, lobe_r);
    let wedge = sdf_polygon_pts(
        &[(-h * 0.9, -h * 0.1), (h * 0.9, -h * 0.1), (0.0, h * 0.95)],
        px,
        py,
    );
    left.min(right).min(wedge)
}

/// Three puffs on a flat base.
fn sdf_cloud(px: f32, py: f32, h: f32) -> f32 {
    let left = sdf_circle(px + h * 0.45, py - h * 0.05, h * 0.38);
    let mid = sdf_circle(px, py + h * 0.15, h * 0.5);
    let right = sdf_circle(px - h * 0.45, py - h * 0.05, h * 0.38);
    let base = sdf_box(px, py - h * 0.25, h * 0.6, h * 0.22);
    left.min(mid).min(right).min(base)
}

/// Crescent: a circle with a shifted circle carved out.
fn sdf_moon(px: f32, py: f32, h: f32) -> f32 {
    let disk = sdf_circle(px, py, h * 0.9);
    let bite = sdf_circle(px - h * 0.45, py + h * 0.25, h * 0.75);
    disk.max(-bite)
}

/// Bolt: two slanted quads joined at the middle.
fn sdf_lightning(px: f32, py: f32, h: f32) -> f32 {
    let upper = sdf_polygon_pts(
        &[
            (h * 0.45, -h),
            (-h * 0.05, -h),
            (-h * 0.5, h * 0.12),
            (0.0, h * 0.12),
        ],
        px,
        py,
    );
    let lower = sdf_polygon_pts(
        &[
            (h * 0.5, -h * 0.12),
            (0.0, -h * 0.12),
            (-h * 0.45, h),
            (h * 0.05, h),
        ],
        px,
        py,
    );
    upper.min(lower)
}

/// Six arms: three bars through the center.
fn sdf_snowflake(px: f32, py: f32, h: f32) -> f32 {
    let thickness = h * 0.12;
    let mut d = f32::MAX;
    for k in 0..3 {
        let angle = k as f32 * std::f32::consts::FRAC_PI_3;
        let (sin, cos) = angle.sin_cos();
        d = d.min(sdf_segment(px, py, -cos * h, -sin * h, cos * h, sin * h) - thickness);
    }
    d
}

fn sdf_cross(px: f32, py: f32, h: f32) -> f32 {
    let arm = h * 0.3;
    sdf_box(px, py, h, arm).min(sdf_box(px, py, arm, h))
}

/// Ring of petals around a center disk.
fn sdf_flower(px: f32, py: f32, h: f32) -> f32 {
    let mut d = sdf_circle(px, py, h * 0.28);
    for k in 0..6 {
        let angle = k as f32 * std::f32::consts::TAU / 6.0;
        let (sin, cos) = angle.sin_cos();
        d = d.min(sdf_circle(px - cos * h * 0.58, py - sin * h * 0.58, h * 0.34));
    }
    d
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
