//! Brush segment rendering.
//!
//! Strokes arrive as sparse pointer samples; each `{from, to}` segment is
//! rendered by stepping interpolated positions at unit-pixel intervals and
//! stamping a brush tip at every step into a stroke buffer.  Stamps combine
//! by alpha-max ([`Surface::stamp_max`]), so a stroke reads as one smooth
//! variable-width mark instead of a chain of darkening dots.  The finished
//! buffer is composited onto the drawing layer exactly once — source-over
//! for paint, subtractively for the eraser; that compositing mode is the
//! only difference between the two.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::op::Segment;
use crate::surface::Surface;

/// Dots scattered per spray step.
const SPRAY_DENSITY: u32 = 15;

/// Logical distance between spray bursts along a segment.
const SPRAY_SPACING: f32 = 2.0;

/// Brush tip styles.  Wire names are the camelCase identifiers peers
/// exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrushShape {
    Round,
    Square,
    Spray,
    Marker,
    Calligraphy,
    Chalk,
    Watercolor,
    OilPaint,
    Crayon,
    TexturedPencil,
    Pen,
    Eraser,
}

/// Settings snapshot a stroke operation carries; resolved to pixels here.
#[derive(Clone, Copy, Debug)]
pub struct StrokeStyle {
    pub color: Rgba<u8>,
    /// Brush size in logical units (scaled by the surface DPR at render time).
    pub brush_size: f32,
    pub shape: BrushShape,
    pub alpha: f32,
    pub erase: bool,
}

/// Tip geometry used when stamping one step of a stroke.
#[derive(Clone, Copy)]
enum Tip {
    Circle,
    Square,
    /// Thin bar at a fixed 45° angle — the butt-capped calligraphy nib.
    Nib,
}

/// Fully resolved parameters for a single stamp.
struct Stamp {
    width: f32,
    alpha: f32,
    hardness: f32,
    tip: Tip,
    color: Rgba<u8>,
}

/// Render every segment of a stroke into `buf`.
pub fn render_stroke(buf: &mut Surface, segments: &[Segment], style: &StrokeStyle, dpr: f32) {
    for (index, segment) in segments.iter().enumerate() {
        render_segment(buf, segment, style, dpr, index as u32);
    }
}

fn render_segment(buf: &mut Surface, segment: &Segment, style: &StrokeStyle, dpr: f32, salt: u32) {
    let w = buf.width() as f32;
    let h = buf.height() as f32;
    let from = (segment.from.x * w, segment.from.y * h);
    let to = (segment.to.x * w, segment.to.y * h);
    let pressure = segment.to.pressure_or_default();

    if style.shape == BrushShape::Spray {
        spray_segment(buf, from, to, style, pressure, dpr, salt);
        return;
    }

    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < 0.1 {
        // Degenerate segment: a single stamp at the start point.
        let stamp = resolve_stamp(style, pressure, dpr, from.0, from.1, salt);
        apply_stamp(buf, from.0, from.1, &stamp);
        return;
    }

    let steps = distance.ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.0 + dx * t;
        let y = from.1 + dy * t;
        let stamp = resolve_stamp(style, pressure, dpr, x, y, salt.wrapping_add(i));
        apply_stamp(buf, x, y, &stamp);
    }
}

/// Per-shape width/alpha/edge modifiers.  Jittered shapes (chalk, crayon,
/// textured pencil) hash the stamp position instead of consulting an RNG,
/// so replaying a logged stroke reproduces identical pixels.
fn resolve_stamp(style: &StrokeStyle, pressure: f32, dpr: f32, x: f32, y: f32, salt: u32) -> Stamp {
    // Pressure-scaled width, clamped so degenerate sizes still leave a mark.
    let base = (style.brush_size * pressure * dpr).max(1.0);
    let full = (style.brush_size * dpr).max(1.0);
    let color_alpha = style.color[3] as f32 / 255.0;

    let mut stamp = Stamp {
        width: base,
        alpha: style.alpha * color_alpha,
        hardness: 0.85,
        tip: Tip::Circle,
        color: style.color,
    };

    match style.shape {
        BrushShape::Round | BrushShape::Spray | BrushShape::Eraser => {}
        BrushShape::Square => {
            stamp.tip = Tip::Square;
        }
        BrushShape::Marker => {
            // Marker ignores pressure and paints at a fixed translucency.
            stamp.width = full;
            stamp.alpha = 0.7 * color_alpha;
        }
        BrushShape::Calligraphy => {
            stamp.width = base * 0.5;
            stamp.tip = Tip::Nib;
        }
        BrushShape::Chalk => {
            stamp.width = base * (0.8 + 0.4 * jitter(x, y, salt));
            stamp.alpha = (0.6 + 0.3 * jitter(x, y, salt.wrapping_add(1))) * color_alpha;
            stamp.hardness = 0.6;
        }
        BrushShape::Watercolor => {
            // Blurred edge, translucent stroke color.
            stamp.hardness = 0.1;
            stamp.color = color::with_alpha(style.color, 0.5);
            stamp.alpha = style.alpha * (stamp.color[3] as f32 / 255.0);
        }
        BrushShape::OilPaint => {
            stamp.alpha = 0.9 * color_alpha;
            stamp.hardness = 0.6;
        }
        BrushShape::Crayon => {
            stamp.width = base * (0.9 + 0.2 * jitter(x, y, salt));
            stamp.alpha = (0.7 + 0.2 * jitter(x, y, salt.wrapping_add(1))) * color_alpha;
        }
        BrushShape::TexturedPencil => {
            stamp.width = base * 0.6 * (0.85 + 0.3 * jitter(x, y, salt));
            stamp.alpha = (0.5 + 0.3 * jitter(x, y, salt.wrapping_add(1))) * color_alpha;
        }
        BrushShape::Pen => {
            stamp.width = base * 0.4;
            stamp.alpha = color_alpha;
            stamp.hardness = 0.9;
        }
    }
    stamp.width = stamp.width.max(1.0);
    stamp
}

fn apply_stamp(buf: &mut Surface, cx: f32, cy: f32, stamp: &Stamp) {
    let radius = (stamp.width / 2.0).max(0.5);
    let pad = radius + 1.0;
    let min_x = (cx - pad).max(0.0) as u32;
    let min_y = (cy - pad).max(0.0) as u32;
    let max_x = ((cx + pad).max(0.0) as u32).min(buf.width().saturating_sub(1));
    let max_y = ((cy + pad).max(0.0) as u32).min(buf.height().saturating_sub(1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let coverage = match stamp.tip {
                Tip::Circle => {
                    let dist = (dx * dx + dy * dy).sqrt();
                    circle_coverage(dist, radius, stamp.hardness)
                }
                Tip::Square => edge_coverage(dx.abs().max(dy.abs()) - radius),
                Tip::Nib => {
                    // Distance to a 45° bar through the stamp center.
                    let inv_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
                    let along = (dx - dy) * inv_sqrt2;
                    let across = (dx + dy) * inv_sqrt2;
                    let half_thickness = (radius * 0.3).max(0.5);
                    let d = (along.abs() - radius).max(across.abs() - half_thickness);
                    edge_coverage(d)
                }
            };
            let alpha = stamp.alpha * coverage;
            if alpha > 0.003 {
                buf.stamp_max(x, y, stamp.color, alpha);
            }
        }
    }
}

/// Smoothstep falloff from a solid core to the tip edge.  `hardness` sets
/// how much of the radius stays solid; tiny tips get an extended fade so a
/// 1–2 pixel brush still anti-aliases.
fn circle_coverage(dist: f32, radius: f32, hardness: f32) -> f32 {
    let hardness = hardness.clamp(0.0, 0.99);
    let (effective, fade) = if radius < 3.0 {
        let extend = 1.5;
        (radius + extend, extend + radius * (1.0 - hardness))
    } else {
        (radius, (radius * (1.0 - hardness)).max(1.0))
    };
    let solid = effective - fade;

    if dist <= solid {
        1.0
    } else if dist >= effective {
        0.0
    } else {
        let t = (dist - solid) / fade;
        let x = 1.0 - t;
        x * x * (3.0 - 2.0 * x)
    }
}

/// Half-pixel linear anti-aliasing for signed distances to a hard edge.
#[inline]
fn edge_coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

fn spray_segment(
    buf: &mut Surface,
    from: (f32, f32),
    to: (f32, f32),
    style: &StrokeStyle,
    pressure: f32,
    dpr: f32,
    salt: u32,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let distance = (dx * dx + dy * dy).sqrt();
    let radius = ((style.brush_size * pressure * dpr) / 2.0).max(0.5);
    let spacing = SPRAY_SPACING * dpr.max(0.1);

    let bursts = (distance / spacing).floor().max(1.0) as u32;
    let (cos_a, sin_a) = if distance < 0.1 {
        (0.0, 0.0)
    } else {
        (dx / distance, dy / distance)
    };

    for i in 0..bursts {
        let along = i as f32 * spacing;
        let cx = from.0 + cos_a * along;
        let cy = from.1 + sin_a * along;
        for j in 0..SPRAY_DENSITY {
            let s = salt.wrapping_mul(31).wrapping_add(j);
            let angle = jitter(cx, cy, s) * std::f32::consts::TAU;
            let r = jitter(cx, cy, s.wrapping_add(101)) * radius;
            let alpha = jitter(cx, cy, s.wrapping_add(211)) * 0.5;
            let px = cx + angle.cos() * r;
            let py = cy + angle.sin() * r;
            if px >= 0.0 && py >= 0.0 {
                buf.stamp_max(px as u32, py as u32, style.color, alpha);
            }
        }
    }
}

/// Deterministic positional hash in `[0, 1)`.  Seeded only from stamp
/// position and index, never a clock or global counter, so a replay walks
/// the exact same value sequence.
fn jitter(x: f32, y: f32, salt: u32) -> f32 {
    let ix = (x * 100.0) as i32 as u32;
    let iy = (y * 100.0) as i32 as u32;
    let mut h = ix
        .wrapping_mul(374761393)
        .wrapping_add(iy.wrapping_mul(668265263))
        .wrapping_add(salt.wrapping_mul(1013904223));
    h ^= h >> 13;
    h = h.wrapping_mul(1274126177);
    h ^= h >> 16;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn segment(x0: f32, y0: f32, x1: f32, y1: f32) -> Segment {
        Segment {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
        }
    }

    fn style(shape: BrushShape) -> StrokeStyle {
        StrokeStyle {
            color: Rgba([229, 57, 53, 255]),
            brush_size: 8.0,
            shape,
            alpha: 1.0,
            erase: false,
        }
    }

    fn painted_count(buf: &Surface) -> usize {
        buf.as_raw().chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn segment_paints_a_continuous_path() {
        let mut buf = Surface::new(100, 100);
        render_stroke(
            &mut buf,
            &[segment(0.1, 0.5, 0.9, 0.5)],
            &style(BrushShape::Round),
            1.0,
        );
        // Every column along the path midline is covered.
        for x in 12..88 {
            assert!(buf.get_pixel(x, 50)[3] > 0, "gap at column {x}");
        }
    }

    #[test]
    fn zero_length_segment_stamps_once() {
        let mut buf = Surface::new(64, 64);
        render_stroke(
            &mut buf,
            &[segment(0.5, 0.5, 0.5, 0.5)],
            &style(BrushShape::Round),
            1.0,
        );
        assert!(buf.get_pixel(32, 32)[3] > 0);
    }

    #[test]
    fn marker_ignores_pressure() {
        let mut light = Surface::new(100, 100);
        let mut heavy = Surface::new(100, 100);
        let mut seg = segment(0.2, 0.5, 0.8, 0.5);
        seg.to.pressure = Some(0.1);
        render_stroke(&mut light, &[seg.clone()], &style(BrushShape::Marker), 1.0);
        seg.to.pressure = Some(1.0);
        render_stroke(&mut heavy, &[seg], &style(BrushShape::Marker), 1.0);
        assert_eq!(painted_count(&light), painted_count(&heavy));
    }

    #[test]
    fn pen_is_narrower_than_round() {
        let mut round = Surface::new(100, 100);
        let mut pen = Surface::new(100, 100);
        let seg = segment(0.2, 0.5, 0.8, 0.5);
        render_stroke(&mut round, &[seg.clone()], &style(BrushShape::Round), 1.0);
        render_stroke(&mut pen, &[seg], &style(BrushShape::Pen), 1.0);
        assert!(painted_count(&pen) < painted_count(&round));
    }

    #[test]
    fn jittered_shapes_render_deterministically() {
        for shape in [BrushShape::Chalk, BrushShape::Crayon, BrushShape::Spray] {
            let seg = segment(0.1, 0.3, 0.9, 0.7);
            let mut a = Surface::new(120, 120);
            let mut b = Surface::new(120, 120);
            render_stroke(&mut a, &[seg.clone()], &style(shape), 1.0);
            render_stroke(&mut b, &[seg.clone()], &style(shape), 1.0);
            assert_eq!(a.as_raw(), b.as_raw(), "{shape:?} replay diverged");
        }
    }

    #[test]
    fn overlapping_stamps_do_not_darken() {
        let mut buf = Surface::new(100, 100);
        let mut st = style(BrushShape::Marker);
        st.alpha = 1.0;
        render_stroke(
            &mut buf,
            &[
                segment(0.2, 0.5, 0.8, 0.5),
                segment(0.8, 0.5, 0.2, 0.5),
            ],
            &st,
            1.0,
        );
        // Marker paints at fixed 0.7 alpha; retracing must not exceed it.
        let max_alpha = buf
            .as_raw()
            .chunks_exact(4)
            .map(|px| px[3])
            .max()
            .unwrap();
        assert!(max_alpha <= 179, "alpha accumulated to {max_alpha}");
    }
}
