//! The drawing engine: surfaces, settings, input sequencing, and history.
//!
//! A [`Painter`] owns four raster surfaces — the static background, the
//! committed drawing (the replay target of the operation log), the ephemeral
//! stroke preview, and the visible frame — plus the log itself and the
//! outbound event sink.  Pointer input flows through a small gesture state
//! machine; committed operations go through one shared execute path so that
//! local commits, inbound remote operations, and history replays all produce
//! byte-identical pixels.

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ImageEncoder, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::brush::{self, BrushShape, StrokeStyle};
use crate::color;
use crate::events::{DrawEvent, EventSink};
use crate::fill;
use crate::geometry::{Point, ViewTransform, Viewport};
use crate::history::OperationLog;
use crate::op::{self, Operation, Segment, Tool};
use crate::pattern::{self, PatternKind, MIN_PATTERN_SIZE};
use crate::surface::{source_over, Surface};

/// Logical padding around a letterboxed background reference image.
const BACKGROUND_PADDING: f32 = 20.0;

/// Current tool settings, mutated by the shell and snapshotted into each
/// committed operation.  Not part of the log: later settings changes never
/// retroactively alter history.
#[derive(Clone, Debug)]
pub struct Settings {
    pub tool: Tool,
    pub color: String,
    pub brush_size: f32,
    pub brush_shape: BrushShape,
    pub brush_alpha: f32,
    /// When set, Brush/Eraser pointer gestures stamp this pattern instead
    /// of drawing strokes.
    pub pattern: Option<PatternKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: Tool::Brush,
            color: "#000000".to_string(),
            brush_size: 8.0,
            brush_shape: BrushShape::Round,
            brush_alpha: 1.0,
            pattern: None,
        }
    }
}

/// Pointer sample in display space: logical units relative to the canvas
/// element origin, plus device pressure if the hardware reports it.
#[derive(Clone, Copy, Debug)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    pub pressure: Option<f32>,
}

impl PointerInput {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, pressure: None }
    }
}

/// Gesture state between pointer-down and pointer-up.
enum Gesture {
    Idle,
    Panning { last: (f32, f32) },
    PickingColor,
    Filling,
    Drawing { segments: Vec<Segment>, last: Point },
    Stamping { kind: PatternKind, anchor: Point, snapshot: Surface },
}

/// What the frame renderer layers on top of the committed drawing while a
/// stroke is in progress.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Preview {
    None,
    Paint,
    /// The stroke buffer is an erase-strength mask applied subtractively to
    /// the drawing layer, so erasure previews live without committing.
    Erase,
}

/// The raster layers, all `css × dpr` device pixels.
struct Surfaces {
    background: Surface,
    drawing: Surface,
    stroke: Surface,
    frame: Surface,
    dpr: f32,
}

pub struct Painter {
    user_id: String,
    settings: Settings,
    view: ViewTransform,
    viewport: Viewport,
    surfaces: Option<Surfaces>,
    log: OperationLog,
    gesture: Gesture,
    preview: Preview,
    sink: Box<dyn EventSink>,
}

impl Painter {
    /// Create an engine for the given participant.  Every drawing call is a
    /// no-op until [`Painter::set_dimensions`] sizes the canvas.
    pub fn new(user_id: impl Into<String>, sink: Box<dyn EventSink>) -> Self {
        Self {
            user_id: user_id.into(),
            settings: Settings::default(),
            view: ViewTransform::default(),
            viewport: Viewport::new(0.0, 0.0),
            surfaces: None,
            log: OperationLog::new(),
            gesture: Gesture::Idle,
            preview: Preview::None,
            sink,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read access to the history, e.g. for a shell's history panel.
    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    // ---- sizing and background ---------------------------------------------

    /// (Re)initialize every surface for a `width × height` logical canvas at
    /// the given device pixel ratio.  Any in-progress gesture is invalidated
    /// and the log is replayed so the committed surface stays consistent.
    pub fn set_dimensions(&mut self, width: f32, height: f32, dpr: f32) {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let px_w = ((width * dpr).round() as u32).max(1);
        let px_h = ((height * dpr).round() as u32).max(1);

        self.viewport = Viewport::new(width.max(1.0), height.max(1.0));
        self.surfaces = Some(Surfaces {
            background: Surface::filled(px_w, px_h, Rgba([255, 255, 255, 255])),
            drawing: Surface::new(px_w, px_h),
            stroke: Surface::new(px_w, px_h),
            frame: Surface::new(px_w, px_h),
            dpr,
        });
        self.gesture = Gesture::Idle;
        self.preview = Preview::None;
        log::debug!("canvas sized to {px_w}×{px_h}px (dpr {dpr})");
        self.replay();
    }

    /// Paint the reference image onto the background layer: white page,
    /// image letterboxed with a fixed padding.  Drawing operations never
    /// touch this layer.
    pub fn set_background(&mut self, image: &RgbaImage) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            log::warn!("set_background before canvas was sized; ignoring");
            return;
        };
        let bg = &mut surfaces.background;
        bg.fill(Rgba([255, 255, 255, 255]));

        let w = bg.width() as f32;
        let h = bg.height() as f32;
        let pad = BACKGROUND_PADDING * surfaces.dpr;
        let avail_w = w - pad * 2.0;
        let avail_h = h - pad * 2.0;
        if avail_w >= 1.0 && avail_h >= 1.0 && image.width() > 0 && image.height() > 0 {
            let canvas_aspect = avail_w / avail_h;
            let image_aspect = image.width() as f32 / image.height() as f32;
            let (dw, dh) = if canvas_aspect > image_aspect {
                (avail_h * image_aspect, avail_h)
            } else {
                (avail_w, avail_w / image_aspect)
            };
            let off_x = (w - dw) / 2.0;
            let off_y = (h - dh) / 2.0;
            let scaled = imageops::resize(
                image,
                (dw.round() as u32).max(1),
                (dh.round() as u32).max(1),
                FilterType::Triangle,
            );
            for (sx, sy, px) in scaled.enumerate_pixels() {
                if px[3] == 0 {
                    continue;
                }
                let x = off_x as u32 + sx;
                let y = off_y as u32 + sy;
                bg.put_pixel(x, y, source_over(bg.get_pixel(x, y), *px));
            }
        }
        self.render();
    }

    // ---- settings and view --------------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.settings.color = color.into();
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.settings.brush_size = size;
    }

    pub fn set_brush_shape(&mut self, shape: BrushShape) {
        self.settings.brush_shape = shape;
    }

    pub fn set_brush_alpha(&mut self, alpha: f32) {
        self.settings.brush_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_pattern(&mut self, pattern: Option<PatternKind>) {
        self.settings.pattern = pattern;
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
        self.render();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
        self.render();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.view.pan(dx, dy);
        self.render();
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.render();
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    // ---- output -------------------------------------------------------------

    /// The rendered visible frame, or `None` before the canvas is sized.
    pub fn frame(&self) -> Option<&RgbaImage> {
        self.surfaces.as_ref().map(|s| s.frame.as_image())
    }

    /// The committed drawing layer (the replay target of the log).
    pub fn drawing_surface(&self) -> Option<&Surface> {
        self.surfaces.as_ref().map(|s| &s.drawing)
    }

    /// Flatten background + committed drawing and encode as PNG, for the
    /// shell to offer as a download.  The only persisted format.
    pub fn export_composite(&self) -> Result<Vec<u8>, String> {
        let surfaces = self
            .surfaces
            .as_ref()
            .ok_or_else(|| "canvas has not been sized".to_string())?;
        let flat = Surface::composite_flat(&surfaces.background, &surfaces.drawing);
        let mut out = Vec::new();
        let encoder = PngEncoder::new(&mut out);
        encoder
            .write_image(flat.as_raw(), flat.width(), flat.height(), image::ColorType::Rgba8)
            .map_err(|e| format!("PNG encode failed: {e}"))?;
        Ok(out)
    }

    // ---- pointer input ------------------------------------------------------

    pub fn pointer_down(&mut self, input: PointerInput) {
        if self.surfaces.is_none() {
            return;
        }
        let point = self.canvas_point(input);

        match self.settings.tool {
            Tool::Pan => {
                self.gesture = Gesture::Panning { last: (input.x, input.y) };
            }
            Tool::Pipette => {
                self.pick_color(point);
                self.gesture = Gesture::PickingColor;
            }
            Tool::Fill => {
                let op = Operation::Fill {
                    id: op::next_id("fill"),
                    user_id: self.user_id.clone(),
                    point,
                    color: self.settings.color.clone(),
                };
                self.commit_local(op);
                self.gesture = Gesture::Filling;
            }
            Tool::Brush | Tool::Eraser => {
                if let Some(kind) = self.settings.pattern {
                    let snapshot = self.surfaces.as_ref().map(|s| s.drawing.clone());
                    if let Some(snapshot) = snapshot {
                        self.gesture = Gesture::Stamping { kind, anchor: point, snapshot };
                    }
                } else {
                    if let Some(surfaces) = self.surfaces.as_mut() {
                        surfaces.stroke.clear();
                    }
                    self.preview = if self.settings.tool == Tool::Eraser {
                        Preview::Erase
                    } else {
                        Preview::Paint
                    };
                    self.gesture = Gesture::Drawing { segments: Vec::new(), last: point };
                }
            }
        }
    }

    pub fn pointer_move(&mut self, input: PointerInput) {
        match &mut self.gesture {
            Gesture::Idle | Gesture::PickingColor | Gesture::Filling => return,
            Gesture::Panning { last } => {
                let dx = input.x - last.0;
                let dy = input.y - last.1;
                *last = (input.x, input.y);
                self.view.pan(dx, dy);
            }
            Gesture::Drawing { segments, last } => {
                let current = self
                    .view
                    .to_canvas_space((input.x, input.y), self.viewport);
                let current = Point { pressure: input.pressure, ..current };
                segments.push(Segment { from: *last, to: current });
                *last = current;

                // The preview buffer is rebuilt from every accumulated
                // segment so alpha-max coverage stays consistent with what
                // the commit will produce.
                if let Some(surfaces) = self.surfaces.as_mut()
                    && let Some(style) = stroke_style(&self.settings)
                {
                    surfaces.stroke.clear();
                    brush::render_stroke(&mut surfaces.stroke, segments, &style, surfaces.dpr);
                }
            }
            Gesture::Stamping { kind, anchor, snapshot } => {
                let current = self
                    .view
                    .to_canvas_space((input.x, input.y), self.viewport);
                let kind = *kind;
                let anchor = *anchor;
                let size = stamp_size(self.viewport, anchor, current);
                let color = color::parse_hex(&self.settings.color);
                if let Some(surfaces) = self.surfaces.as_mut() {
                    // Snapshot-plus-stamp preview: restore, then stamp at the
                    // live drag size.
                    surfaces.drawing = snapshot.clone();
                    if let Some(color) = color {
                        let center = device_point(&surfaces.drawing, anchor);
                        let size_px = size.max(MIN_PATTERN_SIZE) * surfaces.dpr;
                        pattern::stamp(&mut surfaces.drawing, kind, center, size_px, color);
                    }
                }
            }
        }
        self.render();
    }

    pub fn pointer_up(&mut self, input: PointerInput) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Idle | Gesture::Panning { .. } | Gesture::PickingColor | Gesture::Filling => {}
            Gesture::Drawing { segments, .. } => {
                self.preview = Preview::None;
                if let Some(surfaces) = self.surfaces.as_mut() {
                    surfaces.stroke.clear();
                }
                if segments.is_empty() {
                    self.render();
                } else {
                    // One log entry for the whole stroke, so it undoes
                    // atomically.
                    let op = Operation::Stroke {
                        id: op::next_id("stroke"),
                        user_id: self.user_id.clone(),
                        tool: self.settings.tool,
                        color: self.settings.color.clone(),
                        brush_size: self.settings.brush_size,
                        brush_shape: self.settings.brush_shape,
                        brush_alpha: self.settings.brush_alpha,
                        segments,
                    };
                    self.commit_local(op);
                }
            }
            Gesture::Stamping { kind, anchor, snapshot } => {
                if let Some(surfaces) = self.surfaces.as_mut() {
                    surfaces.drawing = snapshot;
                }
                let current = self
                    .view
                    .to_canvas_space((input.x, input.y), self.viewport);
                let op = Operation::Pattern {
                    id: op::next_id("pattern"),
                    user_id: self.user_id.clone(),
                    center: anchor,
                    size: stamp_size(self.viewport, anchor, current),
                    color: self.settings.color.clone(),
                    kind,
                };
                self.commit_local(op);
            }
        }
    }

    /// A pointer leaving the canvas commits like a pointer-up; in-progress
    /// strokes and stamps are finalized, never discarded.
    pub fn pointer_leave(&mut self, input: PointerInput) {
        self.pointer_up(input);
    }

    // ---- history entry points ----------------------------------------------

    /// Apply an operation received from a peer: same execute-and-log path as
    /// a local commit, minus preview and outward notification.
    pub fn apply(&mut self, op: Operation) {
        if let Operation::Clear = op {
            self.clear(true);
            return;
        }
        let Some(surfaces) = self.surfaces.as_mut() else {
            log::warn!("dropping remote operation before canvas was sized");
            return;
        };
        execute(surfaces, &op);
        self.log.push(op);
        self.render();
    }

    /// Undo the local user's most recent operation.  Returns its id for the
    /// caller's bookkeeping; the outward notification is already emitted.
    pub fn undo(&mut self) -> Option<String> {
        let op = self.log.undo_local(&self.user_id)?;
        self.replay();
        let id = op.id().unwrap_or_default().to_string();
        self.sink.on_draw(DrawEvent::Undo { id: id.clone() });
        Some(id)
    }

    /// Redo the local user's most recently undone operation.
    pub fn redo(&mut self) -> Option<Operation> {
        let op = self.log.redo_local(&self.user_id)?;
        self.replay();
        self.sink.on_draw(DrawEvent::Redo { op: op.clone() });
        Some(op)
    }

    /// A peer undid the named operation (any author's).
    pub fn apply_remote_undo(&mut self, id: &str) {
        if self.log.remove(id).is_some() {
            self.replay();
        } else {
            log::debug!("remote undo for unknown operation {id}");
        }
    }

    /// A peer redid an operation.
    pub fn apply_remote_redo(&mut self, op: Operation) {
        self.log.reinstate(op);
        self.replay();
    }

    /// Empty the log and every redo stack, and blank the drawing surface.
    pub fn clear(&mut self, is_remote: bool) {
        if !is_remote {
            self.sink.on_draw(DrawEvent::Clear);
        }
        self.log.clear();
        self.gesture = Gesture::Idle;
        self.preview = Preview::None;
        if let Some(surfaces) = self.surfaces.as_mut() {
            surfaces.drawing.clear();
            surfaces.stroke.clear();
        }
        self.render();
    }

    // ---- internals ----------------------------------------------------------

    fn canvas_point(&self, input: PointerInput) -> Point {
        let point = self.view.to_canvas_space((input.x, input.y), self.viewport);
        Point { pressure: input.pressure, ..point }
    }

    fn commit_local(&mut self, op: Operation) {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        execute(surfaces, &op);
        self.log.push(op.clone());
        self.sink.on_draw(DrawEvent::Operation(op));
        self.render();
    }

    /// Full replay: clear the committed surface and re-execute the whole log
    /// in order.  O(log length), deliberately — it guarantees the surface is
    /// always byte-consistent with the log without per-operation undraw.
    fn replay(&mut self) {
        if let Some(surfaces) = self.surfaces.as_mut() {
            surfaces.drawing.clear();
            for op in self.log.iter() {
                execute(surfaces, op);
            }
        }
        self.render();
    }

    fn pick_color(&mut self, point: Point) {
        let Some(surfaces) = self.surfaces.as_ref() else {
            return;
        };
        let composite = Surface::composite_flat(&surfaces.background, &surfaces.drawing);
        let (px, py) = device_point(&surfaces.drawing, point);
        let sampled = if px >= 0.0
            && py >= 0.0
            && (px as u32) < composite.width()
            && (py as u32) < composite.height()
        {
            *composite.get_pixel(px as u32, py as u32)
        } else {
            Rgba([0, 0, 0, 0])
        };
        self.sink.on_color_pick(color::css_rgba(sampled));
    }

    /// Rebuild the visible frame: clear, then sample background and drawing
    /// (and the stroke preview while one is active) through the inverse
    /// pan/zoom transform.
    fn render(&mut self) {
        let zoom = self.view.zoom();
        let (off_x, off_y) = self.view.offset();
        let preview = self.preview;
        let Some(surfaces) = self.surfaces.as_mut() else {
            return;
        };
        let dpr = surfaces.dpr;
        let Surfaces { background, drawing, stroke, frame, .. } = surfaces;
        let background: &Surface = background;
        let drawing: &Surface = drawing;
        let stroke: &Surface = stroke;

        let src_w = drawing.width() as f32;
        let src_h = drawing.height() as f32;
        let off_x = off_x * dpr;
        let off_y = off_y * dpr;
        let inv_zoom = 1.0 / zoom;

        let frame_w = frame.width() as usize;
        let row_bytes = frame_w * 4;
        frame
            .as_raw_mut()
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(row, row_buf)| {
                let sy = ((row as f32 + 0.5) - off_y) * inv_zoom;
                if sy < 0.0 || sy >= src_h {
                    row_buf.fill(0);
                    return;
                }
                let sy = sy as u32;
                for col in 0..frame_w {
                    let o = col * 4;
                    let sx = ((col as f32 + 0.5) - off_x) * inv_zoom;
                    if sx < 0.0 || sx >= src_w {
                        row_buf[o..o + 4].fill(0);
                        continue;
                    }
                    let sx = sx as u32;

                    let mut top = drawing.get_pixel(sx, sy);
                    if preview == Preview::Erase {
                        let strength = stroke.get_pixel(sx, sy)[3];
                        if strength > 0 {
                            let remaining =
                                top[3] as f32 * (1.0 - strength as f32 / 255.0);
                            top[3] = remaining.round() as u8;
                        }
                    }
                    let mut out = source_over(background.get_pixel(sx, sy), top);
                    if preview == Preview::Paint {
                        out = source_over(out, stroke.get_pixel(sx, sy));
                    }
                    row_buf[o] = out[0];
                    row_buf[o + 1] = out[1];
                    row_buf[o + 2] = out[2];
                    row_buf[o + 3] = out[3];
                }
            });
    }
}

/// Stamp size from the drag distance: twice the anchor→cursor distance in
/// logical units.
fn stamp_size(viewport: Viewport, anchor: Point, current: Point) -> f32 {
    let dx = (current.x - anchor.x) * viewport.width;
    let dy = (current.y - anchor.y) * viewport.height;
    (dx * dx + dy * dy).sqrt() * 2.0
}

/// Normalized canvas point → device pixel coordinates on a surface.
fn device_point(surface: &Surface, point: Point) -> (f32, f32) {
    (
        point.x * surface.width() as f32,
        point.y * surface.height() as f32,
    )
}

/// Resolve a settings snapshot (live or logged) into a renderable style.
/// Returns `None` when the color cannot be parsed — the stroke silently
/// renders nothing, matching the fill's behavior on malformed colors.  The
/// eraser never looks at the color, so it always resolves.
fn stroke_style_parts(
    tool: Tool,
    color: &str,
    brush_size: f32,
    brush_shape: BrushShape,
    brush_alpha: f32,
) -> Option<StrokeStyle> {
    let erase = tool == Tool::Eraser;
    let color = if erase {
        Rgba([0, 0, 0, 255])
    } else {
        match color::parse_hex(color) {
            Some(c) => c,
            None => {
                log::debug!("unparseable stroke color {color:?}; skipping");
                return None;
            }
        }
    };
    Some(StrokeStyle {
        color,
        brush_size,
        shape: brush_shape,
        alpha: brush_alpha.clamp(0.0, 1.0),
        erase,
    })
}

fn stroke_style(settings: &Settings) -> Option<StrokeStyle> {
    stroke_style_parts(
        settings.tool,
        &settings.color,
        settings.brush_size,
        settings.brush_shape,
        settings.brush_alpha,
    )
}

/// Execute one operation's raster effect on the committed drawing surface.
/// This is the single path shared by local commits, remote applies, and
/// replays — idempotent only when replayed in log order from a clean
/// surface.
fn execute(surfaces: &mut Surfaces, op: &Operation) {
    match op {
        Operation::Stroke {
            tool,
            color,
            brush_size,
            brush_shape,
            brush_alpha,
            segments,
            ..
        } => {
            let Some(style) =
                stroke_style_parts(*tool, color, *brush_size, *brush_shape, *brush_alpha)
            else {
                return;
            };
            let mut buf = Surface::new(surfaces.drawing.width(), surfaces.drawing.height());
            brush::render_stroke(&mut buf, segments, &style, surfaces.dpr);
            if style.erase {
                surfaces.drawing.erase_by_mask(&buf);
            } else {
                surfaces.drawing.blend_over(&buf);
            }
        }
        Operation::Fill { point, color, .. } => {
            let Some(target) = color::parse_hex(color) else {
                log::debug!("unparseable fill color {color:?}; skipping");
                return;
            };
            let composite = Surface::composite_flat(&surfaces.background, &surfaces.drawing);
            let (px, py) = device_point(&surfaces.drawing, *point);
            if px < 0.0 || py < 0.0 {
                return;
            }
            fill::flood_fill(&mut surfaces.drawing, &composite, (px as u32, py as u32), target);
        }
        Operation::Pattern { center, size, color, kind, .. } => {
            let Some(fill_color) = color::parse_hex(color) else {
                log::debug!("unparseable pattern color {color:?}; skipping");
                return;
            };
            let center_px = device_point(&surfaces.drawing, *center);
            let size_px = size.max(MIN_PATTERN_SIZE) * surfaces.dpr;
            pattern::stamp(&mut surfaces.drawing, *kind, center_px, size_px, fill_color);
        }
        // Clear is routed by Painter::apply; it never reaches the log.
        Operation::Clear => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    #[test]
    fn unsized_painter_ignores_everything() {
        let mut painter = Painter::new("ada", Box::new(NullSink));
        painter.pointer_down(PointerInput::new(5.0, 5.0));
        painter.pointer_move(PointerInput::new(6.0, 6.0));
        painter.pointer_up(PointerInput::new(6.0, 6.0));
        painter.apply(Operation::Fill {
            id: "fill-1".into(),
            user_id: "bob".into(),
            point: Point::new(0.5, 0.5),
            color: "#FF0000".into(),
        });
        assert!(painter.log().is_empty());
        assert!(painter.frame().is_none());
        assert!(painter.export_composite().is_err());
    }

    #[test]
    fn malformed_remote_color_is_logged_but_harmless() {
        let mut painter = Painter::new("ada", Box::new(NullSink));
        painter.set_dimensions(32.0, 32.0, 1.0);
        painter.apply(Operation::Fill {
            id: "fill-1".into(),
            user_id: "bob".into(),
            point: Point::new(0.5, 0.5),
            color: "chartreuse".into(),
        });
        // The operation is recorded (it has a valid shape) but paints nothing.
        assert_eq!(painter.log().len(), 1);
        let drawing = painter.drawing_surface().unwrap();
        assert!(drawing.as_raw().chunks_exact(4).all(|px| px[3] == 0));
    }
}
