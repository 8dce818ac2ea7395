use serde::{Deserialize, Serialize};

/// Lower clamp for the view zoom factor.  The transform divides by zoom, so
/// it must never reach zero or go negative.
pub const MIN_ZOOM: f32 = 0.1;

/// Multiplier applied per zoom step.
pub const ZOOM_STEP: f32 = 1.2;

/// A point in normalized canvas space: `x` and `y` are in `[0, 1]` relative
/// to the canvas extents.  `pressure` comes straight from the pointer device
/// and is absent for mice; consumers fall back to [`Point::pressure_or_default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f32>,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, pressure: None }
    }

    pub fn with_pressure(x: f32, y: f32, pressure: f32) -> Self {
        Self { x, y, pressure: Some(pressure) }
    }

    /// Pointer pressure, defaulting to 0.5 when the device reports none.
    pub fn pressure_or_default(&self) -> f32 {
        self.pressure.unwrap_or(0.5)
    }
}

/// Logical (CSS-unit) size of the on-screen canvas element.  Device pixel
/// ratio is a surface concern; the view transform works in logical units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pan/zoom state of the visible frame.
///
/// Panning translates in display space before the zoom is undone, so the
/// display→canvas mapping is `(display - offset) / zoom`, then normalized by
/// the viewport extents.  [`ViewTransform::to_display_space`] is the exact
/// inverse (round-trips within floating-point epsilon).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    offset: (f32, f32),
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: 1.0, offset: (0.0, 0.0) }
    }
}

impl ViewTransform {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Accumulate a relative pointer delta (display-space units).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map a display-space coordinate (relative to the canvas element origin)
    /// to normalized canvas space under the current pan/zoom.
    pub fn to_canvas_space(&self, display: (f32, f32), viewport: Viewport) -> Point {
        let x = (display.0 - self.offset.0) / self.zoom;
        let y = (display.1 - self.offset.1) / self.zoom;
        Point::new(x / viewport.width, y / viewport.height)
    }

    /// Inverse of [`ViewTransform::to_canvas_space`].
    pub fn to_display_space(&self, point: Point, viewport: Viewport) -> (f32, f32) {
        (
            point.x * viewport.width * self.zoom + self.offset.0,
            point.y * viewport.height * self.zoom + self.offset.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_canvas_round_trip() {
        let mut view = ViewTransform::default();
        view.zoom_in();
        view.zoom_in();
        view.pan(37.5, -12.25);
        let viewport = Viewport::new(800.0, 600.0);

        let display = (123.0, 456.0);
        let point = view.to_canvas_space(display, viewport);
        let back = view.to_display_space(point, viewport);
        assert!((back.0 - display.0).abs() < 1e-3);
        assert!((back.1 - display.1).abs() < 1e-3);
    }

    #[test]
    fn identity_transform_normalizes_by_viewport() {
        let view = ViewTransform::default();
        let viewport = Viewport::new(200.0, 100.0);
        let p = view.to_canvas_space((100.0, 50.0), viewport);
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let mut view = ViewTransform::default();
        for _ in 0..200 {
            view.zoom_out();
        }
        assert!(view.zoom() >= MIN_ZOOM);
    }

    #[test]
    fn pressure_defaults_to_half() {
        assert_eq!(Point::new(0.1, 0.2).pressure_or_default(), 0.5);
        assert_eq!(Point::with_pressure(0.1, 0.2, 0.9).pressure_or_default(), 0.9);
    }
}
