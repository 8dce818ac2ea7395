//! ColorCrowd — the drawing/history engine of a multi-user coloring canvas.
//!
//! Strokes, flood fills, and pattern stamps are applied to a layered raster
//! canvas and replicated to other participants through an external broadcast
//! channel.  This crate owns the canvas layers, the operation log, per-user
//! undo/redo, and the raster algorithms; the UI shell, the transport, and
//! asset loading are collaborators that talk to [`painter::Painter`].
//!
//! Everything runs synchronously on the caller's thread: operations execute
//! to completion in the order pointer events and peer messages arrive, and
//! the committed drawing surface is always exactly the replay of the
//! operation log from an empty surface.

pub mod brush;
pub mod color;
pub mod events;
pub mod fill;
pub mod geometry;
pub mod history;
pub mod op;
pub mod painter;
pub mod pattern;
pub mod surface;

pub use brush::BrushShape;
pub use events::{DrawEvent, EventSink, NullSink};
pub use geometry::{Point, ViewTransform, Viewport};
pub use history::OperationLog;
pub use op::{Operation, Segment, Tool};
pub use painter::{Painter, PointerInput, Settings};
pub use pattern::PatternKind;
pub use surface::Surface;
