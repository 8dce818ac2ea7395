//! Outbound notifications.
//!
//! The engine never talks to a socket.  Everything a peer needs to mirror a
//! local action is handed to a caller-supplied [`EventSink`] as an explicit
//! [`DrawEvent`] value; the transport collaborator frames and serializes it
//! (operations already carry their serde wire shape).  There is no global
//! emitter — the sink is injected at construction.

use crate::op::Operation;

/// One outbound notification to the broadcast channel.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawEvent {
    /// A locally committed stroke/fill/pattern — the payload peers replay.
    Operation(Operation),
    /// The local user cleared the whole canvas.
    Clear,
    /// The local user undid the operation with this id.
    Undo { id: String },
    /// The local user redid this operation; peers need the full payload
    /// because they may have discarded it.
    Redo { op: Operation },
}

/// Receiver for everything the engine reports outward.
pub trait EventSink {
    /// Called on every locally committed or history-changing action.
    fn on_draw(&mut self, event: DrawEvent);

    /// Pipette result, e.g. `rgba(229, 57, 53, 1)`.  Not a broadcast —
    /// the shell feeds it back into the local color picker.
    fn on_color_pick(&mut self, _color: String) {}
}

/// Sink that drops everything; handy for exports, tooling, and tests that
/// don't care about replication.
pub struct NullSink;

impl EventSink for NullSink {
    fn on_draw(&mut self, _event: DrawEvent) {}
}
