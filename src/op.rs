//! The operation model — the unit of the shared history.
//!
//! Operations are what peers exchange, so the serde shape here *is* the wire
//! format: internally tagged on `"type"`, camelCase fields.  An operation
//! carries its own snapshot of the settings that produced it; later settings
//! changes never retroactively alter history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brush::BrushShape;
use crate::geometry::Point;
use crate::pattern::PatternKind;

/// Active tool.  Only Brush/Eraser/Fill produce operations; Pipette and Pan
/// never touch the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tool {
    Brush,
    Fill,
    Eraser,
    Pipette,
    Pan,
}

/// One pointer-move slice of a stroke, in normalized canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// An atomic, loggable drawing action.
///
/// `id` is unique across the log; `user_id` names the authoring participant
/// and is never reassigned.  `Clear` exists so the transport can decode
/// every peer message into one type, but it is routed to
/// [`crate::painter::Painter::clear`] rather than stored in the log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    #[serde(rename_all = "camelCase")]
    Stroke {
        id: String,
        user_id: String,
        tool: Tool,
        color: String,
        brush_size: f32,
        brush_shape: BrushShape,
        brush_alpha: f32,
        segments: Vec<Segment>,
    },
    #[serde(rename_all = "camelCase")]
    Fill {
        id: String,
        user_id: String,
        point: Point,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    Pattern {
        id: String,
        user_id: String,
        center: Point,
        size: f32,
        color: String,
        #[serde(rename = "patternKind")]
        kind: PatternKind,
    },
    Clear,
}

impl Operation {
    /// The operation's id; `Clear` has none.
    pub fn id(&self) -> Option<&str> {
        match self {
            Operation::Stroke { id, .. }
            | Operation::Fill { id, .. }
            | Operation::Pattern { id, .. } => Some(id),
            Operation::Clear => None,
        }
    }

    /// The authoring participant; `Clear` has none.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Operation::Stroke { user_id, .. }
            | Operation::Fill { user_id, .. }
            | Operation::Pattern { user_id, .. } => Some(user_id),
            Operation::Clear => None,
        }
    }
}

/// Generate a type-prefixed, collision-resistant operation id,
/// e.g. `stroke-67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub fn next_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
