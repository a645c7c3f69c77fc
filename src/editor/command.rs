use serde::Deserialize;

use crate::geometry::{Color, Point};

use super::shapes::ShapeId;
use super::tools::ToolKind;

/// Discrete input accepted by the editor. Pointer coordinates are in display
/// surface space; the controller maps them into base-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorCommand {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave { x: f64, y: f64 },
    Delete,
    Undo,
    /// Clears every redaction. Confirmation is obtained before dispatch.
    Reset,
    SetTool { tool: ToolKind },
    SetColor { color: Color },
    ResizeDisplay { width: f64, height: f64 },
}

impl EditorCommand {
    pub const fn pointer_position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::PointerLeave { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

/// Observable outcome of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEffect {
    Selected(Option<ShapeId>),
    DragStarted,
    DragUpdated,
    Committed(ShapeId),
    Discarded,
    Removed(ShapeId),
    Cleared(usize),
    ColorChanged { recolored: Option<ShapeId> },
    ToolChanged { abandoned_drag: bool },
    DisplayResized,
    Unchanged,
}

impl CommandEffect {
    /// Whether the interactive frame must be recomputed.
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::Unchanged | Self::DisplayResized)
    }
}
