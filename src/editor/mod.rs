//! Redaction editing model: shapes, tools, hit-testing and the interaction
//! state machine.

pub mod command;
pub mod geometry;
pub mod session;
pub mod shapes;
pub mod tools;

pub use command::{CommandEffect, EditorCommand};
pub use geometry::{normalize_drag_box, top_shape_id_at_point, DisplayMapping, MIN_SHAPE_EXTENT};
pub use session::{Drag, EditorSession, PreviewShape};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeList, ShapeStyle};
pub use tools::ToolKind;
