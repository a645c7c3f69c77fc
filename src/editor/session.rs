//! Interaction state for one editing session: tool mode, in-progress drag and
//! selection, and the transitions that turn pointer input into redactions.

use crate::geometry::{Color, Point, Rect};

use super::command::CommandEffect;
use super::geometry::{normalize_drag_box, top_shape_id_at_point, MIN_SHAPE_EXTENT};
use super::shapes::{Shape, ShapeId, ShapeList, ShapeStyle};
use super::tools::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    anchor: Point,
    current_rect: Rect,
}

impl Drag {
    fn start(anchor: Point) -> Self {
        Self {
            anchor,
            current_rect: Rect::at(anchor),
        }
    }

    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    pub const fn current_rect(&self) -> Rect {
        self.current_rect
    }
}

/// The uncommitted redaction shown while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewShape {
    pub rect: Rect,
    pub style: ShapeStyle,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    shapes: ShapeList,
    active_tool: ToolKind,
    pending_fill_color: Color,
    selected_id: Option<ShapeId>,
    drag: Option<Drag>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl EditorSession {
    pub fn new(pending_fill_color: Color) -> Self {
        Self {
            shapes: ShapeList::new(),
            active_tool: ToolKind::Blur,
            pending_fill_color,
            selected_id: None,
            drag: None,
        }
    }

    pub fn shapes(&self) -> &ShapeList {
        &self.shapes
    }

    pub const fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub const fn pending_fill_color(&self) -> Color {
        self.pending_fill_color
    }

    pub const fn selected_id(&self) -> Option<ShapeId> {
        self.selected_id
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected_id.and_then(|id| self.shapes.get(id))
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn preview_shape(&self) -> Option<PreviewShape> {
        let drag = self.drag.as_ref()?;
        let kind = self.active_tool.shape_kind()?;
        Some(PreviewShape {
            rect: drag.current_rect,
            style: ShapeStyle::for_kind(kind, self.pending_fill_color),
        })
    }

    pub fn pointer_down(&mut self, point: Point) -> CommandEffect {
        if self.active_tool.draws() {
            self.selected_id = None;
            self.drag = Some(Drag::start(point));
            return CommandEffect::DragStarted;
        }

        self.selected_id = top_shape_id_at_point(self.shapes.as_slice(), point);
        CommandEffect::Selected(self.selected_id)
    }

    pub fn pointer_move(&mut self, point: Point) -> CommandEffect {
        let Some(drag) = self.drag.as_mut() else {
            return CommandEffect::Unchanged;
        };
        drag.current_rect = normalize_drag_box(drag.anchor, point);
        CommandEffect::DragUpdated
    }

    /// Ends a drag on pointer-up or when a held pointer leaves the surface.
    pub fn pointer_release(&mut self) -> CommandEffect {
        let Some(drag) = self.drag.take() else {
            return CommandEffect::Unchanged;
        };
        let Some(kind) = self.active_tool.shape_kind() else {
            return CommandEffect::Discarded;
        };
        if !drag.current_rect.exceeds(MIN_SHAPE_EXTENT) {
            tracing::debug!(rect = ?drag.current_rect, "discarding sub-threshold redaction");
            return CommandEffect::Discarded;
        }

        let style = ShapeStyle::for_kind(kind, self.pending_fill_color);
        let id = self.shapes.add(drag.current_rect, style);
        tracing::debug!(%id, rect = ?drag.current_rect, ?kind, "committed redaction");
        CommandEffect::Committed(id)
    }

    pub fn delete_selected(&mut self) -> CommandEffect {
        let Some(id) = self.selected_id.take() else {
            return CommandEffect::Unchanged;
        };
        match self.shapes.remove_by_id(id) {
            Some(_) => CommandEffect::Removed(id),
            None => CommandEffect::Selected(None),
        }
    }

    /// Removes the most recent redaction and always drops the selection.
    pub fn undo(&mut self) -> CommandEffect {
        let had_selection = self.selected_id.take().is_some();
        match self.shapes.remove_last() {
            Some(shape) => CommandEffect::Removed(shape.id()),
            None if had_selection => CommandEffect::Selected(None),
            None => CommandEffect::Unchanged,
        }
    }

    pub fn reset(&mut self) -> CommandEffect {
        let had_selection = self.selected_id.take().is_some();
        match self.shapes.clear() {
            0 if !had_selection => CommandEffect::Unchanged,
            removed => CommandEffect::Cleared(removed),
        }
    }

    /// Updates the pending fill and live-recolors the selection when it is a
    /// solid redaction.
    pub fn set_color(&mut self, color: Color) -> CommandEffect {
        self.pending_fill_color = color;

        let recolored = self.selected_id.and_then(|id| {
            let shape = self.shapes.get_mut(id)?;
            match &mut shape.style {
                ShapeStyle::Solid { fill } => {
                    *fill = color;
                    Some(id)
                }
                ShapeStyle::Blur => None,
            }
        });
        CommandEffect::ColorChanged { recolored }
    }

    pub fn set_tool(&mut self, tool: ToolKind) -> CommandEffect {
        self.active_tool = tool;
        let abandoned_drag = self.drag.take().is_some();
        if abandoned_drag {
            tracing::debug!(?tool, "tool change abandoned in-progress drag");
        }
        CommandEffect::ToolChanged { abandoned_drag }
    }
}
