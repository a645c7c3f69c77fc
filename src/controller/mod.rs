//! Owns one editing session over a loaded image: maps display input into
//! image space, applies it, then re-renders.

use image::RgbaImage;

use crate::editor::{CommandEffect, DisplayMapping, EditorCommand, EditorSession};
use crate::geometry::{Color, Point};
use crate::render::{render_export, render_interactive, BlurCache, RenderSource};
use crate::source::BaseImage;
use crate::storage::{ExportSink, StorageResult};

#[derive(Debug)]
pub struct EditorController {
    base: BaseImage,
    blur: BlurCache,
    session: EditorSession,
    mapping: DisplayMapping,
    frame: RgbaImage,
}

impl EditorController {
    pub fn load(base: BaseImage, default_fill_color: Color) -> Self {
        let session = EditorSession::new(default_fill_color);
        let mapping = DisplayMapping::intrinsic(base.size());
        let frame = base.pixels().clone();
        tracing::debug!(size = ?base.size(), fill = %default_fill_color, "editor session loaded");
        Self {
            base,
            blur: BlurCache::new(),
            session,
            mapping,
            frame,
        }
    }

    pub fn base(&self) -> &BaseImage {
        &self.base
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn mapping(&self) -> &DisplayMapping {
        &self.mapping
    }

    /// Interactive frame reflecting the state after the last command.
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.mapping.resize(width, height);
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> CommandEffect {
        let point = command
            .pointer_position()
            .map(|display| self.mapping.to_image(display))
            .unwrap_or_default();

        let effect = self.apply(command, point);
        tracing::debug!(?command, ?effect, "dispatched editor command");

        if effect.needs_render() {
            self.frame = render_interactive(self.source(), &self.session);
        }
        effect
    }

    fn apply(&mut self, command: EditorCommand, point: Point) -> CommandEffect {
        match command {
            EditorCommand::PointerDown { .. } => self.session.pointer_down(point),
            EditorCommand::PointerMove { .. } => self.session.pointer_move(point),
            EditorCommand::PointerUp { .. } | EditorCommand::PointerLeave { .. } => {
                self.session.pointer_release()
            }
            EditorCommand::Delete => self.session.delete_selected(),
            EditorCommand::Undo => self.session.undo(),
            EditorCommand::Reset => self.session.reset(),
            EditorCommand::SetTool { tool } => self.session.set_tool(tool),
            EditorCommand::SetColor { color } => self.session.set_color(color),
            EditorCommand::ResizeDisplay { width, height } => {
                self.set_display_size(width, height);
                CommandEffect::DisplayResized
            }
        }
    }

    fn source(&self) -> RenderSource<'_> {
        RenderSource {
            base: self.base.pixels(),
            blur: &self.blur,
        }
    }

    /// Flattened frame with committed redactions only. Leaves the session
    /// untouched.
    pub fn export_frame(&self) -> RgbaImage {
        render_export(self.source(), self.session.shapes().as_slice())
    }

    pub fn export_to(&self, sink: &mut dyn ExportSink) -> StorageResult<()> {
        let frame = self.export_frame();
        tracing::info!(
            shapes = self.session.shapes().len(),
            width = frame.width(),
            height = frame.height(),
            "exporting redacted frame"
        );
        sink.write_png(&frame)
    }
}
