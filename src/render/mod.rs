//! Two-pass render pipeline: the interactive frame with editing chrome and the
//! flattened export frame.

mod image_processing;
mod raster;

use image::{Rgba, RgbaImage};

use crate::editor::{EditorSession, PreviewShape, Shape, ShapeId, ShapeStyle};
use crate::geometry::{Color, Point, Rect};

pub use image_processing::{BlurCache, BLUR_SIGMA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Redactions plus selection outline, handles and the drag preview.
    Interactive,
    /// Committed redactions only.
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPalette {
    pub selected_outline: Color,
    pub handle_fill: Color,
    pub blur_preview_stroke: Color,
}

impl Default for SelectionPalette {
    fn default() -> Self {
        Self {
            selected_outline: Color::new(0x3B, 0x82, 0xF6),
            handle_fill: Color::new(0x3B, 0x82, 0xF6),
            blur_preview_stroke: Color::new(0xF4, 0x3F, 0x5E),
        }
    }
}

const SELECTION_OUTLINE_WIDTH: f64 = 3.0;
const HANDLE_SIZE: f64 = 8.0;
const PREVIEW_DASH: f64 = 5.0;

/// Pixels the pipeline samples from. `blur` must belong to `base`.
#[derive(Clone, Copy)]
pub struct RenderSource<'a> {
    pub base: &'a RgbaImage,
    pub blur: &'a BlurCache,
}

/// Editing state visible to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a> {
    pub shapes: &'a [Shape],
    pub preview: Option<PreviewShape>,
    pub selected_id: Option<ShapeId>,
    pub palette: SelectionPalette,
}

impl<'a> RenderScene<'a> {
    pub fn from_session(session: &'a EditorSession) -> Self {
        Self {
            shapes: session.shapes().as_slice(),
            preview: session.preview_shape(),
            selected_id: session.selected_id(),
            palette: SelectionPalette::default(),
        }
    }

    /// Scene holding only committed redactions.
    pub fn committed(shapes: &'a [Shape]) -> Self {
        Self {
            shapes,
            preview: None,
            selected_id: None,
            palette: SelectionPalette::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PaintEntry<'a> {
    Committed(&'a Shape),
    Preview(PreviewShape),
}

impl PaintEntry<'_> {
    fn rect(&self) -> Rect {
        match self {
            Self::Committed(shape) => shape.rect,
            Self::Preview(preview) => preview.rect,
        }
    }

    fn style(&self) -> ShapeStyle {
        match self {
            Self::Committed(shape) => shape.style,
            Self::Preview(preview) => preview.style,
        }
    }

    fn id(&self) -> Option<ShapeId> {
        match self {
            Self::Committed(shape) => Some(shape.id()),
            Self::Preview(_) => None,
        }
    }
}

fn paint_list<'a>(
    scene: &RenderScene<'a>,
    mode: RenderMode,
) -> impl Iterator<Item = PaintEntry<'a>> + 'a {
    let preview = match mode {
        RenderMode::Interactive => scene.preview,
        RenderMode::Export => None,
    };
    let shapes: &'a [Shape] = scene.shapes;
    shapes
        .iter()
        .map(PaintEntry::Committed)
        .chain(preview.map(PaintEntry::Preview))
}

pub fn render_frame(source: RenderSource<'_>, scene: &RenderScene<'_>, mode: RenderMode) -> RgbaImage {
    let mut canvas = source.base.clone();
    let selected_id = match mode {
        RenderMode::Interactive => scene.selected_id,
        RenderMode::Export => None,
    };

    for entry in paint_list(scene, mode) {
        let rect = entry.rect();
        match entry.style() {
            ShapeStyle::Solid { fill } => raster::fill_rect(&mut canvas, rect, fill.to_rgba()),
            ShapeStyle::Blur => {
                raster::copy_rect_from(&mut canvas, source.blur.blurred(source.base), rect);
            }
        }

        if selected_id.is_some() && entry.id() == selected_id {
            draw_selection(&mut canvas, rect, scene.palette);
        }
    }

    if mode == RenderMode::Interactive {
        if let Some(preview) = scene.preview {
            let stroke = match preview.style {
                ShapeStyle::Blur => scene.palette.blur_preview_stroke,
                ShapeStyle::Solid { fill } => fill,
            };
            raster::dashed_outline(&mut canvas, preview.rect, PREVIEW_DASH, stroke.to_rgba());
        }
    }

    canvas
}

pub fn render_interactive(source: RenderSource<'_>, session: &EditorSession) -> RgbaImage {
    render_frame(source, &RenderScene::from_session(session), RenderMode::Interactive)
}

/// Flattened frame with redactions burned in. Reads only the committed
/// shapes, whatever the selection or drag state.
pub fn render_export(source: RenderSource<'_>, shapes: &[Shape]) -> RgbaImage {
    render_frame(source, &RenderScene::committed(shapes), RenderMode::Export)
}

fn draw_selection(canvas: &mut RgbaImage, rect: Rect, palette: SelectionPalette) {
    raster::stroke_rect(
        canvas,
        rect,
        SELECTION_OUTLINE_WIDTH,
        palette.selected_outline.to_rgba(),
    );
    let half = HANDLE_SIZE / 2.0;
    let handle_fill: Rgba<u8> = palette.handle_fill.to_rgba();
    for Point { x, y } in rect.corners() {
        raster::fill_rect(
            canvas,
            Rect::new(x - half, y - half, HANDLE_SIZE, HANDLE_SIZE),
            handle_fill,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{ShapeList, ToolKind};

    const RED: Color = Color::new(0xFF, 0, 0);

    fn checkerboard(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn drag(session: &mut EditorSession, from: (f64, f64), to: (f64, f64)) {
        session.pointer_down(Point::new(from.0, from.1));
        session.pointer_move(Point::new(to.0, to.1));
        session.pointer_release();
    }

    #[test]
    fn empty_scene_renders_untouched_base_in_both_modes() {
        let base = checkerboard(32);
        let blur = BlurCache::new();
        let source = RenderSource {
            base: &base,
            blur: &blur,
        };
        let session = EditorSession::default();

        assert_eq!(render_interactive(source, &session), base);
        assert_eq!(render_export(source, &[]), base);
        assert!(!blur.is_ready());
    }

    #[test]
    fn solid_redaction_fills_its_rectangle_only() {
        let base = checkerboard(64);
        let blur = BlurCache::new();
        let mut shapes = ShapeList::new();
        shapes.add(Rect::new(10.0, 10.0, 30.0, 30.0), ShapeStyle::Solid { fill: RED });

        let frame = render_export(
            RenderSource {
                base: &base,
                blur: &blur,
            },
            shapes.as_slice(),
        );
        assert_eq!(*frame.get_pixel(10, 10), RED.to_rgba());
        assert_eq!(*frame.get_pixel(39, 39), RED.to_rgba());
        assert_eq!(frame.get_pixel(40, 40), base.get_pixel(40, 40));
        assert_eq!(frame.get_pixel(5, 5), base.get_pixel(5, 5));
    }

    #[test]
    fn blur_samples_base_image_not_earlier_redactions() {
        let base = checkerboard(64);
        let blur = BlurCache::new();
        let mut shapes = ShapeList::new();
        shapes.add(Rect::new(0.0, 0.0, 40.0, 40.0), ShapeStyle::Solid { fill: RED });
        shapes.add(Rect::new(20.0, 20.0, 30.0, 30.0), ShapeStyle::Blur);

        let source = RenderSource {
            base: &base,
            blur: &blur,
        };
        let frame = render_export(source, shapes.as_slice());
        let blurred = blur.blurred(&base);

        assert_eq!(frame.get_pixel(25, 25), blurred.get_pixel(25, 25));
        assert_eq!(frame.get_pixel(45, 45), blurred.get_pixel(45, 45));
        assert_eq!(*frame.get_pixel(10, 10), RED.to_rgba());
        assert_ne!(blurred.get_pixel(25, 25), base.get_pixel(25, 25));
    }

    #[test]
    fn shapes_beyond_surface_bounds_are_clipped() {
        let base = checkerboard(16);
        let blur = BlurCache::new();
        let mut shapes = ShapeList::new();
        shapes.add(Rect::new(-50.0, -50.0, 1e12, 1e12), ShapeStyle::Solid { fill: RED });
        shapes.add(Rect::new(100.0, 100.0, 20.0, 20.0), ShapeStyle::Blur);

        let frame = render_export(
            RenderSource {
                base: &base,
                blur: &blur,
            },
            shapes.as_slice(),
        );
        assert_eq!(frame.dimensions(), (16, 16));
        assert!(frame.pixels().all(|pixel| *pixel == RED.to_rgba()));
    }

    #[test]
    fn interactive_frame_outlines_selection_with_corner_handles() {
        let base = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let blur = BlurCache::new();
        let mut session = EditorSession::new(RED);
        session.set_tool(ToolKind::Solid);
        drag(&mut session, (10.0, 10.0), (40.0, 40.0));
        session.set_tool(ToolKind::Select);
        session.pointer_down(Point::new(20.0, 20.0));

        let palette = SelectionPalette::default();
        let frame = render_interactive(
            RenderSource {
                base: &base,
                blur: &blur,
            },
            &session,
        );
        assert_eq!(*frame.get_pixel(9, 25), palette.selected_outline.to_rgba());
        assert_eq!(*frame.get_pixel(7, 7), palette.handle_fill.to_rgba());
        assert_eq!(*frame.get_pixel(43, 43), palette.handle_fill.to_rgba());
        assert_eq!(*frame.get_pixel(25, 25), RED.to_rgba());
        assert_eq!(*frame.get_pixel(50, 25), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn export_ignores_selection_and_drag_preview() {
        let base = checkerboard(64);
        let blur = BlurCache::new();
        let source = RenderSource {
            base: &base,
            blur: &blur,
        };
        let mut session = EditorSession::new(RED);
        session.set_tool(ToolKind::Solid);
        drag(&mut session, (10.0, 10.0), (30.0, 30.0));
        let unselected = render_export(source, session.shapes().as_slice());

        session.set_tool(ToolKind::Select);
        session.pointer_down(Point::new(15.0, 15.0));
        assert!(session.selected_id().is_some());
        session.set_tool(ToolKind::Blur);
        session.pointer_down(Point::new(35.0, 35.0));
        session.pointer_move(Point::new(60.0, 60.0));

        let selected_scene = RenderScene {
            selected_id: session.shapes().iter().next().map(Shape::id),
            ..RenderScene::from_session(&session)
        };
        let exported = render_frame(source, &selected_scene, RenderMode::Export);
        assert_eq!(exported, unselected);
        assert_ne!(
            render_frame(source, &selected_scene, RenderMode::Interactive),
            unselected
        );
    }

    #[test]
    fn drag_preview_draws_tool_colored_dashes_over_committed_shapes() {
        let base = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let blur = BlurCache::new();
        let source = RenderSource {
            base: &base,
            blur: &blur,
        };
        let mut session = EditorSession::new(RED);
        session.pointer_down(Point::new(20.0, 20.0));
        session.pointer_move(Point::new(60.0, 60.0));

        let frame = render_interactive(source, &session);
        let stroke = SelectionPalette::default().blur_preview_stroke.to_rgba();
        assert_eq!(*frame.get_pixel(21, 20), stroke);
        assert_ne!(*frame.get_pixel(26, 20), stroke);

        session.set_tool(ToolKind::Solid);
        session.pointer_down(Point::new(20.0, 20.0));
        session.pointer_move(Point::new(60.0, 60.0));
        let frame = render_interactive(source, &session);
        assert_eq!(*frame.get_pixel(21, 20), RED.to_rgba());
        assert_eq!(*frame.get_pixel(40, 40), RED.to_rgba());
    }
}
