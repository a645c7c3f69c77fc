use image::{Rgba, RgbaImage};

use crate::geometry::Rect;

/// Half-open pixel span `[x0, x1) x [y0, y1)` covered by a rectangle after
/// clipping to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PixelSpan {
    pub(super) x0: u32,
    pub(super) y0: u32,
    pub(super) x1: u32,
    pub(super) y1: u32,
}

pub(super) fn pixel_span(rect: Rect, width: u32, height: u32) -> Option<PixelSpan> {
    let clip = |value: f64, limit: u32| value.round().clamp(0.0, f64::from(limit)) as u32;
    let span = PixelSpan {
        x0: clip(rect.x, width),
        y0: clip(rect.y, height),
        x1: clip(rect.right(), width),
        y1: clip(rect.bottom(), height),
    };
    if span.x0 >= span.x1 || span.y0 >= span.y1 {
        return None;
    }
    Some(span)
}

pub(super) fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let Some(span) = pixel_span(rect, canvas.width(), canvas.height()) else {
        return;
    };
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Copies the pixels of `source` under `rect` onto the canvas. `source` must
/// match the canvas dimensions.
pub(super) fn copy_rect_from(canvas: &mut RgbaImage, source: &RgbaImage, rect: Rect) {
    if source.dimensions() != canvas.dimensions() {
        return;
    }
    let Some(span) = pixel_span(rect, canvas.width(), canvas.height()) else {
        return;
    };
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            canvas.put_pixel(x, y, *source.get_pixel(x, y));
        }
    }
}

/// Solid outline centered on the rectangle edges.
pub(super) fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, line_width: f64, color: Rgba<u8>) {
    let half = line_width / 2.0;
    let outer_x = rect.x - half;
    let outer_y = rect.y - half;
    let outer_w = rect.w + line_width;
    let outer_h = rect.h + line_width;

    fill_rect(canvas, Rect::new(outer_x, outer_y, outer_w, line_width), color);
    fill_rect(
        canvas,
        Rect::new(outer_x, rect.bottom() - half, outer_w, line_width),
        color,
    );
    fill_rect(canvas, Rect::new(outer_x, outer_y, line_width, outer_h), color);
    fill_rect(
        canvas,
        Rect::new(rect.right() - half, outer_y, line_width, outer_h),
        color,
    );
}

/// One pixel wide dashed outline. The dash phase runs clockwise from the
/// top-left corner.
pub(super) fn dashed_outline(canvas: &mut RgbaImage, rect: Rect, dash: f64, color: Rgba<u8>) {
    let dash = dash.max(1.0);
    let is_on = |distance: f64| ((distance / dash).floor() as i64).rem_euclid(2) == 0;
    let (width, height) = canvas.dimensions();
    let top = rect.y.floor() as i64;
    let bottom = rect.bottom().floor() as i64;
    let left = rect.x.floor() as i64;
    let right = rect.right().floor() as i64;

    for x in clipped_range(rect.x, rect.right(), width) {
        let center = x as f64 + 0.5;
        if is_on(center - rect.x) {
            put_if_inside(canvas, x, top, color);
        }
        if is_on(rect.w + rect.h + (rect.right() - center)) {
            put_if_inside(canvas, x, bottom, color);
        }
    }
    for y in clipped_range(rect.y, rect.bottom(), height) {
        let center = y as f64 + 0.5;
        if is_on(rect.w + (center - rect.y)) {
            put_if_inside(canvas, right, y, color);
        }
        if is_on(2.0 * rect.w + rect.h + (rect.bottom() - center)) {
            put_if_inside(canvas, left, y, color);
        }
    }
}

fn clipped_range(start: f64, end: f64, limit: u32) -> std::ops::Range<i64> {
    let limit = f64::from(limit);
    let first = start.floor().clamp(0.0, limit) as i64;
    let last = end.ceil().clamp(0.0, limit) as i64;
    first..last.max(first)
}

fn put_if_inside(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}
