use std::fmt;

use crate::geometry::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Blur,
    Solid,
}

/// How a redaction paints its region. Blur always samples the base image, so
/// only solid redactions carry a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStyle {
    Blur,
    Solid { fill: Color },
}

impl ShapeStyle {
    pub const fn for_kind(kind: ShapeKind, fill: Color) -> Self {
        match kind {
            ShapeKind::Blur => Self::Blur,
            ShapeKind::Solid => Self::Solid { fill },
        }
    }

    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Blur => ShapeKind::Blur,
            Self::Solid { .. } => ShapeKind::Solid,
        }
    }

    pub const fn fill_color(&self) -> Option<Color> {
        match self {
            Self::Blur => None,
            Self::Solid { fill } => Some(*fill),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    id: ShapeId,
    pub rect: Rect,
    pub style: ShapeStyle,
}

impl Shape {
    pub const fn id(&self) -> ShapeId {
        self.id
    }

    pub const fn kind(&self) -> ShapeKind {
        self.style.kind()
    }

    pub const fn fill_color(&self) -> Option<Color> {
        self.style.fill_color()
    }
}

/// Committed redactions in insertion order. The order is both the undo order
/// and the paint order; ids come from a counter that never rewinds.
#[derive(Debug, Clone)]
pub struct ShapeList {
    shapes: Vec<Shape>,
    next_id: u64,
}

impl Default for ShapeList {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeList {
    pub const fn new() -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ShapeId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        ShapeId(id)
    }

    pub fn add(&mut self, rect: Rect, style: ShapeStyle) -> ShapeId {
        let id = self.allocate_id();
        self.shapes.push(Shape { id, rect, style });
        id
    }

    pub fn remove_by_id(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id == id)?;
        Some(self.shapes.remove(index))
    }

    pub fn remove_last(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.shapes.len();
        self.shapes.clear();
        removed
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ShapeList {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
