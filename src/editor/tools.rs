use serde::Deserialize;

use super::shapes::ShapeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Blur,
    Solid,
    Select,
}

impl ToolKind {
    /// Kind of redaction a drag with this tool commits, `None` for selection.
    pub const fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Blur => Some(ShapeKind::Blur),
            Self::Solid => Some(ShapeKind::Solid),
            Self::Select => None,
        }
    }

    pub const fn draws(self) -> bool {
        self.shape_kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_drawing_tools_map_to_shape_kinds() {
        assert_eq!(ToolKind::Blur.shape_kind(), Some(ShapeKind::Blur));
        assert_eq!(ToolKind::Solid.shape_kind(), Some(ShapeKind::Solid));
        assert_eq!(ToolKind::Select.shape_kind(), None);
        assert!(!ToolKind::Select.draws());
    }

    #[test]
    fn default_tool_is_blur() {
        assert_eq!(ToolKind::default(), ToolKind::Blur);
    }
}
