use crate::editor::{EditorCommand, ToolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool, meta: bool) -> Self {
        Self { ctrl, shift, meta }
    }

    const fn command(self) -> bool {
        self.ctrl || self.meta
    }

    const fn any(self) -> bool {
        self.ctrl || self.shift || self.meta
    }
}

fn resolve_tool_shortcut(key: ShortcutKey) -> Option<ToolKind> {
    match key {
        ShortcutKey::Character('v') => Some(ToolKind::Select),
        ShortcutKey::Character('b') => Some(ToolKind::Blur),
        ShortcutKey::Character('s') => Some(ToolKind::Solid),
        _ => None,
    }
}

/// Maps a key press to the editor command it triggers.
pub fn resolve_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<EditorCommand> {
    match key {
        ShortcutKey::Delete | ShortcutKey::Backspace => Some(EditorCommand::Delete),
        ShortcutKey::Character('z') if modifiers.command() && !modifiers.shift => {
            Some(EditorCommand::Undo)
        }
        _ if modifiers.any() => None,
        _ => resolve_tool_shortcut(key).map(|tool| EditorCommand::SetTool { tool }),
    }
}
