mod shortcut;

pub use shortcut::{resolve_shortcut, ShortcutKey, ShortcutModifiers};
