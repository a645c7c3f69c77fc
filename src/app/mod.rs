//! Application lifecycle: at most one editing session, opened and closed
//! through the lifecycle state machine.

use std::path::Path;

use crate::config::{load_app_config, AppConfig};
use crate::controller::EditorController;
use crate::editor::{CommandEffect, EditorCommand};
use crate::error::AppResult;
use crate::input::{resolve_shortcut, ShortcutKey, ShortcutModifiers};
use crate::source::BaseImage;
use crate::state::{AppEvent, StateError, StateMachine};
use crate::storage::ExportSink;

mod script;

pub use script::{load_script, parse_script, ScriptError, ScriptResult};

#[derive(Debug)]
pub struct App {
    machine: StateMachine,
    config: AppConfig,
    controller: Option<EditorController>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            machine: StateMachine::new(),
            config,
            controller: None,
        }
    }

    pub fn with_user_config() -> Self {
        Self::new(load_app_config())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &StateMachine {
        &self.machine
    }

    pub fn controller(&self) -> Option<&EditorController> {
        self.controller.as_ref()
    }

    /// Starts a fresh session over `base`, replacing any open one.
    pub fn open_image(&mut self, base: BaseImage) -> AppResult<()> {
        tracing::info!(event = "open_image", from = ?self.machine.state(), size = ?base.size());
        let _ = self.machine.transition(AppEvent::OpenImage)?;
        self.controller = Some(EditorController::load(
            base,
            self.config.default_fill_color,
        ));
        Ok(())
    }

    pub fn open_path(&mut self, path: impl AsRef<Path>) -> AppResult<()> {
        let base = BaseImage::from_path(path)?;
        self.open_image(base)
    }

    pub fn close_editor(&mut self) -> AppResult<()> {
        tracing::info!(event = "close_editor", from = ?self.machine.state());
        let _ = self.machine.transition(AppEvent::CloseEditor)?;
        self.controller = None;
        Ok(())
    }

    fn active_controller(&mut self) -> AppResult<&mut EditorController> {
        self.controller
            .as_mut()
            .ok_or_else(|| StateError::NoActiveSession.into())
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> AppResult<CommandEffect> {
        Ok(self.active_controller()?.dispatch(command))
    }

    /// Dispatches the command bound to a key press, if any.
    pub fn handle_key(
        &mut self,
        key: ShortcutKey,
        modifiers: ShortcutModifiers,
    ) -> AppResult<Option<CommandEffect>> {
        let Some(command) = resolve_shortcut(key, modifiers) else {
            return Ok(None);
        };
        self.dispatch(command).map(Some)
    }

    pub fn replay<I>(&mut self, commands: I) -> AppResult<Vec<CommandEffect>>
    where
        I: IntoIterator<Item = EditorCommand>,
    {
        let controller = self.active_controller()?;
        let effects: Vec<CommandEffect> = commands
            .into_iter()
            .map(|command| controller.dispatch(command))
            .collect();
        tracing::info!(commands = effects.len(), "replayed command script");
        Ok(effects)
    }

    pub fn export_to(&self, sink: &mut dyn ExportSink) -> AppResult<()> {
        let controller = self
            .controller
            .as_ref()
            .ok_or(StateError::NoActiveSession)?;
        controller.export_to(sink)?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
