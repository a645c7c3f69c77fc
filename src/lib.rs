pub mod app;
mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub mod source;
pub mod state;
pub mod storage;

use std::path::{Path, PathBuf};

pub use config::{load_app_config, AppConfig, ConfigPathError};
pub use error::{AppError, AppResult};

/// Headless entrypoint: opens `image_path`, replays the JSON command script
/// and writes the flattened export. Returns the path written.
pub fn run(image_path: &Path, script_path: &Path, output: Option<&Path>) -> AppResult<PathBuf> {
    logging::init();
    tracing::info!("starting redact");

    let mut app = app::App::with_user_config();
    app.open_path(image_path)?;
    let commands = app::load_script(script_path)?;
    let effects = app.replay(commands)?;
    tracing::debug!(effects = effects.len(), "script effects applied");

    let mut sink = match output {
        Some(path) => storage::PngFileSink::new(path),
        None => storage::PngFileSink::in_directory(".", &app.config().export_file_name)?,
    };
    app.export_to(&mut sink)?;
    app.close_editor()?;

    tracing::info!("finished with state={:?}", app.state().state());
    Ok(sink.path().to_path_buf())
}
