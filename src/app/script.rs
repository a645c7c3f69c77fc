use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::editor::EditorCommand;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read command script: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid command script: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ScriptResult<T> = std::result::Result<T, ScriptError>;

/// Parses a JSON array of tagged editor commands.
pub fn parse_script(contents: &str) -> ScriptResult<Vec<EditorCommand>> {
    Ok(serde_json::from_str(contents)?)
}

pub fn load_script(path: impl AsRef<Path>) -> ScriptResult<Vec<EditorCommand>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let commands = parse_script(&contents)?;
    tracing::debug!(path = %path.display(), commands = commands.len(), "loaded command script");
    Ok(commands)
}
