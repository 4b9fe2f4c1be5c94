use std::path::{Path, PathBuf};

use datagen_generate::GenerateOptions;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Contents of a `datagen.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub generate: GenerateOptions,
    pub dest: Option<PathBuf>,
}

pub(crate) fn parse_settings(content: &str) -> Result<Settings, CliError> {
    Ok(toml::from_str(content)?)
}

/// Settings from `path`, or defaults when no file is configured.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Err(CliError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}
