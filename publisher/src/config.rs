use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::PublishError;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "mdhtml.toml";

/// Publishing settings, read from `mdhtml.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory that receives the generated pages. Relative paths resolve
    /// against the working directory.
    pub output_dir: PathBuf,
    /// Page template replacing the built-in one.
    pub template: Option<PathBuf>,
    /// Title used when a document has no level-one heading.
    pub default_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: PathBuf::from("html_files"),
            template: None,
            default_title: "Page".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, PublishError> {
        toml::from_str(content).map_err(|source| PublishError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Self, PublishError> {
        let content = std::fs::read_to_string(path).map_err(|source| PublishError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load `mdhtml.toml` from `dir` when present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, PublishError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_path(&path)
    }
}
