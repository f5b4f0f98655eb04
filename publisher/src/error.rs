use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot create output directory '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot read template '{}': {source}", .path.display())]
    Template { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
}
