use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::PublishError;
use crate::page::{Template, render_document};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct PublishSummary {
    /// Pages that were written, in input order.
    pub written: Vec<PathBuf>,
    /// Inputs that could not be read or whose page could not be written.
    pub skipped: Vec<PathBuf>,
    /// Total constructs rendered as literal text across all inputs.
    pub fallbacks: usize,
}

/// Converts Markdown files into HTML pages inside one output directory.
pub struct Publisher {
    output_dir: PathBuf,
    template: Template,
    default_title: String,
}

impl Publisher {
    pub fn new(output_dir: PathBuf, template: Template, default_title: impl Into<String>) -> Self {
        Publisher {
            output_dir,
            template,
            default_title: default_title.into(),
        }
    }

    /// Build a publisher from config, resolving relative paths against `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self, PublishError> {
        let template = match &config.template {
            Some(path) => Template::load(&base_dir.join(path))?,
            None => Template::default(),
        };
        Ok(Publisher::new(
            base_dir.join(&config.output_dir),
            template,
            config.default_title.clone(),
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render one file to a full page without writing anything.
    pub fn render_file(&self, path: &Path) -> Result<String, PublishError> {
        let source = std::fs::read_to_string(path).map_err(|source| PublishError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(render_document(&source).to_page(&self.template, &self.default_title))
    }

    /// Publish every input in order.
    ///
    /// Unreadable inputs and failed writes are logged and skipped. Failing to
    /// create the output directory aborts the run.
    pub fn publish<P: AsRef<Path>>(&self, paths: &[P]) -> Result<PublishSummary, PublishError> {
        let mut summary = PublishSummary::default();

        for path in paths {
            let path = path.as_ref();
            let source = match std::fs::read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "cannot read input, skipping");
                    summary.skipped.push(path.to_path_buf());
                    continue;
                }
            };

            let document = render_document(&source);
            for fallback in &document.fallbacks {
                warn!(path = %path.display(), span = ?fallback.span, "{}", fallback);
            }
            summary.fallbacks += document.fallbacks.len();

            let page = document.to_page(&self.template, &self.default_title);
            let target = output_path(&self.output_dir, path);

            self.ensure_output_dir()?;
            match std::fs::write(&target, page) {
                Ok(()) => {
                    info!(input = %path.display(), output = %target.display(), "page written");
                    summary.written.push(target);
                }
                Err(e) => {
                    let err = PublishError::Write {
                        path: target,
                        source: e,
                    };
                    error!("{}", err);
                    summary.skipped.push(path.to_path_buf());
                }
            }
        }

        Ok(summary)
    }

    fn ensure_output_dir(&self) -> Result<(), PublishError> {
        debug!(dir = %self.output_dir.display(), "ensuring output directory");
        std::fs::create_dir_all(&self.output_dir).map_err(|source| PublishError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }
}

/// `<output_dir>/<input file stem>.html`
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    output_dir.join(format!("{}.html", stem))
}
