//! Result persister: mirrors fetched URLs to files on disk

use crate::config::OutputConfig;
use crate::PersistError;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Writes response bodies to paths derived from their URLs
pub trait Persist {
    /// Saves `contents` for `url`, returning the path written
    fn save(&self, url: &str, contents: &str) -> Result<PathBuf, PersistError>;
}

/// Saves each response under `root`, at the URL's path relative to `base`
///
/// `http://h/api/v1/applications/app1/jobs` with base `http://h/api/v1/`
/// lands at `<root>/applications/app1/jobs.json`.
#[derive(Debug, Clone)]
pub struct ResultSaver {
    root: PathBuf,
    base: String,
    extension: String,
}

impl ResultSaver {
    pub fn new(
        root: impl Into<PathBuf>,
        base: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
            extension: extension.into(),
        }
    }

    /// Creates a saver from the output configuration and crawl base
    pub fn from_config(config: &OutputConfig, base: &str) -> Self {
        Self::new(&config.directory, base, &config.extension)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derives the file path for a rendered URL without touching the disk
    ///
    /// The base prefix is stripped when present. A URL outside the base that
    /// parses as an absolute URL is stored under `host/path` instead.
    /// The extension is appended unless the path already ends with it.
    ///
    /// # Errors
    ///
    /// Returns `PersistError::OutsideRoot` if the derived path contains `..`
    /// or is absolute.
    pub fn path_for(&self, url: &str) -> Result<PathBuf, PersistError> {
        let mut relative = match url.strip_prefix(self.base.as_str()) {
            Some(rest) => rest.trim_start_matches('/').to_string(),
            None => match Url::parse(url) {
                Ok(parsed) => host_relative(&parsed),
                Err(_) => url.trim_start_matches('/').to_string(),
            },
        };

        let escapes = Path::new(&relative).components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(PersistError::OutsideRoot {
                url: url.to_string(),
            });
        }

        if !relative.ends_with(self.extension.as_str()) {
            relative.push_str(&self.extension);
        }

        Ok(self.root.join(relative))
    }
}

impl Persist for ResultSaver {
    fn save(&self, url: &str, contents: &str) -> Result<PathBuf, PersistError> {
        let path = self.path_for(url)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&path, contents).map_err(|source| PersistError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} to {}", url, path.display());
        Ok(path)
    }
}

/// `host[:port]/path[?query]` for an absolute URL
fn host_relative(url: &Url) -> String {
    let mut relative = url.host_str().unwrap_or_default().to_string();
    if let Some(port) = url.port() {
        relative.push_str(&format!("_{}", port));
    }
    relative.push_str(url.path());
    if let Some(query) = url.query() {
        relative.push('?');
        relative.push_str(query);
    }
    relative
}
