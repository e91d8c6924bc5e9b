//! services/api/src/adapters/local_fs.rs
//!
//! Adapters for the local disk. `LocalSessionAdapter` implements the
//! `SessionService` port (one directory per session under a root directory),
//! and `LocalFileAdapter` implements the `FileSystemService` port.

use async_trait::async_trait;
use relay_core::ports::{FileSystemService, PortError, PortResult, SessionService};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

//=========================================================================================
// Session Folders
//=========================================================================================

/// Maps session names to directories below `root`.
#[derive(Clone, Debug)]
pub struct LocalSessionAdapter {
    root: PathBuf,
}

impl LocalSessionAdapter {
    /// Creates a new `LocalSessionAdapter`. A relative `root` is resolved
    /// against the process working directory when paths are handed out.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn session_path(&self, name: &str) -> PortResult<PathBuf> {
        validate_session_name(name)?;
        let joined = self.root.join(name);
        if joined.is_absolute() {
            return Ok(joined);
        }
        let cwd = std::env::current_dir()
            .map_err(|e| PortError::Filesystem(format!("Cannot read working directory: {}", e)))?;
        Ok(cwd.join(joined))
    }
}

/// A session name must be a single, plain path component.
fn validate_session_name(name: &str) -> PortResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(PortError::InvalidInput(format!(
            "'{}' is not a valid session name",
            name
        ))),
    }
}

#[async_trait]
impl SessionService for LocalSessionAdapter {
    async fn ensure_session_folder(&self, name: &str) -> PortResult<()> {
        let path = self.session_path(name)?;
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            PortError::Filesystem(format!("Failed to create {}: {}", path.display(), e))
        })?;
        debug!("Session folder ready at {}", path.display());
        Ok(())
    }

    fn resolve_session_folder(&self, name: &str) -> PortResult<PathBuf> {
        self.session_path(name)
    }
}

//=========================================================================================
// Plain Text Files
//=========================================================================================

/// Reads and writes whole text files. Writes are not atomic.
#[derive(Clone, Debug, Default)]
pub struct LocalFileAdapter;

impl LocalFileAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystemService for LocalFileAdapter {
    async fn write_text(&self, path: &Path, content: &str) -> PortResult<()> {
        tokio::fs::write(path, content).await.map_err(|e| {
            PortError::Filesystem(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    async fn read_text(&self, path: &Path) -> PortResult<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            PortError::Filesystem(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}
