//! Manifest store
//!
//! Directory-backed persistence of manifest text keyed by a caller-chosen
//! name. Writes overwrite; concurrent writers to the same name race with
//! last-write-wins semantics (callers are assumed single-threaded per
//! manifest name, so no locking is done here).

use std::path::{Path, PathBuf};
use tracing::debug;

use kubelift_core::{LiftError, LiftResult, ManifestDocument};

/// Filesystem-backed manifest store
#[derive(Debug, Clone)]
pub struct ManifestStore {
    dir: PathBuf,
}

impl ManifestStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a manifest name maps to
    pub fn path_for(&self, name: &str) -> LiftResult<PathBuf> {
        if name.trim().is_empty() {
            return Err(LiftError::validation("manifest name must not be empty"));
        }
        // Names are plain file names, not paths into other directories
        if name.contains('/') || name.contains("..") {
            return Err(LiftError::validation(format!(
                "manifest name '{}' must not contain path separators",
                name
            )));
        }
        Ok(self.dir.join(name))
    }

    /// Persist manifest text under `name`, overwriting any existing entry
    pub async fn save(&self, name: &str, content: &str) -> LiftResult<PathBuf> {
        let path = self.path_for(name)?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            LiftError::io(format!(
                "failed to create store directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        tokio::fs::write(&path, content).await.map_err(|e| {
            LiftError::io(format!("failed to write {}: {}", path.display(), e))
        })?;

        debug!(name = %name, path = %path.display(), bytes = content.len(), "Saved manifest");
        Ok(path)
    }

    /// Read raw manifest text back
    pub async fn read(&self, name: &str) -> LiftResult<String> {
        let path = self.path_for(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LiftError::not_found(
                format!("no stored manifest named '{}'", name),
            )),
            Err(e) => Err(LiftError::io(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Load and parse a stored manifest
    pub async fn load(&self, name: &str) -> LiftResult<ManifestDocument> {
        let content = self.read(name).await?;
        ManifestDocument::parse(&content)
    }

    /// Names currently stored
    pub async fn list(&self) -> LiftResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(e) => {
                return Err(LiftError::io(format!(
                    "failed to list {}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            LiftError::io(format!("failed to list {}: {}", self.dir.display(), e))
        })? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
