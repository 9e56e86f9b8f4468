//! DocumentStore — per-application JSON files in a directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// What a store directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Schema,
    Values,
}

impl DocumentKind {
    /// File name suffix appended to the application name.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Schema => ".schema.json",
            Self::Values => ".values.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => f.write_str("schema"),
            Self::Values => f.write_str("values"),
        }
    }
}

/// Read-only lookup of one document kind by application name.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
    kind: DocumentKind,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>, kind: DocumentKind) -> Self {
        Self {
            dir: dir.into(),
            kind,
        }
    }

    /// Store of `<app>.schema.json` files.
    pub fn schemas(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DocumentKind::Schema)
    }

    /// Store of `<app>.values.json` files.
    pub fn values(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DocumentKind::Values)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Path of the document for `app_name`, or `None` if the name could
    /// escape the store directory.
    pub fn document_path(&self, app_name: &str) -> Option<PathBuf> {
        let escapes = app_name.is_empty()
            || app_name == "."
            || app_name == ".."
            || app_name.contains(['/', '\\', '\0']);
        if escapes {
            return None;
        }
        Some(self.dir.join(format!("{app_name}{}", self.kind.suffix())))
    }

    /// Load the document for `app_name`.
    ///
    /// Fails with [`StoreError::NotFound`] when no file exists and with
    /// [`StoreError::CorruptData`] when it is not valid JSON.
    pub async fn get(&self, app_name: &str) -> StoreResult<Value> {
        let path = self
            .document_path(app_name)
            .ok_or_else(|| StoreError::NotFound(app_name.to_string()))?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, kind = %self.kind, "document not found");
                return Err(StoreError::NotFound(app_name.to_string()));
            }
            Err(e) => return Err(StoreError::Read(e)),
        };

        let document = serde_json::from_str(&content).map_err(|e| StoreError::CorruptData {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!(?path, kind = %self.kind, "document loaded");
        Ok(document)
    }
}
