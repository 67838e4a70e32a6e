//! File-based State Store Adapter
//!
//! Stores each interview snapshot as `<session_id>.json` or
//! `<session_id>.yaml` under a base directory. The JSON form is the
//! snapshot contract verbatim, so files can be edited or produced by hand.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::capture::CaptureState;
use crate::domain::foundation::SessionId;
use crate::ports::{StateStore, StateStoreError};

/// On-disk encoding for snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFormat {
    #[default]
    Json,
    Yaml,
}

impl StateFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StateFormat::Json => "json",
            StateFormat::Yaml => "yaml",
        }
    }

    fn encode(&self, state: &CaptureState) -> Result<String, StateStoreError> {
        match self {
            StateFormat::Json => serde_json::to_string_pretty(state)
                .map_err(|e| StateStoreError::SerializationFailed(e.to_string())),
            StateFormat::Yaml => serde_yaml::to_string(state)
                .map_err(|e| StateStoreError::SerializationFailed(e.to_string())),
        }
    }

    fn decode(&self, text: &str) -> Result<CaptureState, StateStoreError> {
        match self {
            StateFormat::Json => serde_json::from_str(text)
                .map_err(|e| StateStoreError::DeserializationFailed(e.to_string())),
            StateFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| StateStoreError::DeserializationFailed(e.to_string())),
        }
    }
}

impl fmt::Display for StateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File-based storage for interview snapshots
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
    format: StateFormat,
}

impl FileStateStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created lazily on first save.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStateStore::new("./sessions", StateFormat::Yaml);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, format: StateFormat) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn format(&self) -> StateFormat {
        self.format
    }

    /// Get the snapshot file path for a session
    pub fn state_file_path(&self, id: SessionId) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", id, self.format.extension()))
    }
}

fn io_error(e: std::io::Error) -> StateStoreError {
    StateStoreError::Io(e.to_string())
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn save(&self, id: SessionId, state: &CaptureState) -> Result<(), StateStoreError> {
        fs::create_dir_all(&self.base_path).await.map_err(io_error)?;

        let text = self.format.encode(state)?;
        let path = self.state_file_path(id);
        fs::write(&path, text).await.map_err(io_error)?;

        debug!(session_id = %id, path = %path.display(), "snapshot saved");
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<CaptureState, StateStoreError> {
        let path = self.state_file_path(id);

        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StateStoreError::NotFound(id));
            }
            Err(e) => return Err(io_error(e)),
        };

        self.format.decode(&text)
    }

    async fn exists(&self, id: SessionId) -> Result<bool, StateStoreError> {
        fs::try_exists(self.state_file_path(id))
            .await
            .map_err(io_error)
    }

    async fn delete(&self, id: SessionId) -> Result<(), StateStoreError> {
        match fs::remove_file(self.state_file_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn list(&self) -> Result<Vec<SessionId>, StateStoreError> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.format.extension()) {
                continue;
            }
            // Files not named after a session id are ignored.
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<SessionId>().ok())
            {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }
}
