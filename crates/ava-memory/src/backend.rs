//! Pluggable snapshot persistence.
//!
//! The store calls `load` once at construction and `save` after every
//! mutation. Backends are interchangeable: anything that can hold one JSON
//! document satisfies the trait.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use ava_core::error::{AvaError, Result};

use crate::types::MemorySnapshot;

/// Load/save pair the memory store persists through.
pub trait SnapshotBackend: Send + Sync {
    /// Read the stored snapshot. `Ok(None)` means nothing was stored yet.
    fn load(&self) -> Result<Option<MemorySnapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &MemorySnapshot) -> Result<()>;
}

/// File backend: one pretty-printed JSON document on disk.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<MemorySnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: MemorySnapshot = serde_json::from_str(&content)?;
        info!("Memory snapshot loaded from {}", self.path.display());
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &MemorySnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| AvaError::Storage(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-memory backend for tests and persistence-free operation.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    slot: Mutex<Option<MemorySnapshot>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for InMemoryBackend {
    fn load(&self) -> Result<Option<MemorySnapshot>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| AvaError::Storage(format!("Backend lock poisoned: {}", e)))?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &MemorySnapshot) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AvaError::Storage(format!("Backend lock poisoned: {}", e)))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}
