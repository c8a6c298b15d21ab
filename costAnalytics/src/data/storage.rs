use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

/// Read access to the object store holding the source datasets. The pipeline
/// only ever downloads whole objects as text; everything else about the
/// store is someone else's problem.
pub trait ObjectStore {
    fn get_text(&self, bucket: &str, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    NotFound { bucket: String, key: String },
    Io { bucket: String, key: String, source: io::Error },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::Io { bucket, key, source } => {
                write!(f, "Failed to read {}/{}: {}", bucket, key, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            StorageError::NotFound { .. } => None,
        }
    }
}

/// Filesystem-backed store: objects live at `<root>/<bucket>/<key>`.
pub struct LocalObjectStore {
    root: PathBuf,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for LocalObjectStore {
    fn get_text(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        let path = self.object_path(bucket, key);
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Read {} bytes from {}", text.len(), path.display());
                Ok(text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(StorageError::Io {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory store, mainly for tests and embedding.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: HashMap<(String, String), String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: &str, key: &str, text: impl Into<String>) {
        self.objects
            .insert((bucket.to_string(), key.to_string()), text.into());
    }
}

impl ObjectStore for MemoryObjectStore {
    fn get_text(&self, bucket: &str, key: &str) -> Result<String, StorageError> {
        self.objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }
}
