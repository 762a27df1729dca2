//! Storage backends for the record store.
//!
//! The persisted form is a single named blob of UTF-8 JSON text. A backend
//! only knows how to load and save that blob; the store owns its contents.
//! This trait is the seam where a remote backend would plug in.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::{Error, Result};

/// A home for the single persisted blob.
pub trait Backend: std::fmt::Debug {
    /// Load the blob, or `None` if nothing has been persisted yet.
    fn load(&self) -> Result<Option<String>>;

    /// Overwrite the blob with new contents.
    fn save(&self, blob: &str) -> Result<()>;

    /// Human-readable location of the blob, for logging and status output.
    fn describe(&self) -> String;
}

/// File-backed blob storage.
///
/// Writes go through a temporary file followed by a rename, so a failed
/// write never truncates the previously persisted blob. Parent directories
/// are created on first save.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the blob at the given path.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the blob file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::BlobRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            std::fs::write(&tmp, blob)?;
            std::fs::rename(&tmp, &self.path)
        };
        write().map_err(|source| Error::BlobWrite {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory blob storage for tests and throwaway stores.
///
/// Clones share the same blob, so a test can keep a handle to inspect what
/// the store persisted. Saves can be switched to fail to exercise
/// persistence error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    blob: Option<String>,
    fail_saves: bool,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-loaded with a blob, as if previously persisted.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let backend = Self::new();
        backend.lock().blob = Some(blob.into());
        backend
    }

    /// Current persisted contents, if any.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.lock().blob.clone()
    }

    /// Make every subsequent save fail, or succeed again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().expect("memory backend lock poisoned")
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock().blob.clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(Error::BlobWrite {
                path: PathBuf::from(":memory:"),
                source: std::io::Error::other("save failure injected"),
            });
        }
        state.blob = Some(blob.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        ":memory:".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("minutebook_{}_{}.json", tag, std::process::id()))
    }

    #[test]
    fn test_file_backend_load_absent_is_none() {
        let backend = FileBackend::new(temp_path("absent"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_save_load_round_trip() {
        let path = temp_path("roundtrip");
        let backend = FileBackend::new(&path);

        backend.save("[1,2,3]").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("[1,2,3]"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_backend_save_overwrites() {
        let path = temp_path("overwrite");
        let backend = FileBackend::new(&path);

        backend.save("first").unwrap();
        backend.save("second").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("second"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_backend_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("minutebook_nested_{}", std::process::id()));
        let path = dir.join("deep").join("minutes.json");
        let backend = FileBackend::new(&path);

        backend.save("[]").unwrap();
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_backend_describe_is_path() {
        let backend = FileBackend::new("/data/minutes.json");
        assert_eq!(backend.describe(), "/data/minutes.json");
    }

    #[test]
    fn test_memory_backend_starts_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.load().unwrap().is_none());
        assert!(backend.contents().is_none());
    }

    #[test]
    fn test_memory_backend_save_and_load() {
        let backend = MemoryBackend::new();
        backend.save("[]").unwrap();
        assert_eq!(backend.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_backend_clones_share_blob() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        backend.save("shared").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("shared"));
    }

    #[test]
    fn test_memory_backend_with_blob() {
        let backend = MemoryBackend::with_blob("preloaded");
        assert_eq!(backend.load().unwrap().as_deref(), Some("preloaded"));
    }

    #[test]
    fn test_memory_backend_fail_saves() {
        let backend = MemoryBackend::new();
        backend.save("kept").unwrap();

        backend.set_fail_saves(true);
        assert!(backend.save("lost").is_err());
        assert_eq!(backend.contents().as_deref(), Some("kept"));

        backend.set_fail_saves(false);
        backend.save("recovered").unwrap();
        assert_eq!(backend.contents().as_deref(), Some("recovered"));
    }
}
