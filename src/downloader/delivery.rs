// Delivery of converted files
//
// Converted bytes live in a `BlobStore` only while a `BlobHandle` exists; dropping
// the handle releases the entry on every exit path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::errors::BackendError;
use super::traits::SaveTarget;

/// Registry of transient binary objects
#[derive(Debug, Default)]
pub struct BlobStore {
    next_id: AtomicU64,
    blobs: Mutex<HashMap<u64, Arc<Vec<u8>>>>,
}

impl BlobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register `bytes` and return the handle that owns the entry
    pub fn register(self: &Arc<Self>, bytes: Vec<u8>) -> BlobHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let len = bytes.len();
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(id, Arc::new(bytes));
        }
        debug!("[BlobStore] Registered blob #{} ({} bytes)", id, len);

        BlobHandle {
            id,
            len,
            store: Arc::clone(self),
        }
    }

    /// Number of blobs not yet released
    pub fn live_count(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    fn get(&self, id: u64) -> Option<Arc<Vec<u8>>> {
        self.blobs.lock().ok()?.get(&id).cloned()
    }

    fn release(&self, id: u64) {
        if let Ok(mut blobs) = self.blobs.lock() {
            if blobs.remove(&id).is_some() {
                debug!("[BlobStore] Released blob #{}", id);
            }
        }
    }
}

/// Scoped reference to a registered blob
#[derive(Debug)]
pub struct BlobHandle {
    id: u64,
    len: usize,
    store: Arc<BlobStore>,
}

impl BlobHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> Result<Arc<Vec<u8>>, BackendError> {
        self.store.get(self.id).ok_or(BackendError::BlobReleased)
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        self.store.release(self.id);
    }
}

/// Saves files into a directory, the way a browser drops them into Downloads
#[derive(Debug, Clone)]
pub struct DownloadDirTarget {
    dir: PathBuf,
}

impl DownloadDirTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The user's download directory
    pub fn user_downloads() -> Result<Self, BackendError> {
        dirs::download_dir()
            .map(Self::new)
            .ok_or(BackendError::NoSaveLocation)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SaveTarget for DownloadDirTarget {
    async fn save(&self, file_name: &str, blob: &BlobHandle) -> Result<PathBuf, BackendError> {
        let bytes = blob.bytes()?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes.as_slice()).await?;
        info!("[DownloadDir] Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
