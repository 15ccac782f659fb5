// Backend and save-target trait definitions

use async_trait::async_trait;
use std::path::PathBuf;

use super::delivery::BlobHandle;
use super::errors::BackendError;
use super::models::{ConversionRequest, VideoMetadata};

/// Remote conversion service
#[async_trait]
pub trait ConverterBackend: Send + Sync {
    /// Name of the backend (for logging)
    fn name(&self) -> &'static str;

    /// Resolve a source URL to its metadata
    async fn fetch_info(&self, url: &str) -> Result<VideoMetadata, BackendError>;

    /// Run one conversion and return the converted file
    async fn convert(&self, request: &ConversionRequest) -> Result<Vec<u8>, BackendError>;
}

/// Destination for converted files
#[async_trait]
pub trait SaveTarget: Send + Sync {
    /// Save the blob under `file_name`, returning where it ended up
    async fn save(&self, file_name: &str, blob: &BlobHandle) -> Result<PathBuf, BackendError>;
}
