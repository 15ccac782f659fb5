// Conversion download and file delivery

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::delivery::BlobStore;
use super::errors::{BackendError, ConvertError};
use super::models::ConversionRequest;
use super::progress::ProgressSimulator;
use super::traits::{ConverterBackend, SaveTarget};
use super::utils;

pub struct DownloadExecutor {
    backend: Arc<dyn ConverterBackend>,
    target: Arc<dyn SaveTarget>,
    blobs: Arc<BlobStore>,
}

impl DownloadExecutor {
    pub fn new(backend: Arc<dyn ConverterBackend>, target: Arc<dyn SaveTarget>) -> Self {
        Self {
            backend,
            target,
            blobs: BlobStore::new(),
        }
    }

    pub fn blobs(&self) -> &Arc<BlobStore> {
        &self.blobs
    }

    /// Run the conversion and save the result as `<title>[_cut].<ext>`.
    ///
    /// Progress is forced to 100 once the backend has answered, right before the
    /// file is written.
    pub async fn execute(
        &self,
        request: &ConversionRequest,
        title: &str,
        progress: &ProgressSimulator,
    ) -> Result<PathBuf, ConvertError> {
        match self.run(request, title, progress).await {
            Ok(path) => {
                info!("[Executor] ✓ Saved {}", path.display());
                Ok(path)
            }
            Err(e) => {
                warn!("[Executor] ✗ Conversion via {} failed: {}", self.backend.name(), e);
                Err(ConvertError::ConversionFailed)
            }
        }
    }

    async fn run(
        &self,
        request: &ConversionRequest,
        title: &str,
        progress: &ProgressSimulator,
    ) -> Result<PathBuf, BackendError> {
        info!(
            "[Executor] Converting {} to {} ({}, clip={})",
            request.source_url,
            request.output_format,
            request.quality_token,
            request.is_clipped()
        );
        let bytes = self.backend.convert(request).await?;

        progress.complete();

        // Released when `blob` goes out of scope, whatever `save` returns
        let blob = self.blobs.register(bytes);
        let file_name = utils::download_file_name(title, request.output_format, request.is_clipped());
        self.target.save(&file_name, &blob).await
    }
}
