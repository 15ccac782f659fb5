// Metadata lookup for submitted links

use std::sync::Arc;
use tracing::{info, warn};

use super::errors::ConvertError;
use super::models::{OutputFormat, QualityFormats, VideoMetadata};
use super::traits::ConverterBackend;
use super::utils;

pub struct MetadataFetcher {
    backend: Arc<dyn ConverterBackend>,
}

impl MetadataFetcher {
    pub fn new(backend: Arc<dyn ConverterBackend>) -> Self {
        Self { backend }
    }

    pub fn validate(url: &str) -> Result<(), ConvertError> {
        if utils::is_valid_video_url(url) {
            Ok(())
        } else {
            Err(ConvertError::InvalidUrl)
        }
    }

    /// Look up metadata for `url`. Invalid links never reach the backend.
    pub async fn fetch(&self, url: &str) -> Result<VideoMetadata, ConvertError> {
        Self::validate(url)?;

        info!("[Fetcher] Looking up {} via {}", url, self.backend.name());
        match self.backend.fetch_info(url).await {
            Ok(metadata) => {
                info!(
                    "[Fetcher] ✓ {:?} ({} audio / {} video qualities)",
                    metadata.title,
                    metadata.formats.audio_qualities.len(),
                    metadata.formats.video_qualities.len()
                );
                Ok(metadata)
            }
            Err(e) => {
                warn!("[Fetcher] ✗ {} failed: {}", self.backend.name(), e);
                Err(ConvertError::InfoFetchFailed)
            }
        }
    }
}

/// Highest quality available for `format`, empty if there is none
pub fn default_quality(formats: &QualityFormats, format: OutputFormat) -> String {
    formats.for_format(format).last().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::testing::{metadata, FakeBackend};

    fn formats() -> QualityFormats {
        QualityFormats {
            audio_qualities: vec!["128kbps".to_string(), "320kbps".to_string()],
            video_qualities: vec!["360p".to_string(), "720p".to_string(), "1080p".to_string()],
        }
    }

    #[test]
    fn test_default_quality_is_last_entry() {
        assert_eq!(default_quality(&formats(), OutputFormat::Video), "1080p");
        assert_eq!(default_quality(&formats(), OutputFormat::Audio), "320kbps");
    }

    #[test]
    fn test_default_quality_empty_list() {
        assert_eq!(default_quality(&QualityFormats::default(), OutputFormat::Video), "");
    }

    #[tokio::test]
    async fn test_invalid_url_skips_backend() {
        let backend = Arc::new(FakeBackend::new());
        let fetcher = MetadataFetcher::new(backend.clone());

        assert_eq!(fetcher.fetch("https://vimeo.com/1").await, Err(ConvertError::InvalidUrl));
        assert!(backend.info_calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_maps_to_fetch_error() {
        let backend = Arc::new(FakeBackend::new());
        let fetcher = MetadataFetcher::new(backend.clone());

        assert_eq!(
            fetcher.fetch("https://youtu.be/missing").await,
            Err(ConvertError::InfoFetchFailed)
        );
        assert_eq!(backend.info_calls(), ["https://youtu.be/missing"]);
    }

    #[tokio::test]
    async fn test_success_returns_metadata() {
        let backend = Arc::new(FakeBackend::new());
        backend.respond_info("https://youtu.be/abc123", Ok(metadata("Song", &["128kbps"], &["720p"])));
        let fetcher = MetadataFetcher::new(backend);

        let meta = fetcher.fetch("https://youtu.be/abc123").await.unwrap();
        assert_eq!(meta.title, "Song");
    }
}
