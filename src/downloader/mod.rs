// Downloader module - conversion request workflow against a remote service

pub mod backends;
pub mod clip;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod executor;
pub mod models;
pub mod orchestrator;
pub mod progress;
pub mod traits;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use backends::HttpBackend;
pub use clip::ClipRangeManager;
pub use config::{ConverterConfig, NetworkConfig, ProgressConfig};
pub use delivery::{BlobHandle, BlobStore, DownloadDirTarget};
pub use errors::{BackendError, ConvertError};
pub use executor::DownloadExecutor;
pub use models::{ClipRange, ConversionRequest, OutputFormat, Phase, QualityFormats, VideoMetadata};
pub use orchestrator::{default_quality, MetadataFetcher};
pub use progress::ProgressSimulator;
pub use traits::{ConverterBackend, SaveTarget};
pub use utils::{download_file_name, is_valid_video_url, sanitize_filename};
pub use workflow::{Workflow, WorkflowSnapshot};
