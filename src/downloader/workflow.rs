// Conversion workflow state machine
//
// Idle -> Fetching -> Ready -> Converting -> Ready. Errors are kept next to the
// phase until the next submission or download clears them. State sits behind a
// mutex that is never held across an await.
//
// Info lookups are tagged with a sequence number; a response that arrives after a
// newer submission has started is dropped instead of overwriting newer state.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::backends::HttpBackend;
use super::clip::ClipRangeManager;
use super::config::{ConverterConfig, ProgressConfig};
use super::delivery::DownloadDirTarget;
use super::errors::{BackendError, ConvertError};
use super::executor::DownloadExecutor;
use super::models::{ClipRange, ConversionRequest, OutputFormat, Phase, VideoMetadata};
use super::orchestrator::{default_quality, MetadataFetcher};
use super::progress::ProgressSimulator;
use super::traits::{ConverterBackend, SaveTarget};
use crate::locale::Localizer;

#[derive(Debug, Default)]
struct WorkflowState {
    phase: Phase,
    metadata: Option<VideoMetadata>,
    /// Link of the last accepted submission, used for conversions
    source_url: String,
    format: OutputFormat,
    quality: String,
    clip: ClipRangeManager,
    error: Option<ConvertError>,
    fetch_seq: u64,
}

/// Point-in-time copy of the workflow state
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    pub phase: Phase,
    pub metadata: Option<VideoMetadata>,
    pub source_url: String,
    pub format: OutputFormat,
    pub quality: String,
    pub clip: ClipRange,
    pub clip_editor_open: bool,
    pub error: Option<ConvertError>,
    pub progress: f32,
}

struct Inner {
    state: Mutex<WorkflowState>,
    fetcher: MetadataFetcher,
    executor: DownloadExecutor,
    progress: ProgressSimulator,
}

/// Handle to one conversion workflow. Clones share the same state.
#[derive(Clone)]
pub struct Workflow {
    inner: Arc<Inner>,
}

impl Workflow {
    pub fn new(
        backend: Arc<dyn ConverterBackend>,
        target: Arc<dyn SaveTarget>,
        progress: ProgressConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(WorkflowState::default()),
                fetcher: MetadataFetcher::new(Arc::clone(&backend)),
                executor: DownloadExecutor::new(backend, target),
                progress: ProgressSimulator::new(progress),
            }),
        }
    }

    /// HTTP backend and download directory from `config`
    pub fn from_config(config: &ConverterConfig) -> Result<Self, BackendError> {
        let backend = HttpBackend::new(config)?;
        info!("[Workflow] Using backend at {}", backend.base_url());
        Ok(Self::new(
            Arc::new(backend),
            Arc::new(DownloadDirTarget::new(&config.download_dir)),
            config.progress.clone(),
        ))
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.inner.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Validate `url` and look up its metadata.
    ///
    /// Ignored while a conversion is running.
    pub async fn submit(&self, url: &str) {
        let seq = {
            let mut state = self.lock();
            if state.phase == Phase::Converting {
                debug!("[Workflow] Submission ignored while converting");
                return;
            }
            if let Err(e) = MetadataFetcher::validate(url) {
                warn!("[Workflow] Rejected link: {:?}", url);
                state.error = Some(e);
                return;
            }

            state.error = None;
            state.metadata = None;
            state.quality.clear();
            state.clip.disable();
            state.source_url = url.to_string();
            state.phase = Phase::Fetching;
            state.fetch_seq += 1;
            state.fetch_seq
        };

        let result = self.inner.fetcher.fetch(url).await;

        let mut guard = self.lock();
        let state = &mut *guard;
        if state.fetch_seq != seq {
            info!("[Workflow] Dropping stale info response for {}", url);
            return;
        }

        match result {
            Ok(metadata) => {
                state.clip.init_for_duration(&metadata.duration);
                state.quality = default_quality(&metadata.formats, state.format);
                state.metadata = Some(metadata);
                state.phase = Phase::Ready;
            }
            Err(e) => {
                state.error = Some(e);
                state.phase = Phase::Idle;
            }
        }
    }

    /// Switch output format and pick the best quality for it
    pub fn change_format(&self, format: OutputFormat) {
        let mut guard = self.lock();
        let state = &mut *guard;
        state.format = format;
        if let Some(metadata) = &state.metadata {
            state.quality = default_quality(&metadata.formats, format);
        }
    }

    /// Select a quality offered for the current format
    pub fn select_quality(&self, token: &str) -> bool {
        let mut guard = self.lock();
        let state = &mut *guard;
        let offered = state
            .metadata
            .as_ref()
            .is_some_and(|m| m.formats.for_format(state.format).iter().any(|q| q == token));
        if offered {
            state.quality = token.to_string();
        }
        offered
    }

    /// Qualities offered for the current format
    pub fn qualities(&self) -> Vec<String> {
        let state = self.lock();
        state
            .metadata
            .as_ref()
            .map(|m| m.formats.for_format(state.format).to_vec())
            .unwrap_or_default()
    }

    pub fn open_clip_editor(&self) {
        self.lock().clip.open();
    }

    pub fn close_clip_editor(&self) {
        self.lock().clip.close();
    }

    pub fn set_clip_start(&self, start: &str) {
        self.lock().clip.set_start(start);
    }

    pub fn set_clip_end(&self, end: &str) {
        self.lock().clip.set_end(end);
    }

    pub fn confirm_clip(&self) {
        self.lock().clip.confirm();
    }

    pub fn cancel_clip(&self) {
        self.lock().clip.cancel();
    }

    pub fn reset_clip(&self) {
        self.lock().clip.reset();
    }

    /// Convert and save the current selection.
    ///
    /// No-op without metadata, without a selected quality, or while another
    /// conversion runs. Returns where the file was saved.
    pub async fn download(&self) -> Option<PathBuf> {
        let (request, title) = {
            let mut guard = self.lock();
            let state = &mut *guard;
            if state.phase == Phase::Converting {
                debug!("[Workflow] Download ignored, conversion already running");
                return None;
            }
            let Some(metadata) = state.metadata.as_ref() else {
                debug!("[Workflow] Download ignored, no metadata");
                return None;
            };
            if state.quality.is_empty() {
                debug!("[Workflow] Download ignored, no quality selected");
                return None;
            }

            let request = ConversionRequest {
                source_url: state.source_url.clone(),
                output_format: state.format,
                quality_token: state.quality.clone(),
                clip: state.clip.request(),
            };
            let title = metadata.title.clone();
            state.error = None;
            state.phase = Phase::Converting;
            (request, title)
        };

        let mut conversion = ConversionGuard {
            workflow: self,
            finished: false,
        };
        let progress = &self.inner.progress;
        progress.start();

        let result = self.inner.executor.execute(&request, &title, progress).await;

        progress.stop();
        tokio::time::sleep(progress.config().completion_delay).await;

        let saved = match result {
            Ok(path) => Some(path),
            Err(e) => {
                self.lock().error = Some(e);
                None
            }
        };
        conversion.finished = true;
        saved
    }

    /// Cancel the progress task. The workflow stays usable.
    pub fn teardown(&self) {
        self.inner.progress.stop();
        debug!("[Workflow] Torn down");
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn error(&self) -> Option<ConvertError> {
        self.lock().error
    }

    /// Localized text of the current error
    pub fn error_message(&self, localizer: &Localizer) -> Option<&'static str> {
        self.error().map(|e| localizer.t(e.text_key()))
    }

    pub fn progress(&self) -> watch::Receiver<f32> {
        self.inner.progress.subscribe()
    }

    pub fn progress_value(&self) -> f32 {
        self.inner.progress.value()
    }

    pub fn is_progress_running(&self) -> bool {
        self.inner.progress.is_running()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.lock();
        WorkflowSnapshot {
            phase: state.phase,
            metadata: state.metadata.clone(),
            source_url: state.source_url.clone(),
            format: state.format,
            quality: state.quality.clone(),
            clip: state.clip.range().clone(),
            clip_editor_open: state.clip.is_editor_open(),
            error: state.error,
            progress: self.inner.progress.value(),
        }
    }
}

/// Leaves the Converting phase when dropped, including when the download
/// future is dropped mid-conversion.
struct ConversionGuard<'a> {
    workflow: &'a Workflow,
    finished: bool,
}

impl Drop for ConversionGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("[Workflow] Download dropped before completion");
        }
        let progress = &self.workflow.inner.progress;
        progress.stop();
        progress.reset();
        self.workflow.lock().phase = Phase::Ready;
    }
}
