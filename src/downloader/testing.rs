// In-memory backend and save target for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use super::delivery::BlobHandle;
use super::errors::BackendError;
use super::models::{ConversionRequest, QualityFormats, VideoMetadata};
use super::traits::{ConverterBackend, SaveTarget};

pub fn metadata(title: &str, audio: &[&str], video: &[&str]) -> VideoMetadata {
    VideoMetadata {
        title: title.to_string(),
        thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault.jpg".to_string(),
        duration: "03:25".to_string(),
        author: "Someone".to_string(),
        formats: QualityFormats {
            audio_qualities: audio.iter().map(|q| q.to_string()).collect(),
            video_qualities: video.iter().map(|q| q.to_string()).collect(),
        },
    }
}

type InfoReply = (Duration, Result<VideoMetadata, u16>);

/// Backend answering from canned replies; unknown URLs get a 404
pub struct FakeBackend {
    info: Mutex<HashMap<String, InfoReply>>,
    info_calls: Mutex<Vec<String>>,
    convert_reply: Mutex<Result<Vec<u8>, u16>>,
    convert_delay: Mutex<Duration>,
    convert_calls: Mutex<Vec<ConversionRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            info: Mutex::new(HashMap::new()),
            info_calls: Mutex::new(Vec::new()),
            convert_reply: Mutex::new(Ok(b"converted".to_vec())),
            convert_delay: Mutex::new(Duration::ZERO),
            convert_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_info(&self, url: &str, reply: Result<VideoMetadata, u16>) {
        self.respond_info_after(url, Duration::ZERO, reply);
    }

    pub fn respond_info_after(&self, url: &str, delay: Duration, reply: Result<VideoMetadata, u16>) {
        self.info.lock().unwrap().insert(url.to_string(), (delay, reply));
    }

    pub fn fail_convert(&self, status: u16) {
        *self.convert_reply.lock().unwrap() = Err(status);
    }

    pub fn succeed_convert(&self, bytes: Vec<u8>) {
        *self.convert_reply.lock().unwrap() = Ok(bytes);
    }

    pub fn delay_convert(&self, delay: Duration) {
        *self.convert_delay.lock().unwrap() = delay;
    }

    pub fn info_calls(&self) -> Vec<String> {
        self.info_calls.lock().unwrap().clone()
    }

    pub fn convert_calls(&self) -> Vec<ConversionRequest> {
        self.convert_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConverterBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn fetch_info(&self, url: &str) -> Result<VideoMetadata, BackendError> {
        self.info_calls.lock().unwrap().push(url.to_string());
        let (delay, reply) = self
            .info
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or((Duration::ZERO, Err(404)));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply.map_err(BackendError::Status)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<Vec<u8>, BackendError> {
        self.convert_calls.lock().unwrap().push(request.clone());
        let delay = *self.convert_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.convert_reply.lock().unwrap().clone().map_err(BackendError::Status)
    }
}

/// Save target keeping files in memory
pub struct MemoryTarget {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveTarget for MemoryTarget {
    async fn save(&self, file_name: &str, blob: &BlobHandle) -> Result<PathBuf, BackendError> {
        if self.fail {
            return Err(BackendError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only target",
            )));
        }
        let bytes = blob.bytes()?;
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.as_ref().clone()));
        Ok(PathBuf::from(file_name))
    }
}
