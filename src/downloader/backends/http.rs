use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::downloader::config::ConverterConfig;
use crate::downloader::errors::BackendError;
use crate::downloader::models::{ConversionRequest, VideoMetadata};
use crate::downloader::traits::ConverterBackend;
use crate::downloader::utils;

const INFO_PATH: &str = "api/video-info";
const CONVERT_PATH: &str = "api/convert";

#[derive(Debug, Serialize)]
struct InfoRequest<'a> {
    url: &'a str,
}

/// Conversion service reached over HTTP
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ConverterConfig) -> Result<Self, BackendError> {
        let client = utils::build_http_client(&config.network)?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Info lookup endpoint under `base_url`
pub fn info_url(base_url: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), INFO_PATH))
}

/// Conversion endpoint with the request encoded as query parameters.
///
/// `start_time`/`end_time` are only added for clipped requests and are passed
/// through exactly as entered.
pub fn conversion_url(base_url: &str, request: &ConversionRequest) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}/{}", base_url.trim_end_matches('/'), CONVERT_PATH))?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("url", &request.source_url)
            .append_pair("format", request.output_format.extension())
            .append_pair("quality", &request.quality_token);
        if let Some(clip) = &request.clip {
            query
                .append_pair("start_time", &clip.start)
                .append_pair("end_time", &clip.end);
        }
    }
    Ok(url)
}

#[async_trait]
impl ConverterBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_info(&self, url: &str) -> Result<VideoMetadata, BackendError> {
        let endpoint = info_url(&self.base_url)?;
        debug!("[HttpBackend] POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&InfoRequest { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("[HttpBackend] Info lookup rejected: {}", status);
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let metadata: VideoMetadata = serde_json::from_slice(&body)?;
        info!("[HttpBackend] ✓ Info: {:?} by {:?}", metadata.title, metadata.author);
        Ok(metadata)
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<Vec<u8>, BackendError> {
        let endpoint = conversion_url(&self.base_url, request)?;
        debug!("[HttpBackend] GET {}", endpoint);

        let response = self.client.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("[HttpBackend] Conversion rejected: {}", status);
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        info!("[HttpBackend] ✓ Received {} bytes", body.len());
        Ok(body.to_vec())
    }
}
