// Helper functions shared by the workflow and backends

use regex::Regex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::downloader::config::NetworkConfig;
use crate::downloader::errors::BackendError;
use crate::downloader::models::OutputFormat;

/// Characters that cannot appear in a file name on common platforms
const RESERVED_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const FALLBACK_FILENAME: &str = "download";

/// Check whether `url` is a YouTube watch, shorts or youtu.be link
pub fn is_valid_video_url(url: &str) -> bool {
    lazy_static::lazy_static! {
        static ref VIDEO_URL_RE: Regex = Regex::new(
            r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|shorts/)|youtu\.be/)"
        ).unwrap();
    }

    VIDEO_URL_RE.is_match(url)
}

/// Replace reserved characters with `_` and trim; empty results become "download"
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if RESERVED_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Name of the saved file: `<title>[_cut].<ext>`
pub fn download_file_name(title: &str, format: OutputFormat, clipped: bool) -> String {
    format!(
        "{}{}.{}",
        sanitize_filename(title),
        if clipped { "_cut" } else { "" },
        format.extension()
    )
}

/// Build the HTTP client, routing through the configured proxy if any
pub fn build_http_client(config: &NetworkConfig) -> Result<reqwest::Client, BackendError> {
    let mut client_builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        client_builder = client_builder.timeout(Duration::from_secs(timeout as u64));
    }

    if let Some(proxy_url) = config.proxy.as_deref() {
        match reqwest::Proxy::all(proxy_url) {
            Ok(proxy) => {
                debug!("[HttpClient] Using proxy: {}", proxy_url);
                client_builder = client_builder.proxy(proxy);
            }
            Err(e) => {
                warn!("[HttpClient] Invalid proxy URL {}: {}, using direct connection", proxy_url, e);
            }
        }
    }

    Ok(client_builder.build()?)
}
