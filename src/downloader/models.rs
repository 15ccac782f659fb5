// Common data models for the conversion workflow

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Default clip marker, also used when the backend reports no duration
pub const ZERO_TIME: &str = "00:00:00";

/// Output container requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Audio only (mp3)
    Audio,
    /// Video with audio (mp4)
    #[default]
    Video,
}

impl OutputFormat {
    /// Token sent as `format=` and used as the file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            Self::Video => "mp4",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "mp3" | "audio" => Some(Self::Audio),
            "mp4" | "video" => Some(Self::Video),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Quality tokens per format, ascending (last = best)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFormats {
    #[serde(rename = "mp3", alias = "audioQualities", default)]
    pub audio_qualities: Vec<String>,
    #[serde(rename = "mp4", alias = "videoQualities", default)]
    pub video_qualities: Vec<String>,
}

impl QualityFormats {
    pub fn for_format(&self, format: OutputFormat) -> &[String] {
        match format {
            OutputFormat::Audio => &self.audio_qualities,
            OutputFormat::Video => &self.video_qualities,
        }
    }
}

/// Video information returned by the info lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    #[serde(rename = "thumbnail", alias = "thumbnailUrl", default, deserialize_with = "empty_if_null")]
    pub thumbnail_url: String,
    /// `HH:MM:SS` or `MM:SS`, empty when unknown
    #[serde(default, deserialize_with = "empty_if_null")]
    pub duration: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub author: String,
    pub formats: QualityFormats,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional sub-segment of the source, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRange {
    pub start: String,
    pub end: String,
    pub enabled: bool,
}

impl Default for ClipRange {
    fn default() -> Self {
        Self {
            start: ZERO_TIME.to_string(),
            end: ZERO_TIME.to_string(),
            enabled: false,
        }
    }
}

/// One conversion request, built when a download starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source_url: String,
    pub output_format: OutputFormat,
    pub quality_token: String,
    /// Present only when the clip is enabled
    pub clip: Option<ClipRange>,
}

impl ConversionRequest {
    pub fn is_clipped(&self) -> bool {
        self.clip.is_some()
    }
}

/// Workflow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Ready,
    Converting,
}
