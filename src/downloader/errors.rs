// Error types for the conversion workflow

use thiserror::Error;

use crate::locale::TextKey;

/// User-facing failure of a workflow action.
///
/// Carries no technical detail; the cause is logged where it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Input is not a supported video link, nothing was requested
    #[error("invalid video URL")]
    InvalidUrl,

    /// Info lookup failed or was rejected by the backend
    #[error("failed to fetch video information")]
    InfoFetchFailed,

    /// Conversion request failed, was rejected, or the file could not be saved
    #[error("conversion failed")]
    ConversionFailed,
}

impl ConvertError {
    /// Text key of the localized message shown for this error
    pub fn text_key(&self) -> TextKey {
        match self {
            Self::InvalidUrl => TextKey::ErrorInvalidUrl,
            Self::InfoFetchFailed => TextKey::ErrorFetch,
            Self::ConversionFailed => TextKey::ErrorConversion,
        }
    }
}

/// Failure inside a backend or save target
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no download directory available")]
    NoSaveLocation,

    #[error("transient file handle already released")]
    BlobReleased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keys() {
        assert_eq!(ConvertError::InvalidUrl.text_key(), TextKey::ErrorInvalidUrl);
        assert_eq!(ConvertError::InfoFetchFailed.text_key(), TextKey::ErrorFetch);
        assert_eq!(ConvertError::ConversionFailed.text_key(), TextKey::ErrorConversion);
    }

    #[test]
    fn test_status_message() {
        assert_eq!(BackendError::Status(502).to_string(), "backend returned status 502");
    }
}
