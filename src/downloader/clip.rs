// Clip range configuration
//
// Start/end are free text; malformed values are left for the backend to reject.

use super::models::{ClipRange, ZERO_TIME};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipRangeManager {
    range: ClipRange,
    editor_open: bool,
}

impl ClipRangeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> &ClipRange {
        &self.range
    }

    pub fn is_enabled(&self) -> bool {
        self.range.enabled
    }

    pub fn is_editor_open(&self) -> bool {
        self.editor_open
    }

    pub fn open(&mut self) {
        self.editor_open = true;
    }

    /// Close the editor without changing the enabled flag
    pub fn close(&mut self) {
        self.editor_open = false;
    }

    pub fn set_start(&mut self, start: impl Into<String>) {
        self.range.start = start.into();
    }

    pub fn set_end(&mut self, end: impl Into<String>) {
        self.range.end = end.into();
    }

    /// Enable clipping with the current start/end
    pub fn confirm(&mut self) {
        self.range.enabled = true;
        self.editor_open = false;
    }

    /// Disable clipping; entered start/end are kept
    pub fn cancel(&mut self) {
        self.range.enabled = false;
        self.editor_open = false;
    }

    pub fn disable(&mut self) {
        self.range.enabled = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Markers for freshly fetched metadata: 00:00:00 up to the duration
    pub fn init_for_duration(&mut self, duration: &str) {
        self.range.start = ZERO_TIME.to_string();
        self.range.end = if duration.is_empty() {
            ZERO_TIME.to_string()
        } else {
            duration.to_string()
        };
    }

    /// Range to send with a conversion, only when enabled
    pub fn request(&self) -> Option<ClipRange> {
        self.range.enabled.then(|| self.range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let clip = ClipRangeManager::new();
        assert_eq!(clip.range().start, "00:00:00");
        assert_eq!(clip.range().end, "00:00:00");
        assert!(!clip.is_enabled());
        assert!(clip.request().is_none());
    }

    #[test]
    fn test_confirm_enables_current_values() {
        let mut clip = ClipRangeManager::new();
        clip.open();
        clip.set_start("00:00:10");
        clip.set_end("00:01:00");
        clip.confirm();

        assert!(!clip.is_editor_open());
        let range = clip.request().unwrap();
        assert_eq!(range.start, "00:00:10");
        assert_eq!(range.end, "00:01:00");
        assert!(range.enabled);
    }

    #[test]
    fn test_cancel_after_confirm_keeps_values() {
        let mut clip = ClipRangeManager::new();
        clip.set_start("00:00:10");
        clip.set_end("00:01:00");
        clip.confirm();

        clip.open();
        clip.cancel();

        assert!(!clip.is_enabled());
        assert!(!clip.is_editor_open());
        assert!(clip.request().is_none());
        assert_eq!(clip.range().start, "00:00:10");
        assert_eq!(clip.range().end, "00:01:00");
    }

    #[test]
    fn test_malformed_values_are_not_validated() {
        let mut clip = ClipRangeManager::new();
        clip.set_start("banana");
        clip.set_end("99:99:99");
        clip.confirm();
        assert_eq!(clip.request().unwrap().start, "banana");
    }

    #[test]
    fn test_close_keeps_enabled_flag() {
        let mut clip = ClipRangeManager::new();
        clip.confirm();
        clip.open();
        clip.close();
        assert!(clip.is_enabled());
    }

    #[test]
    fn test_init_for_duration_and_reset() {
        let mut clip = ClipRangeManager::new();
        clip.set_start("00:00:05");
        clip.init_for_duration("04:20");
        assert_eq!(clip.range().start, "00:00:00");
        assert_eq!(clip.range().end, "04:20");

        clip.init_for_duration("");
        assert_eq!(clip.range().end, "00:00:00");

        clip.confirm();
        clip.reset();
        assert_eq!(clip, ClipRangeManager::new());
    }
}
