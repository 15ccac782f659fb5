mod downloader;
mod locale;

pub use downloader::*;
pub use locale::{
    translate, FilePreferenceStore, Locale, LocaleError, Localizer, MemoryPreferenceStore,
    PreferenceStore, TextKey, LOCALE_STORAGE_KEY,
};
