// Locale selection and text lookup
//
// The stored preference is only applied after `Localizer::initialize`, until then
// every lookup renders the default locale.

mod store;
mod translations;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use translations::{translate, TextKey};

/// Key under which the locale preference is stored
pub const LOCALE_STORAGE_KEY: &str = "roxay-converter-locale";

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preference store lock poisoned")]
    Poisoned,
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Pt,
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Pt, Locale::En, Locale::Es];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
            Self::Es => "es",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pt => "Português",
            Self::En => "English",
            Self::Es => "Español",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code.trim())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Process-wide locale state backed by a preference store
pub struct Localizer {
    store: Arc<dyn PreferenceStore>,
    locale: Locale,
    initialized: bool,
}

impl Localizer {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            locale: Locale::default(),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Effective locale: the default until initialization has completed
    pub fn locale(&self) -> Locale {
        if self.initialized {
            self.locale
        } else {
            Locale::default()
        }
    }

    /// Apply the stored preference. Runs once; later calls return the current locale.
    pub fn initialize(&mut self) -> Locale {
        if self.initialized {
            return self.locale;
        }

        match self.store.get(LOCALE_STORAGE_KEY) {
            Ok(Some(code)) => match Locale::from_code(&code) {
                Some(locale) => {
                    info!("[Locale] Restored stored locale: {}", locale);
                    self.locale = locale;
                }
                None => debug!("[Locale] Ignoring unknown stored locale: {:?}", code),
            },
            Ok(None) => debug!("[Locale] No stored locale, using {}", self.locale),
            Err(e) => warn!("[Locale] Failed to read stored locale: {}", e),
        }

        self.initialized = true;
        self.locale
    }

    /// Switch locale and persist the choice
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), LocaleError> {
        self.locale = locale;
        self.initialized = true;
        self.store.set(LOCALE_STORAGE_KEY, locale.code())
    }

    pub fn t(&self, key: TextKey) -> &'static str {
        translate(self.locale(), key)
    }
}
