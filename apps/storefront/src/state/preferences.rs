//! # Preference State
//!
//! Language and theme. Both are tiny, persisted on every change, and read
//! by every screen.

use std::sync::{Arc, Mutex};

use hearth_core::i18n::{translate, Language};
use hearth_core::Theme;
use hearth_store::{LanguageSettings, SnapshotRepository, Storage, ThemeSettings};
use tracing::{debug, warn};

use super::lock;

// =============================================================================
// Language
// =============================================================================

/// Current interface language plus the translation lookup.
#[derive(Debug, Clone)]
pub struct LanguageState {
    settings: Arc<Mutex<LanguageSettings>>,
    repo: SnapshotRepository<LanguageSettings>,
}

impl LanguageState {
    /// Restores the saved language, else `fallback`.
    pub fn restore(storage: &Storage, fallback: Language) -> Self {
        let repo = storage.language();
        let settings = repo.restore(|| LanguageSettings { language: fallback });
        debug!(language = %settings.language, "Language restored");
        LanguageState {
            settings: Arc::new(Mutex::new(settings)),
            repo,
        }
    }

    pub fn current(&self) -> Language {
        lock(&self.settings).language
    }

    pub fn set(&self, language: Language) {
        let mut settings = lock(&self.settings);
        settings.language = language;
        debug!(%language, "Language set");
        if let Err(e) = self.repo.save(&settings) {
            warn!(error = %e, "Failed to persist language");
        }
    }

    /// Translates `key` into the current language.
    ///
    /// Falls back to English, then to the key itself.
    pub fn t(&self, key: &str) -> String {
        translate(self.current(), key).to_string()
    }
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone)]
pub struct ThemeState {
    settings: Arc<Mutex<ThemeSettings>>,
    repo: SnapshotRepository<ThemeSettings>,
}

impl ThemeState {
    pub fn restore(storage: &Storage) -> Self {
        let repo = storage.theme();
        let settings = repo.restore(ThemeSettings::default);
        ThemeState {
            settings: Arc::new(Mutex::new(settings)),
            repo,
        }
    }

    pub fn current(&self) -> Theme {
        lock(&self.settings).theme
    }

    pub fn set(&self, theme: Theme) {
        self.update(|_| theme);
    }

    /// Flips light/dark and returns the new theme.
    pub fn toggle(&self) -> Theme {
        self.update(Theme::toggled)
    }

    fn update(&self, f: impl FnOnce(Theme) -> Theme) -> Theme {
        let mut settings = lock(&self.settings);
        settings.theme = f(settings.theme);
        debug!(theme = ?settings.theme, "Theme set");
        if let Err(e) = self.repo.save(&settings) {
            warn!(error = %e, "Failed to persist theme");
        }
        settings.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_fallback_and_persistence() {
        let storage = Storage::in_memory();

        let language = LanguageState::restore(&storage, Language::Ru);
        assert_eq!(language.current(), Language::Ru);
        assert_eq!(language.t("dark"), "Тёмная");

        language.set(Language::En);
        assert_eq!(language.t("dark"), "Dark");
        assert_eq!(language.t("noSuchKey"), "noSuchKey");

        // Saved choice beats the configured default
        let reopened = LanguageState::restore(&storage, Language::Ru);
        assert_eq!(reopened.current(), Language::En);
    }

    #[test]
    fn test_russian_falls_back_to_english() {
        let storage = Storage::in_memory();
        let language = LanguageState::restore(&storage, Language::Ru);
        assert_eq!(language.t("userDeleted"), "User deleted");
    }

    #[test]
    fn test_theme_toggle_persists() {
        let storage = Storage::in_memory();

        let theme = ThemeState::restore(&storage);
        assert_eq!(theme.current(), Theme::Light);
        assert_eq!(theme.toggle(), Theme::Dark);

        let reopened = ThemeState::restore(&storage);
        assert_eq!(reopened.current(), Theme::Dark);

        reopened.set(Theme::Light);
        assert_eq!(reopened.current(), Theme::Light);
    }
}
