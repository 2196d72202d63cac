//! # Preference Commands
//!
//! Theme and language switches from the account tab.

use hearth_core::i18n::Language;
use hearth_core::Theme;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{LanguageState, ThemeState};

/// Current preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

pub fn get_preferences(theme: &ThemeState, language: &LanguageState) -> Preferences {
    Preferences {
        theme: theme.current(),
        language: language.current(),
    }
}

/// Sets the theme, or flips it when `theme` is `None`.
pub fn set_theme(theme: &ThemeState, value: Option<Theme>) -> Theme {
    debug!(?value, "set_theme command");
    match value {
        Some(value) => {
            theme.set(value);
            value
        }
        None => theme.toggle(),
    }
}

pub fn set_language(language: &LanguageState, value: Language) -> Language {
    debug!(%value, "set_language command");
    language.set(value);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_toggle_and_set() {
        let state = AppState::in_memory();
        assert_eq!(set_theme(&state.theme, None), Theme::Dark);
        assert_eq!(set_theme(&state.theme, Some(Theme::Dark)), Theme::Dark);
        assert_eq!(set_theme(&state.theme, None), Theme::Light);

        set_language(&state.language, Language::Ru);
        let prefs = get_preferences(&state.theme, &state.language);
        assert_eq!(prefs.language, Language::Ru);
        assert_eq!(prefs.theme, Theme::Light);
    }
}
