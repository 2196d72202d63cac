//! Persisted shapes of the preference stores.

use hearth_core::i18n::Language;
use hearth_core::Theme;
use serde::{Deserialize, Serialize};

/// State under `theme-storage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub theme: Theme,
}

/// State under `language-storage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_json_shape() {
        let theme = serde_json::to_string(&ThemeSettings { theme: Theme::Dark }).unwrap();
        assert_eq!(theme, r#"{"theme":"dark"}"#);

        let language = serde_json::to_string(&LanguageSettings {
            language: Language::Ru,
        })
        .unwrap();
        assert_eq!(language, r#"{"language":"ru"}"#);
    }
}
