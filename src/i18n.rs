//! Site language preference.
//!
//! The browser keeps the choice under [`STORAGE_KEY`]; elements that can be
//! translated carry both labels as `data-i18n-en` / `data-i18n-nb` and get
//! their text swapped when the language changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STORAGE_KEY: &str = "site-lang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Nb,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Nb => "nb",
            Language::En => "en",
        }
    }

    /// Reads a stored preference; anything unrecognized keeps the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::Nb => Language::En,
            Language::En => Language::Nb,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nb" | "no" => Ok(Language::Nb),
            "en" => Ok(Language::En),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// An element with parallel localized labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedText {
    pub en: String,
    pub nb: String,
    pub text: String,
}

impl LocalizedText {
    /// Shows the label for the default language until one is applied.
    pub fn new(en: impl Into<String>, nb: impl Into<String>) -> Self {
        let mut text = Self {
            en: en.into(),
            nb: nb.into(),
            text: String::new(),
        };
        text.text = text.label(Language::default()).to_string();
        text
    }

    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::Nb => &self.nb,
            Language::En => &self.en,
        }
    }
}

/// Swaps the visible text of every element to `language`.
pub fn apply_language(elements: &mut [LocalizedText], language: Language) {
    for element in elements {
        element.text = element.label(language).to_string();
    }
}

/// Known translations for category buttons. Unknown categories stay
/// untranslated and carry no i18n attributes.
pub fn category_labels(category: &str) -> Option<LocalizedText> {
    match category {
        "landscapes" => Some(LocalizedText::new("Landscapes", "Landskap")),
        "astro" => Some(LocalizedText::new("Astro", "Astro")),
        "wildlife" => Some(LocalizedText::new("Wildlife", "Dyreliv")),
        _ => None,
    }
}

/// ` data-i18n-en="…" data-i18n-nb="…"` for a category button, with the
/// dropdown arrow appended for the mobile toggle.
pub fn category_i18n_attrs(category: &str, is_toggle: bool) -> String {
    let suffix = if is_toggle { " \u{25BC}" } else { "" };
    match category_labels(category) {
        Some(labels) => format!(
            r#" data-i18n-en="{}{}" data-i18n-nb="{}{}""#,
            labels.en, suffix, labels.nb, suffix
        ),
        None => String::new(),
    }
}
