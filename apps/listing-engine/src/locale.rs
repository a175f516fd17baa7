use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplace language code, e.g. `en`, `de`, `tr`, `ja`.
///
/// Stored lowercase. Region suffixes (`de-DE`, `pt_BR`) are kept as given but
/// `language()` strips them for rule lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`de-DE` → `de`).
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or("")
    }

    /// Turkish and Azeri distinguish dotted and dotless I.
    fn has_dotless_i(&self) -> bool {
        matches!(self.language(), "tr" | "az")
    }

    /// Locale-aware lowercase fold used for matching and de-duplication.
    ///
    /// For `tr`/`az`: `I` → `ı` and `İ` → `i`. Everywhere else Unicode default
    /// lowercasing applies.
    pub fn fold(&self, text: &str) -> String {
        if !self.has_dotless_i() {
            return text.to_lowercase();
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                'I' => out.push('ı'),
                'İ' => out.push('i'),
                other => out.extend(other.to_lowercase()),
            }
        }
        out
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_lowercased_and_trimmed() {
        assert_eq!(Locale::new(" DE ").as_str(), "de");
    }

    #[test]
    fn test_language_strips_region() {
        assert_eq!(Locale::new("pt_BR").language(), "pt");
        assert_eq!(Locale::new("de-DE").language(), "de");
    }

    #[test]
    fn test_turkish_fold_uses_dotless_i() {
        let tr = Locale::new("tr");
        assert_eq!(tr.fold("KIRMIZI"), "kırmızı");
        assert_eq!(tr.fold("İSTANBUL"), "istanbul");
    }

    #[test]
    fn test_deserialize_normalizes_code() {
        let locale: Locale = serde_json::from_str("\" TR \"").unwrap();
        assert_eq!(locale.as_str(), "tr");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"tr\"");
    }

    #[test]
    fn test_default_fold_is_unicode_lowercase() {
        let de = Locale::new("de");
        assert_eq!(de.fold("GRÖSSE Über"), "grösse über");
        assert_eq!(Locale::default().fold("KIRMIZI"), "kirmizi");
    }
}
