use std::fmt;

use serde::{Deserialize, Serialize};

/// One named piece of listing copy as supplied by the content generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub name: String,
    pub raw_text: String,
}

impl ContentSection {
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Recognised listing sections, in scoring and issue order.
///
/// `Listing` is never an input section; it tags listing-wide findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Title,
    Bullets,
    Description,
    Faqs,
    Listing,
}

impl SectionKind {
    pub const SCORED: [SectionKind; 4] = [
        SectionKind::Title,
        SectionKind::Bullets,
        SectionKind::Description,
        SectionKind::Faqs,
    ];

    /// Resolves an input section name, accepting the generator's field names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "title" => Some(SectionKind::Title),
            "bullets" | "bullet_points" => Some(SectionKind::Bullets),
            "description" | "long_description" => Some(SectionKind::Description),
            "faqs" | "faq" => Some(SectionKind::Faqs),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Title => "Title",
            SectionKind::Bullets => "Bullets",
            SectionKind::Description => "Description",
            SectionKind::Faqs => "FAQs",
            SectionKind::Listing => "Listing",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(SectionKind::from_name("bullet_points"), Some(SectionKind::Bullets));
        assert_eq!(
            SectionKind::from_name(" Long_Description "),
            Some(SectionKind::Description)
        );
        assert_eq!(SectionKind::from_name("FAQ"), Some(SectionKind::Faqs));
    }

    #[test]
    fn test_listing_is_not_an_input_name() {
        assert_eq!(SectionKind::from_name("listing"), None);
        assert_eq!(SectionKind::from_name("specs"), None);
    }

    #[test]
    fn test_order_follows_declaration() {
        assert!(SectionKind::Title < SectionKind::Bullets);
        assert!(SectionKind::Faqs < SectionKind::Listing);
    }
}
