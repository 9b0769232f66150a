//! Ordered classification rule tables
//!
//! Each table is a static list of `(pattern, category)` pairs evaluated top to
//! bottom; the first matching pattern decides the category.

use crate::classify::DocumentCategory;
use crate::url::PathPattern;
use serde::Deserialize;

/// A single classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub pattern: PathPattern,
    pub category: DocumentCategory,
}

const fn contains(needle: &'static str, category: DocumentCategory) -> Rule {
    Rule {
        pattern: PathPattern::Contains(needle),
        category,
    }
}

/// The site-specific rules, in priority order
///
/// Shared by both tables; they differ only in where and how the home rule
/// is placed.
const SECTIONS: [Rule; 15] = [
    contains("/about/", DocumentCategory::About),
    contains("/services/", DocumentCategory::Services),
    contains("/projection-systems/", DocumentCategory::ProjectionSystems),
    contains("/contact/", DocumentCategory::Contact),
    contains("/privacy-policy-2/", DocumentCategory::PrivacyPolicy),
    contains("/disclaimer/", DocumentCategory::Disclaimer),
    contains("/terms-conditions/", DocumentCategory::TermsConditions),
    contains("/outdoor-led-displays/", DocumentCategory::OutdoorLedDisplays),
    contains("/indoor-led-displays/", DocumentCategory::IndoorLedDisplays),
    contains(
        "/transparent-flexible-led-displays/",
        DocumentCategory::TransparentFlexibleLedDisplays,
    ),
    contains("/mobile-led-displays/", DocumentCategory::MobileLedDisplays),
    contains("/led-standees/", DocumentCategory::LedStandees),
    contains("/led-screen-rentals/", DocumentCategory::LedScreenRentals),
    contains("/articles/", DocumentCategory::Articles),
    contains("/repositories/", DocumentCategory::Repositories),
];

/// The canonical table, reproduced as-is
///
/// The home rule comes first and matches any path containing `/`, which
/// shadows every rule below it for ordinary web links.
pub static LITERAL_RULES: [Rule; 16] = {
    let mut rules = [contains("/", DocumentCategory::Home); 16];
    let mut i = 0;
    while i < SECTIONS.len() {
        rules[i + 1] = SECTIONS[i];
        i += 1;
    }
    rules
};

/// Section rules first, then a home rule that matches only the site root
pub static STRICT_RULES: [Rule; 16] = {
    let mut rules = [Rule {
        pattern: PathPattern::Root,
        category: DocumentCategory::Home,
    }; 16];
    let mut i = 0;
    while i < SECTIONS.len() {
        rules[i] = SECTIONS[i];
        i += 1;
    }
    rules
};

/// Which rule table the classifier walks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleTable {
    /// Canonical ordering, home rule first
    #[default]
    Literal,
    /// Specific rules first, home only for the root path
    Strict,
}

impl RuleTable {
    /// Returns the ordered rules for this table
    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Self::Literal => &LITERAL_RULES,
            Self::Strict => &STRICT_RULES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Strict => "strict",
        }
    }
}
