//! Document classification for Crawl-Links
//!
//! Maps a link to a [`DocumentCategory`] by testing its path against an
//! ordered rule table. The first matching rule wins; a path no rule matches
//! is an error rather than a silent default.

use crate::config::rules::{Rule, RuleTable};
use crate::crawler::ExtractionProfile;
use crate::url::link_path;
use crate::ClassificationError;
use std::fmt;

/// The kind of page a link represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentCategory {
    Home,
    About,
    Services,
    ProjectionSystems,
    Contact,
    PrivacyPolicy,
    Disclaimer,
    TermsConditions,
    OutdoorLedDisplays,
    IndoorLedDisplays,
    TransparentFlexibleLedDisplays,
    MobileLedDisplays,
    LedStandees,
    LedScreenRentals,
    Articles,
    Repositories,
}

impl DocumentCategory {
    /// Every category, in rule-table order
    pub const ALL: [DocumentCategory; 16] = [
        Self::Home,
        Self::About,
        Self::Services,
        Self::ProjectionSystems,
        Self::Contact,
        Self::PrivacyPolicy,
        Self::Disclaimer,
        Self::TermsConditions,
        Self::OutdoorLedDisplays,
        Self::IndoorLedDisplays,
        Self::TransparentFlexibleLedDisplays,
        Self::MobileLedDisplays,
        Self::LedStandees,
        Self::LedScreenRentals,
        Self::Articles,
        Self::Repositories,
    ];

    /// Stable tag used in storage and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Services => "services",
            Self::ProjectionSystems => "projection-systems",
            Self::Contact => "contact",
            Self::PrivacyPolicy => "privacy-policy",
            Self::Disclaimer => "disclaimer",
            Self::TermsConditions => "terms-conditions",
            Self::OutdoorLedDisplays => "outdoor-led-displays",
            Self::IndoorLedDisplays => "indoor-led-displays",
            Self::TransparentFlexibleLedDisplays => "transparent-flexible-led-displays",
            Self::MobileLedDisplays => "mobile-led-displays",
            Self::LedStandees => "led-standees",
            Self::LedScreenRentals => "led-screen-rentals",
            Self::Articles => "articles",
            Self::Repositories => "repositories",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == tag)
    }

    /// How a crawler scoped to this category locates the document body
    pub fn extraction_profile(&self) -> ExtractionProfile {
        match self {
            Self::Articles => ExtractionProfile::new(&["article", "main", "body"]),
            Self::Repositories => {
                ExtractionProfile::new(&["article", "#readme", "main", "body"])
            }
            Self::Contact => ExtractionProfile::new(&["main", "address", "body"]),
            _ => ExtractionProfile::new(&["main", "[role='main']", "body"]),
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the category of the first rule matching `path`
pub fn classify_path(path: &str, rules: &[Rule]) -> Option<DocumentCategory> {
    rules
        .iter()
        .find(|rule| rule.pattern.matches(path))
        .map(|rule| rule.category)
}

/// Classifies a link by walking the given rule table
///
/// # Arguments
///
/// * `link` - The link to classify
/// * `table` - Which rule table to evaluate
///
/// # Returns
///
/// * `Ok(DocumentCategory)` - Category of the first matching rule
/// * `Err(ClassificationError)` - The link does not parse, or no rule matches
///   its path
///
/// # Examples
///
/// ```
/// use crawl_links::classify::classify_link;
/// use crawl_links::config::RuleTable;
/// use crawl_links::DocumentCategory;
///
/// let category = classify_link("https://site.com/about/", RuleTable::Strict).unwrap();
/// assert_eq!(category, DocumentCategory::About);
///
/// // The canonical table matches its "/" rule first
/// let category = classify_link("https://site.com/about/", RuleTable::Literal).unwrap();
/// assert_eq!(category, DocumentCategory::Home);
/// ```
pub fn classify_link(link: &str, table: RuleTable) -> Result<DocumentCategory, ClassificationError> {
    let path = link_path(link).map_err(|e| ClassificationError::InvalidLink {
        link: link.to_string(),
        reason: e.to_string(),
    })?;

    match classify_path(&path, table.rules()) {
        Some(category) => {
            tracing::debug!("Classified {} as {}", link, category);
            Ok(category)
        }
        None => Err(ClassificationError::Unclassifiable {
            link: link.to_string(),
            path,
        }),
    }
}
