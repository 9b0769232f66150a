/// A pattern tested against the path component of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches any path containing the given substring
    Contains(&'static str),
    /// Matches only the site root: `/` or an empty path
    Root,
}

impl PathPattern {
    /// Checks if a path matches this pattern
    ///
    /// Matching is case-sensitive and works on the path exactly as written
    /// in the link.
    ///
    /// # Examples
    ///
    /// ```
    /// use crawl_links::url::PathPattern;
    ///
    /// assert!(PathPattern::Contains("/about/").matches("/en/about/team"));
    /// assert!(!PathPattern::Contains("/about/").matches("/about"));
    ///
    /// assert!(PathPattern::Root.matches("/"));
    /// assert!(!PathPattern::Root.matches("/about/"));
    /// ```
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Contains(needle) => path.contains(needle),
            Self::Root => path.is_empty() || path == "/",
        }
    }

    /// Human-readable form of the pattern, used when logging a rule table
    pub fn describe(&self) -> String {
        match self {
            Self::Contains(needle) => format!("contains '{}'", needle),
            Self::Root => "is '/' or empty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_anywhere_in_path() {
        let pattern = PathPattern::Contains("/services/");
        assert!(pattern.matches("/services/"));
        assert!(pattern.matches("/services/led-walls/"));
        assert!(pattern.matches("/en/services/"));
    }

    #[test]
    fn test_contains_requires_full_needle() {
        let pattern = PathPattern::Contains("/services/");
        assert!(!pattern.matches("/services"));
        assert!(!pattern.matches("/our-services/"));
        assert!(!pattern.matches(""));
    }

    #[test]
    fn test_slash_needle_matches_nearly_everything() {
        let pattern = PathPattern::Contains("/");
        assert!(pattern.matches("/"));
        assert!(pattern.matches("/unknown-page/"));
        assert!(!pattern.matches(""));
        assert!(!pattern.matches("someone@site.com"));
    }

    #[test]
    fn test_case_sensitivity() {
        assert!(!PathPattern::Contains("/about/").matches("/About/"));
    }

    #[test]
    fn test_root() {
        assert!(PathPattern::Root.matches("/"));
        assert!(PathPattern::Root.matches(""));
        assert!(!PathPattern::Root.matches("//"));
        assert!(!PathPattern::Root.matches("/index.html"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(PathPattern::Contains("/about/").describe(), "contains '/about/'");
        assert_eq!(PathPattern::Root.describe(), "is '/' or empty");
    }
}
