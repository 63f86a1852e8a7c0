//! Case-insensitive substring matching.
//!
//! Every name-based lookup in the store uses "contains" semantics rather
//! than exact equality: the pattern `"zangetsu"` matches the stored name
//! `"Tensa Zangetsu"`. The pattern text itself is treated literally.

use regex::{Regex, RegexBuilder};

/// Compiled case-insensitive substring matcher.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    /// Compiles a matcher for the given pattern text.
    pub fn new(pattern: &str) -> Self {
        let regex = RegexBuilder::new(&regex::escape(pattern))
            .case_insensitive(true)
            .build()
            .expect("escaped literal is always a valid regex");
        Self { regex }
    }

    /// Returns whether the candidate contains the pattern, ignoring case.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let pattern = NamePattern::new("getsu");
        assert!(pattern.matches("Zangetsu"));
        assert!(pattern.matches("Tensa Zangetsu"));
        assert!(!pattern.matches("Senbonzakura"));
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = NamePattern::new("ZANGETSU");
        assert!(pattern.matches("zangetsu"));
        assert!(NamePattern::new("ichigo").matches("Ichigo"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let pattern = NamePattern::new("");
        assert!(pattern.matches("anything"));
        assert!(pattern.matches(""));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let pattern = NamePattern::new("zan.getsu");
        assert!(!pattern.matches("zangetsu"));
        assert!(pattern.matches("zan.getsu"));
    }
}
