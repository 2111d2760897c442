//! Keyword matching over free-text facility fields.
//!
//! Service descriptions and violation narratives arrive as unstructured
//! text, so scoring detects program features by case-insensitive
//! substring search against configurable keyword rules. Substring (not
//! whole-word) semantics are intentional: "ratio" must match
//! "ratios observed at visit".

use serde::{Deserialize, Serialize};

/// A labeled keyword set with the bonus (or penalty) weight it carries.
/// Rules are ordered strongest-first in config tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordRule {
    pub label: String,
    pub keywords: Vec<String>,
    pub weight: f64,
}

impl KeywordRule {
    pub fn new(label: &str, keywords: &[&str], weight: f64) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight,
        }
    }

    /// True when any keyword occurs in the haystack. The haystack must
    /// already be normalized; keywords are normalized here so that
    /// hand-edited config files work regardless of case.
    pub fn matches(&self, haystack: &str) -> bool {
        contains_any(&self.keywords, haystack)
    }
}

/// Normalize free text for matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// True when any keyword occurs in the normalized haystack.
pub fn contains_any(keywords: &[String], haystack: &str) -> bool {
    keywords
        .iter()
        .any(|keyword| haystack.contains(normalize(keyword).as_str()))
}

/// Sum the weights of every matching rule, counting each rule at most
/// once, capped.
pub fn capped_bonus(rules: &[KeywordRule], haystack: &str, cap: f64) -> f64 {
    let sum: f64 = rules
        .iter()
        .filter(|rule| rule.matches(haystack))
        .map(|rule| rule.weight)
        .sum();
    sum.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<KeywordRule> {
        vec![
            KeywordRule::new("premium", &["montessori", "reggio"], 0.8),
            KeywordRule::new("stem", &["STEM"], 0.5),
            KeywordRule::new("generic", &["curriculum"], 0.3),
        ]
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let haystack = normalize("Montessori-inspired curriculum for ages 2-5");
        assert!(rules()[0].matches(&haystack));
        assert!(rules()[2].matches(&haystack));
        assert!(!rules()[1].matches(&haystack));
    }

    #[test]
    fn keywords_normalize_even_when_config_is_mixed_case() {
        // "STEM" in the rule table still matches lowercased text.
        let haystack = normalize("after-school stem club");
        assert!(rules()[1].matches(&haystack));
    }

    #[test]
    fn capped_bonus_counts_each_rule_once() {
        // "montessori" and "reggio" are one rule: 0.8, not 1.6.
        let haystack = normalize("Montessori and Reggio Emilia blended curriculum");
        let bonus = capped_bonus(&rules(), &haystack, 10.0);
        assert!((bonus - 1.1).abs() < 1e-9);
    }

    #[test]
    fn capped_bonus_respects_cap() {
        let haystack = normalize("montessori stem curriculum");
        let bonus = capped_bonus(&rules(), &haystack, 1.0);
        assert!((bonus - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_keyword_table_never_matches() {
        assert!(!contains_any(&[], "anything"));
        assert_eq!(capped_bonus(&[], "anything", 1.0), 0.0);
    }
}
