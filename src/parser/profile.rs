//! Language profile: the vocabulary tables the declaration parser consults
//!
//! The parser never hard-codes which identifiers start a declaration or which
//! characters open and close a scope; both come from a [`LanguageProfile`]
//! handed to it at construction.

use rustc_hash::{FxHashMap, FxHashSet};

/// Type keywords of the default C subset.
pub const DEFAULT_TYPE_KEYWORDS: &[&str] = &["void", "char", "short", "int", "long", "float", "double"];

/// Opening → closing bracket pairs of the default C subset.
pub const DEFAULT_BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

/// Immutable lookup tables for the declaration parser.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    type_keywords: FxHashSet<String>,
    brackets: FxHashMap<char, char>,
}

impl LanguageProfile {
    pub fn new<K, S>(type_keywords: K, brackets: &[(char, char)]) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_keywords: type_keywords.into_iter().map(Into::into).collect(),
            brackets: brackets.iter().copied().collect(),
        }
    }

    /// Add one more type keyword.
    pub fn with_type_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.type_keywords.insert(keyword.into());
        self
    }

    pub fn is_type_keyword(&self, word: &str) -> bool {
        self.type_keywords.contains(word)
    }

    /// The closing character for an opening bracket.
    pub fn closing_for(&self, open: char) -> Option<char> {
        self.brackets.get(&open).copied()
    }

    pub fn is_opening(&self, ch: char) -> bool {
        self.brackets.contains_key(&ch)
    }

    pub fn is_closing(&self, ch: char) -> bool {
        self.brackets.values().any(|&close| close == ch)
    }

    /// Type keywords in sorted order, for display.
    pub fn type_keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.type_keywords.iter().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        LanguageProfile::new(DEFAULT_TYPE_KEYWORDS.iter().copied(), DEFAULT_BRACKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = LanguageProfile::default();
        assert!(profile.is_type_keyword("int"));
        assert!(profile.is_type_keyword("double"));
        assert!(!profile.is_type_keyword("return"));
        assert_eq!(profile.closing_for('{'), Some('}'));
        assert_eq!(profile.closing_for(')'), None);
        assert!(profile.is_opening('['));
        assert!(profile.is_closing(']'));
        assert!(!profile.is_closing('('));
    }

    #[test]
    fn test_extended_profile() {
        let profile = LanguageProfile::default().with_type_keyword("size_t");
        assert!(profile.is_type_keyword("size_t"));
        assert_eq!(profile.type_keywords().len(), DEFAULT_TYPE_KEYWORDS.len() + 1);
    }

    #[test]
    fn test_custom_brackets() {
        let profile = LanguageProfile::new(["int"], &[('<', '>')]);
        assert!(profile.is_opening('<'));
        assert!(!profile.is_opening('('));
        assert_eq!(profile.type_keywords(), vec!["int"]);
    }
}
