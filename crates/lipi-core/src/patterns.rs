//! Ordered regex fallback for whole-word idioms not worth dictionary
//! entries. All patterns compile once at load time; application is
//! first-match-wins in declared order, never re-sorted.

use regex::Regex;
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize)]
struct PatternFile {
    #[serde(default)]
    patterns: Vec<RawPattern>,
}

#[derive(Deserialize)]
struct RawPattern {
    regex: String,
    replace: String,
}

#[derive(Debug, Default)]
pub struct PatternSet {
    rules: Vec<(Regex, String)>,
}

impl PatternSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let file: PatternFile = serde_json::from_str(json)?;
        let mut rules = Vec::with_capacity(file.patterns.len());
        for raw in file.patterns {
            let regex = Regex::new(&raw.regex).map_err(|source| LoadError::Pattern {
                pattern: raw.regex.clone(),
                source,
            })?;
            rules.push((regex, raw.replace));
        }
        Ok(Self { rules })
    }

    /// Rewrites `word` via the first rule whose pattern is found anywhere
    /// in it (unanchored search). The rewritten word is final output; no
    /// further phonetic processing follows a pattern hit.
    pub fn apply(&self, word: &str) -> Option<String> {
        for (regex, replace) in &self.rules {
            if regex.is_match(word) {
                return Some(regex.replace_all(word, replace.as_str()).into_owned());
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rules: &[(&str, &str)]) -> PatternSet {
        let patterns: Vec<String> = rules
            .iter()
            .map(|(re, rep)| format!(r#"{{"regex": "{re}", "replace": "{rep}"}}"#))
            .collect();
        let json = format!(r#"{{"patterns": [{}]}}"#, patterns.join(","));
        PatternSet::from_json_str(&json).unwrap()
    }

    #[test]
    fn first_match_wins_in_declared_order() {
        let rules = set(&[("^hm+$", "হুম"), ("^h", "X")]);
        assert_eq!(rules.apply("hmm").as_deref(), Some("হুম"));
    }

    #[test]
    fn unanchored_search_rewrites_the_match() {
        let rules = set(&[("tnx", "থ্যাংকস")]);
        assert_eq!(rules.apply("tnxbro").as_deref(), Some("থ্যাংকসbro"));
    }

    #[test]
    fn no_match_falls_through() {
        let rules = set(&[("^ok+$", "ওকে")]);
        assert_eq!(rules.apply("okay"), None);
    }

    #[test]
    fn empty_file_yields_empty_set() {
        let rules = PatternSet::from_json_str("{}").unwrap();
        assert!(rules.is_empty());
        assert_eq!(rules.apply("anything"), None);
    }

    #[test]
    fn invalid_regex_is_a_load_error() {
        let err = PatternSet::from_json_str(r#"{"patterns": [{"regex": "(", "replace": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Pattern { .. }));
    }
}
