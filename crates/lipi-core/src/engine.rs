//! Pipeline orchestration: fixed per-token precedence with the phonetic
//! parser as the final fallback.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, debug_span, warn};

use crate::dictionary::Dictionary;
use crate::error::LoadError;
use crate::mapping::MappingTable;
use crate::normalizer::normalize;
use crate::parser::PhoneticParser;
use crate::patterns::PatternSet;
use crate::suffix::strip_suffix;
use crate::tokenizer::{tokenize, Token, TokenKind};

/// Endings users sometimes type as a separate word ("mon e" for "mone").
/// The pre-pass glues them back onto the preceding word.
const DETACHED_SUFFIXES: &[&str] = &["e", "er", "te", "k", "ke", "re", "der"];

/// Which pipeline layer resolved a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Dictionary,
    RootAndSuffix { root: String, suffix: &'static str },
    Pattern,
    Phonetic,
}

/// Diagnostic trace of a single word through the precedence chain.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub normalized: String,
    pub resolution: Resolution,
    pub output: String,
}

#[derive(Debug)]
pub struct Transliterator {
    dictionary: Dictionary,
    patterns: PatternSet,
    parser: PhoneticParser,
}

impl Transliterator {
    /// Loads the three data files from `data_dir`. A missing dictionary
    /// or pattern file degrades to an empty table; a missing or empty
    /// mapping file is fatal, since without it the parser would echo its
    /// input back.
    pub fn new(data_dir: &Path) -> Result<Self, LoadError> {
        let mapping_path = data_dir.join("mapping.json");
        let mapping_json = match fs::read_to_string(&mapping_path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::MissingMapping(mapping_path));
            }
            Err(e) => return Err(e.into()),
        };
        let mapping = MappingTable::from_json_str(&mapping_json)?;

        let dictionary = match fs::read_to_string(data_dir.join("dictionary.json")) {
            Ok(json) => Dictionary::from_json_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("dictionary.json not found; continuing without overrides");
                Dictionary::empty()
            }
            Err(e) => return Err(e.into()),
        };

        let patterns = match fs::read_to_string(data_dir.join("patterns.json")) {
            Ok(json) => PatternSet::from_json_str(&json)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("patterns.json not found; continuing without pattern rules");
                PatternSet::empty()
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            dictionary = dictionary.len(),
            patterns = patterns.len(),
            max_key_len = mapping.max_key_len(),
            "engine loaded"
        );

        Ok(Self::from_parts(mapping, dictionary, patterns))
    }

    pub fn from_parts(mapping: MappingTable, dictionary: Dictionary, patterns: PatternSet) -> Self {
        Self {
            dictionary,
            patterns,
            parser: PhoneticParser::new(mapping),
        }
    }

    /// The single operational entry point. Pure: identical input always
    /// yields identical output.
    pub fn transliterate(&self, text: &str) -> String {
        let _span = debug_span!("transliterate").entered();

        let fused = fuse_detached_suffixes(text);
        let mut out = String::with_capacity(fused.len() * 2);

        for token in tokenize(&fused) {
            if token.is_word() {
                out.push_str(&self.explain_word(&token.text).output);
            } else {
                // Non-word tokens go through the parser too; unmapped
                // characters survive verbatim, so punctuation, digits,
                // and whitespace pass through.
                out.push_str(&self.parser.parse(&token.text));
            }
        }

        out
    }

    /// Resolves one word and reports which layer produced the output.
    pub fn explain_word(&self, word: &str) -> Explanation {
        let normalized = normalize(word);

        if let Some(hit) = self.dictionary.lookup(&normalized) {
            return Explanation {
                normalized,
                resolution: Resolution::Dictionary,
                output: hit.to_string(),
            };
        }

        let (root, suffix) = strip_suffix(&normalized);
        if let Some(suffix) = suffix {
            if let Some(hit) = self.dictionary.lookup(root) {
                return Explanation {
                    output: format!("{hit}{suffix}"),
                    resolution: Resolution::RootAndSuffix {
                        root: root.to_string(),
                        suffix,
                    },
                    normalized,
                };
            }
        }

        if let Some(rewritten) = self.patterns.apply(&normalized) {
            return Explanation {
                normalized,
                resolution: Resolution::Pattern,
                output: rewritten,
            };
        }

        Explanation {
            output: self.parser.parse(&normalized),
            resolution: Resolution::Phonetic,
            normalized,
        }
    }

    pub fn parser(&self) -> &PhoneticParser {
        &self.parser
    }
}

/// Fuses `word + whitespace + suffix-word` back into one word when the
/// suffix token is followed by whitespace, terminal punctuation, or end
/// of input. Repairs inflectional endings typed as separate words.
fn fuse_detached_suffixes(text: &str) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len());
    let mut pending: Option<String> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];

        if let Some(word) = pending.as_mut() {
            if token.kind == TokenKind::Whitespace
                && word.ends_with(|c: char| c.is_ascii_alphabetic())
            {
                if let Some(next) = tokens.get(i + 1) {
                    if next.is_word()
                        && DETACHED_SUFFIXES.contains(&next.text.as_str())
                        && boundary_follows(&tokens, i + 2)
                    {
                        word.push_str(&next.text);
                        i += 2;
                        continue;
                    }
                }
            }
            if let Some(word) = pending.take() {
                out.push_str(&word);
            }
        }

        if token.is_word() {
            pending = Some(token.text.clone());
        } else {
            out.push_str(&token.text);
        }
        i += 1;
    }

    if let Some(word) = pending {
        out.push_str(&word);
    }

    out
}

fn boundary_follows(tokens: &[Token], idx: usize) -> bool {
    match tokens.get(idx) {
        None => true,
        Some(t) if t.kind == TokenKind::Whitespace => true,
        Some(t) => matches!(t.text.chars().next(), Some('.' | ',' | '!' | '?')),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
    }

    fn engine() -> Transliterator {
        Transliterator::new(&data_dir()).unwrap()
    }

    #[test]
    fn basic_words() {
        let t = engine();
        assert_eq!(t.transliterate("Ami"), "আমি");
        assert_eq!(t.transliterate("Tumi"), "তুমি");
        assert_eq!(t.transliterate("Bhai"), "ভাই");
        assert_eq!(t.transliterate("Vai"), "ভাই");
        assert_eq!(t.transliterate("Bhaiya"), "ভাইয়া");
    }

    #[test]
    fn sentences_preserve_whitespace() {
        let t = engine();
        assert_eq!(t.transliterate("Ami tomay bhalobashi"), "আমি তোমায় ভালোবাসি");
        assert_eq!(t.transliterate("Khub valo"), "খুব ভালো");
    }

    #[test]
    fn normalizer_substitution_runs_before_lookup() {
        assert_eq!(engine().transliterate("Tmi kothay"), "তুমি কোথায়");
    }

    #[test]
    fn dictionary_keys_match_after_substitution() {
        // The ph→f substitution runs before every lookup, so loanword
        // overrides are keyed under the substituted spelling.
        let t = engine();
        assert_eq!(t.transliterate("phone"), "ফোন");
        assert_eq!(t.transliterate("fone"), "ফোন");
        assert_eq!(t.explain_word("phone").resolution, Resolution::Dictionary);
    }

    #[test]
    fn phonetic_fallback() {
        let t = engine();
        assert_eq!(t.transliterate("v"), "ভ");
        assert_eq!(t.transliterate("faravi"), "ফারাভি");
        assert_eq!(t.transliterate("aam"), "আম");
    }

    #[test]
    fn folas_and_repha() {
        let t = engine();
        assert_eq!(t.transliterate("kya"), "ক্যা");
        assert_eq!(t.transliterate("pr"), "প্র");
        assert_eq!(t.transliterate("br"), "ব্র");
    }

    #[test]
    fn suffix_root_combines_with_dictionary() {
        let t = engine();
        assert_eq!(t.transliterate("boigulo"), "বইগুলো");
        assert_eq!(t.transliterate("barite"), "বাড়িতে");
        let e = t.explain_word("boigulo");
        assert!(matches!(e.resolution, Resolution::RootAndSuffix { .. }));
    }

    #[test]
    fn pattern_layer_rewrites_idioms() {
        let t = engine();
        assert_eq!(t.transliterate("hmm"), "হুম");
        assert_eq!(t.transliterate("haha"), "হাহা");
        assert_eq!(t.transliterate("ok"), "ওকে");
        let e = t.explain_word("hmm");
        assert_eq!(e.resolution, Resolution::Pattern);
    }

    #[test]
    fn non_letter_content_survives() {
        let t = engine();
        assert_eq!(t.transliterate("100%"), "100%");
        assert_eq!(t.transliterate("!?"), "!?");
        assert_eq!(t.transliterate("ami... tumi!"), "আমি... তুমি!");
    }

    #[test]
    fn transliterate_is_pure() {
        let t = engine();
        let first = t.transliterate("Ami tomay bhalobashi");
        for _ in 0..3 {
            assert_eq!(t.transliterate("Ami tomay bhalobashi"), first);
        }
    }

    #[test]
    fn explain_reports_the_resolving_layer() {
        let t = engine();
        assert_eq!(t.explain_word("Ami").resolution, Resolution::Dictionary);
        assert_eq!(t.explain_word("faravi").resolution, Resolution::Phonetic);
    }

    // --- pre-pass ---

    #[test]
    fn fuses_detached_suffix_at_end_of_input() {
        assert_eq!(fuse_detached_suffixes("mon e"), "mone");
    }

    #[test]
    fn fuses_detached_suffix_before_punctuation() {
        assert_eq!(fuse_detached_suffixes("mon e."), "mone.");
        assert_eq!(fuse_detached_suffixes("kajta ke!"), "kajtake!");
    }

    #[test]
    fn fuses_detached_suffix_before_whitespace() {
        assert_eq!(fuse_detached_suffixes("mon e kharap"), "mone kharap");
    }

    #[test]
    fn does_not_fuse_ordinary_words() {
        assert_eq!(fuse_detached_suffixes("mon bhalo"), "mon bhalo");
        // "ami" is not a detached suffix.
        assert_eq!(fuse_detached_suffixes("mon ami"), "mon ami");
    }

    #[test]
    fn does_not_fuse_after_digits() {
        assert_eq!(fuse_detached_suffixes("123 e"), "123 e");
    }

    #[test]
    fn chained_suffix_tokens_fuse_left_to_right() {
        assert_eq!(fuse_detached_suffixes("kajta k e"), "kajtake");
    }

    // --- loader error handling ---

    #[test]
    fn missing_mapping_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Transliterator::new(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingMapping(_)));
    }

    #[test]
    fn missing_dictionary_and_patterns_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(
            data_dir().join("mapping.json"),
            dir.path().join("mapping.json"),
        )
        .unwrap();
        let t = Transliterator::new(dir.path()).unwrap();
        // Dictionary layer is gone, so even "ami" goes phonetic.
        assert_eq!(t.transliterate("ami"), "আমি");
        assert_eq!(t.explain_word("ami").resolution, Resolution::Phonetic);
    }

    #[test]
    fn malformed_dictionary_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(
            data_dir().join("mapping.json"),
            dir.path().join("mapping.json"),
        )
        .unwrap();
        std::fs::write(dir.path().join("dictionary.json"), "not json").unwrap();
        assert!(matches!(
            Transliterator::new(dir.path()),
            Err(LoadError::Json(_))
        ));
    }
}
