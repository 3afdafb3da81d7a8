//! Fixed inflectional suffix stripping, so the dictionary can match a
//! known root under a plural, case, or classifier ending.

/// Scanned in declared order; the first suffix the word ends with wins.
/// The list is not a longest-match table, and the repeated `gulo` entry
/// is part of the declared-order contract.
pub const SUFFIX_RULES: &[(&str, &str)] = &[
    ("gulo", "গুলো"),
    ("gula", "গুলা"),
    ("gulo", "গুলো"),
    ("der", "দের"),
    ("ra", "রা"),
    ("ta", "টা"),
    ("ti", "টি"),
    ("te", "তে"),
    ("ke", "কে"),
    ("er", "ের"),
];

/// Splits a known ending off `word`, returning the root and the Bengali
/// suffix grapheme. A rule only applies when the root keeps at least two
/// characters; shorter candidates are skipped and scanning continues.
pub fn strip_suffix(word: &str) -> (&str, Option<&'static str>) {
    for (latin, bengali) in SUFFIX_RULES {
        if word.ends_with(latin) && word.chars().count() > latin.len() + 1 {
            return (&word[..word.len() - latin.len()], Some(bengali));
        }
    }
    (word, None)
}
