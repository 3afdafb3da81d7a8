//! The four Latin → Bengali grapheme maps driving the phonetic parser.
//!
//! `vowels` and `consonants` hold independent letters, `kars` the
//! dependent vowel signs attached to a preceding consonant, and `folas`
//! the subscript conjunct forms. Parsing always tries the longest key
//! first, so the table precomputes the longest key length across all
//! four maps.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize)]
struct MappingFile {
    #[serde(default)]
    vowels: HashMap<String, String>,
    #[serde(default)]
    consonants: HashMap<String, String>,
    #[serde(default)]
    kars: HashMap<String, String>,
    #[serde(default)]
    folas: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MappingTable {
    vowels: HashMap<String, String>,
    consonants: HashMap<String, String>,
    kars: HashMap<String, String>,
    folas: HashMap<String, String>,
    max_key_len: usize,
}

impl MappingTable {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let file: MappingFile = serde_json::from_str(json)?;
        Self::from_parts(file.vowels, file.consonants, file.kars, file.folas)
    }

    pub fn from_parts(
        vowels: HashMap<String, String>,
        consonants: HashMap<String, String>,
        kars: HashMap<String, String>,
        folas: HashMap<String, String>,
    ) -> Result<Self, LoadError> {
        let tables = [
            ("vowels", &vowels),
            ("consonants", &consonants),
            ("kars", &kars),
            ("folas", &folas),
        ];

        for (name, table) in &tables {
            if table.keys().any(|k| k.is_empty()) {
                return Err(LoadError::EmptyKey { table: name });
            }
        }

        let max_key_len = tables
            .iter()
            .flat_map(|(_, table)| table.keys())
            .map(|k| k.chars().count())
            .max()
            .ok_or(LoadError::EmptyMapping)?;

        Ok(Self {
            vowels,
            consonants,
            kars,
            folas,
            max_key_len,
        })
    }

    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn vowel(&self, key: &str) -> Option<&str> {
        self.vowels.get(key).map(String::as_str)
    }

    pub fn consonant(&self, key: &str) -> Option<&str> {
        self.consonants.get(key).map(String::as_str)
    }

    pub fn kar(&self, key: &str) -> Option<&str> {
        self.kars.get(key).map(String::as_str)
    }

    pub fn fola(&self, key: &str) -> Option<&str> {
        self.folas.get(key).map(String::as_str)
    }

    pub fn is_consonant(&self, key: &str) -> bool {
        self.consonants.contains_key(key)
    }
}
