//! Banglish → Bengali transliteration pipeline.
//!
//! Text flows through a fixed per-token precedence chain: normalizer →
//! dictionary override → suffix-stripped root lookup → regex pattern
//! fallback → greedy contextual phonetic parse. `Transliterator` is the
//! single entry point; all tables are loaded once at construction and
//! never mutated, so `transliterate` is a pure function of its input.

pub mod dictionary;
pub mod engine;
mod error;
pub mod mapping;
pub mod normalizer;
pub mod parser;
pub mod patterns;
pub mod suffix;
pub mod tokenizer;

pub use engine::Transliterator;
pub use error::LoadError;
