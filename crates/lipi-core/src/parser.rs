//! Greedy contextual phonetic parser — the fallback that turns any
//! Banglish word into Bengali script when no table resolves it.
//!
//! At each cursor position the parser tries chunk lengths from the
//! longest mapping key down to one, and at each length tests rules in a
//! fixed priority: fola attachment, geminate consonant, contextual repha,
//! plain consonant, vowel. A character no rule matches passes through
//! verbatim and resets all context. The delicate part is the implicit
//! inherent vowel: a written "o" right after a consonant is often the
//! consonant's invisible default vowel and must be dropped, decided by a
//! weighted lookahead over the following consonant cluster.

use tracing::{debug, debug_span};

use crate::mapping::MappingTable;

/// Inherent-vowel suppressor (hasant). Joins consonants into conjuncts.
const VIRAMA: char = '\u{09cd}';

/// Bengali "ra" + virama: the pre-consonant repha form of "r".
const REPHA: &str = "\u{09b0}\u{09cd}";

/// Independent inherent-vowel letter, used for a word-initial "o".
const INHERENT_VOWEL: &str = "\u{0985}";

/// Per-word scan state. A fresh value is created for every `parse` call
/// and threaded through each step; the parser object itself stays
/// immutable so parsing is reentrant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ParserState {
    cursor: usize,
    last_was_consonant: bool,
    implicit_vowel_dropped: bool,
    /// The literal key last matched, for the geminate and trailing-"o" rules.
    last_parsed_chunk: Option<String>,
}

impl ParserState {
    fn after_consonant(cursor: usize, chunk: String) -> Self {
        Self {
            cursor,
            last_was_consonant: true,
            implicit_vowel_dropped: false,
            last_parsed_chunk: Some(chunk),
        }
    }

    fn after_vowel(cursor: usize) -> Self {
        Self {
            cursor,
            last_was_consonant: false,
            implicit_vowel_dropped: false,
            last_parsed_chunk: None,
        }
    }

    fn after_dropped_vowel(cursor: usize) -> Self {
        Self {
            cursor,
            last_was_consonant: false,
            implicit_vowel_dropped: true,
            last_parsed_chunk: None,
        }
    }
}

#[derive(Debug)]
pub struct PhoneticParser {
    table: MappingTable,
}

impl PhoneticParser {
    pub fn new(table: MappingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Transliterates a single token. Pure and total: every input
    /// terminates with the whole token consumed, unmapped characters
    /// copied through unchanged.
    pub fn parse(&self, token: &str) -> String {
        let _span = debug_span!("parse", %token).entered();

        let chars: Vec<char> = token.chars().collect();
        let mut out = String::with_capacity(token.len() * 2);
        let mut state = ParserState::default();

        while state.cursor < chars.len() {
            state = self.step(&chars, state, &mut out);
        }

        out
    }

    /// Consumes one chunk (or one literal character) and returns the next
    /// state. Longest chunk length wins; within a length, rule priority
    /// is fola > geminate > repha > consonant > vowel.
    fn step(&self, chars: &[char], state: ParserState, out: &mut String) -> ParserState {
        let n = chars.len();

        for len in (1..=self.table.max_key_len()).rev() {
            if state.cursor + len > n {
                continue;
            }
            let chunk: String = chars[state.cursor..state.cursor + len].iter().collect();
            let next_cursor = state.cursor + len;

            // Fola attachment: folas stack, so consonant context persists.
            if state.last_was_consonant {
                if let Some(fola) = self.table.fola(&chunk) {
                    if out.ends_with(VIRAMA) {
                        // A repha already left a trailing virama; emit only
                        // the fola's remainder to avoid doubling it.
                        out.push_str(fola.strip_prefix(VIRAMA).unwrap_or(fola));
                    } else {
                        out.push_str(fola);
                    }
                    return ParserState::after_consonant(next_cursor, chunk);
                }
            }

            // Geminate: the same single-letter consonant typed twice forms
            // a true doubled consonant via an explicit virama.
            if state.last_was_consonant
                && len == 1
                && state.last_parsed_chunk.as_deref() == Some(chunk.as_str())
            {
                if let Some(glyph) = self.table.consonant(&chunk) {
                    out.push(VIRAMA);
                    out.push_str(glyph);
                    return ParserState::after_consonant(next_cursor, chunk);
                }
            }

            // Contextual repha: "r" between a fully pronounced vowel and a
            // consonant. After an elided inherent vowel, "r" stays an
            // ordinary consonant instead.
            if !state.last_was_consonant
                && chunk == "r"
                && state.cursor + 1 < n
                && !state.implicit_vowel_dropped
            {
                let next: String = chars[state.cursor + 1].to_string();
                if self.table.is_consonant(&next) {
                    debug!(at = state.cursor, "repha");
                    out.push_str(REPHA);
                    return ParserState::after_consonant(next_cursor, chunk);
                }
            }

            if let Some(glyph) = self.table.consonant(&chunk) {
                out.push_str(glyph);
                return ParserState::after_consonant(next_cursor, chunk);
            }

            if let Some(glyph) = self.table.vowel(&chunk) {
                return self.emit_vowel(chars, &state, &chunk, glyph, len, out);
            }
        }

        // Unmapped character: copy it through; no consonant context
        // survives.
        out.push(chars[state.cursor]);
        ParserState::after_vowel(state.cursor + 1)
    }

    fn emit_vowel(
        &self,
        chars: &[char],
        state: &ParserState,
        chunk: &str,
        glyph: &str,
        len: usize,
        out: &mut String,
    ) -> ParserState {
        let next_cursor = state.cursor + len;
        let is_o = chunk.eq_ignore_ascii_case("o");

        if state.last_was_consonant {
            if is_o && self.should_drop_inherent(chars, state, len) {
                debug!(at = state.cursor, "inherent vowel dropped");
                return ParserState::after_dropped_vowel(next_cursor);
            }
            // Dependent sign when the vowel has one, else the independent
            // letter.
            match self.table.kar(chunk) {
                Some(kar) => out.push_str(kar),
                None => out.push_str(glyph),
            }
            return ParserState::after_vowel(next_cursor);
        }

        // Independent vowel. A word-initial "o" is the inherent-vowel
        // letter, not the "o" vowel letter.
        if state.cursor == 0 && chunk == "o" {
            out.push_str(INHERENT_VOWEL);
        } else {
            out.push_str(glyph);
        }
        ParserState::after_vowel(next_cursor)
    }

    /// Decides whether a written "o" after a consonant is the silent
    /// inherent vowel. Re-tokenizes the remainder greedily against the
    /// consonant table, weighting conjunct glyphs (Bengali length > 1)
    /// double.
    fn should_drop_inherent(&self, chars: &[char], state: &ParserState, len: usize) -> bool {
        let after = state.cursor + len;

        if after == chars.len() {
            // Trailing "o" is kept (bhalo), unless the consonant before it
            // already maps to a conjunct that absorbs the vowel.
            if let Some(glyph) = state
                .last_parsed_chunk
                .as_deref()
                .and_then(|prev| self.table.consonant(prev))
            {
                return glyph.chars().count() > 1;
            }
            return false;
        }

        let rest = &chars[after..];
        let mut weight = 0usize;
        let mut pos = 0usize;

        'scan: while pos < rest.len() {
            for key_len in (1..=self.table.max_key_len()).rev() {
                if pos + key_len > rest.len() {
                    continue;
                }
                let key: String = rest[pos..pos + key_len].iter().collect();
                if let Some(glyph) = self.table.consonant(&key) {
                    weight += if glyph.chars().count() > 1 { 2 } else { 1 };
                    pos += key_len;
                    continue 'scan;
                }
            }
            break;
        }

        match weight {
            // A vowel follows directly: the "o" is pronounced.
            0 => false,
            // Exactly one plain consonant and then the word ends.
            1 if pos == rest.len() => {
                // Verb-suffix spellings like "ghuchanor" keep the vowel:
                // "n"/"l" followed by a bare trailing "r".
                let prev = state.last_parsed_chunk.as_deref();
                let trailing_r = rest.len() == 1 && rest[0] == 'r';
                !((prev == Some("n") || prev == Some("l")) && trailing_r)
            }
            1 => false,
            // A consonant cluster follows: the vowel is elided.
            _ => true,
        }
    }
}
