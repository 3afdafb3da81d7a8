//! Stateful input session managing composition and candidate selection.
//!
//! `InputSession` owns the current Latin buffer and processes each
//! keystroke, returning responses the embedding frontend translates into
//! editor calls. Transliteration itself is delegated to a shared
//! [`Transliterator`]; the session only decides when to compose, what to
//! show, and what to commit.

mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::debug_span;

use lipi_core::Transliterator;

pub use types::{CandidateAction, KeyEvent, KeyResponse, MarkedText};

use types::cyclic_index;

/// Stateful session encapsulating all key handling.
pub struct InputSession {
    engine: Arc<Transliterator>,
    /// Raw Latin text typed so far; empty means idle.
    buffer: String,
    /// Index into the current candidate list.
    selected: usize,
}

impl InputSession {
    pub fn new(engine: Arc<Transliterator>) -> Self {
        Self {
            engine,
            buffer: String::new(),
            selected: 0,
        }
    }

    pub fn is_composing(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn composed_string(&self) -> String {
        self.buffer.clone()
    }

    /// Candidate surfaces for the current buffer: the Bengali rendering
    /// first, the raw Latin text second as an opt-out.
    pub fn candidates(&self) -> Vec<String> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        let bengali = self.engine.transliterate(&self.buffer);
        if bengali == self.buffer {
            vec![self.buffer.clone()]
        } else {
            vec![bengali, self.buffer.clone()]
        }
    }

    /// Process a key event. Returns a response describing what the
    /// caller should do; `consumed == false` means the key should be
    /// forwarded to the application untouched.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        match event {
            KeyEvent::Text(c) if c.is_ascii_alphabetic() => {
                self.buffer.push(c);
                self.selected = 0;
                self.show_composition()
            }

            // Any other printable character ends the word: commit the
            // selected candidate with the character appended.
            KeyEvent::Text(c) if self.is_composing() => {
                let mut text = self.take_selected_candidate();
                text.push(c);
                self.commit_response(text)
            }
            KeyEvent::Text(_) => KeyResponse::not_consumed(),

            KeyEvent::Space if self.is_composing() => {
                let mut text = self.take_selected_candidate();
                text.push(' ');
                self.commit_response(text)
            }
            KeyEvent::Space => KeyResponse::not_consumed(),

            KeyEvent::Enter if self.is_composing() => {
                let text = self.take_selected_candidate();
                self.commit_response(text)
            }
            KeyEvent::Enter => KeyResponse::not_consumed(),

            KeyEvent::Backspace if self.is_composing() => {
                self.buffer.pop();
                self.selected = 0;
                if self.buffer.is_empty() {
                    let mut resp = KeyResponse::consumed();
                    resp.marked = Some(MarkedText {
                        text: String::new(),
                    });
                    resp.candidates = CandidateAction::Hide;
                    resp
                } else {
                    self.show_composition()
                }
            }
            KeyEvent::Backspace => KeyResponse::not_consumed(),

            KeyEvent::Escape if self.is_composing() => {
                self.reset();
                let mut resp = KeyResponse::consumed();
                resp.marked = Some(MarkedText {
                    text: String::new(),
                });
                resp.candidates = CandidateAction::Hide;
                resp
            }
            KeyEvent::Escape => KeyResponse::not_consumed(),

            KeyEvent::ArrowDown if self.is_composing() => self.navigate(1),
            KeyEvent::ArrowUp if self.is_composing() => self.navigate(-1),
            KeyEvent::ArrowDown | KeyEvent::ArrowUp => KeyResponse::not_consumed(),

            KeyEvent::SelectCandidate(idx) if self.is_composing() => {
                let surfaces = self.candidates();
                match surfaces.into_iter().nth(idx) {
                    Some(text) => {
                        self.reset();
                        self.commit_response(text)
                    }
                    None => KeyResponse::consumed(),
                }
            }
            KeyEvent::SelectCandidate(_) => KeyResponse::not_consumed(),
        }
    }

    /// Commit the current composition (called when the frontend takes
    /// focus away mid-word).
    pub fn commit(&mut self) -> KeyResponse {
        if !self.is_composing() {
            return KeyResponse::not_consumed();
        }
        let text = self.take_selected_candidate();
        self.commit_response(text)
    }

    fn navigate(&mut self, delta: i32) -> KeyResponse {
        let surfaces = self.candidates();
        self.selected = cyclic_index(self.selected, delta, surfaces.len());
        let mut resp = KeyResponse::consumed();
        resp.marked = Some(MarkedText {
            text: self.buffer.clone(),
        });
        resp.candidates = CandidateAction::Show {
            surfaces,
            selected: self.selected,
        };
        resp
    }

    fn show_composition(&self) -> KeyResponse {
        let mut resp = KeyResponse::consumed();
        resp.marked = Some(MarkedText {
            text: self.buffer.clone(),
        });
        resp.candidates = CandidateAction::Show {
            surfaces: self.candidates(),
            selected: self.selected,
        };
        resp
    }

    /// Selected candidate surface, clearing the buffer.
    fn take_selected_candidate(&mut self) -> String {
        let surfaces = self.candidates();
        let text = surfaces
            .get(self.selected)
            .or_else(|| surfaces.first())
            .cloned()
            .unwrap_or_else(|| self.buffer.clone());
        self.reset();
        text
    }

    fn commit_response(&mut self, text: String) -> KeyResponse {
        let mut resp = KeyResponse::consumed();
        resp.commit = Some(text);
        resp.marked = Some(MarkedText {
            text: String::new(),
        });
        resp.candidates = CandidateAction::Hide;
        resp
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.selected = 0;
    }
}
