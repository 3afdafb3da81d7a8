//! Splits raw text into maximal runs of word characters, punctuation, or
//! whitespace. Concatenating the tokens reproduces the input exactly.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Alphanumeric characters and underscore.
    Word,
    /// Non-word, non-whitespace characters.
    Punct,
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    /// True for purely alphanumeric tokens. Underscore runs classify as
    /// `Word` but are not words for pipeline purposes.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word && self.text.chars().all(char::is_alphanumeric)
    }
}

fn classify(c: char) -> TokenKind {
    if c.is_alphanumeric() || c == '_' {
        TokenKind::Word
    } else if c.is_whitespace() {
        TokenKind::Whitespace
    } else {
        TokenKind::Punct
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&first) = chars.peek() {
        let kind = classify(first);
        let mut run = String::new();
        while let Some(&c) = chars.peek() {
            if classify(c) != kind {
                break;
            }
            run.push(c);
            chars.next();
        }
        tokens.push(Token { text: run, kind });
    }

    tokens
}
