//! Lexer for Clean tag statements using logos
//!
//! The lexicon is tiny: braces, a colon, and identifiers. An identifier is
//! either a run of letters or a single-quoted string, quotes included.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Token kinds for Clean syntax
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(":")]
    Colon,

    // Bare words and quoted strings share a kind; the quotes stay in the text
    #[regex(r"[a-zA-Z]+")]
    #[regex(r"'[^']*'")]
    Id,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::OpenBrace => write!(f, "'{{'"),
            TokenKind::CloseBrace => write!(f, "'}}'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Id => write!(f, "identifier"),
        }
    }
}

/// Span information for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl From<std::ops::Range<usize>> for TokenSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// A classified slice of the source with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: TokenSpan,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: impl Into<TokenSpan>) -> Self {
        Self {
            kind,
            text,
            span: span.into(),
        }
    }

    /// The `(kind, text)` pair, without position
    pub fn as_pair(&self) -> (TokenKind, &'src str) {
        (self.kind, self.text)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Id => write!(f, "identifier '{}'", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub span: TokenSpan,
    pub found: char,
}

/// Lex source code into tokens with spans
pub fn lex(source: &str) -> impl Iterator<Item = Result<Token<'_>, LexError>> + '_ {
    TokenKind::lexer(source)
        .spanned()
        .map(move |(result, span)| match result {
            Ok(kind) => Ok(Token::new(kind, &source[span.clone()], span)),
            Err(()) => Err(LexError {
                found: source[span.start..].chars().next().unwrap_or('\u{FFFD}'),
                span: span.into(),
            }),
        })
}

/// Tokenize a whole source string, stopping at the first invalid character
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    lex(source).collect()
}
