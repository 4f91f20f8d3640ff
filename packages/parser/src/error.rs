//! Error types for the Clean parser

use crate::lexer::{LexError, TokenKind, TokenSpan};
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for combinators over the token cursor
pub type MatchResult<T> = Result<T, ParseFailure>;

/// A recoverable mismatch at a token index.
///
/// Raised by token matches and caught by the nearest enclosing rule attempt,
/// which rewinds the cursor before passing it on. `status` is always `false`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no match at token {pre_offset}")]
pub struct ParseFailure {
    pub pre_offset: usize,
    pub post_offset: usize,
    pub status: bool,
    pub expected: Option<TokenKind>,
    pub found: Option<TokenKind>,
}

impl ParseFailure {
    pub fn at(index: usize) -> Self {
        Self {
            pre_offset: index,
            post_offset: index,
            status: false,
            expected: None,
            found: None,
        }
    }

    pub fn expecting(mut self, kind: TokenKind) -> Self {
        self.expected = Some(kind);
        self
    }

    pub fn found(mut self, kind: Option<TokenKind>) -> Self {
        self.found = kind;
        self
    }
}

/// Parse error with location and context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Lexer error at {span:?}: unexpected character {found:?}")]
    LexError { span: TokenSpan, found: char },

    #[error("Unexpected token at {span:?}: expected {expected}, found {found}")]
    UnexpectedToken {
        span: TokenSpan,
        expected: String,
        found: String,
        failure: ParseFailure,
    },
}

impl ParseError {
    pub fn span(&self) -> TokenSpan {
        match self {
            ParseError::LexError { span, .. } => *span,
            ParseError::UnexpectedToken { span, .. } => *span,
        }
    }

    /// The cursor failure behind this error, if it came from the parser
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParseError::UnexpectedToken { failure, .. } => Some(failure),
            ParseError::LexError { .. } => None,
        }
    }

    /// Short description of what went wrong at `span()`
    pub fn label(&self) -> String {
        match self {
            ParseError::LexError { found, .. } => format!("{:?} is not valid here", found),
            ParseError::UnexpectedToken { expected, .. } => format!("expected {}", expected),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::LexError {
            span: err.span,
            found: err.found,
        }
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    pub fn format_error(error: &ParseError, filename: &str, source: &str) -> String {
        let span = error.span();

        // Errors at end of input point one column past the text
        let mut text = source.to_string();
        if span.start >= source.len() {
            text.push(' ');
        }

        // Spans are byte offsets; ariadne counts chars
        let start = char_index(&text, span.start);
        let end = char_index(&text, span.end).max(start + 1);

        let report = Report::build(ReportKind::Error, filename, start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, start..end))
                    .with_color(Color::Red)
                    .with_message(error.label()),
            )
            .finish();

        let mut output = Vec::new();
        if report
            .write((filename, Source::from(text.as_str())), &mut output)
            .is_err()
        {
            return error.to_string();
        }

        String::from_utf8(output).unwrap_or_else(|_| error.to_string())
    }

    fn char_index(text: &str, byte: usize) -> usize {
        text.get(..byte)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| text.chars().count())
    }
}
