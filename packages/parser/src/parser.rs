//! Backtracking cursor over a token stream
//!
//! Grammar code is written as plain functions taking `&mut Parser`. A rule is
//! tried with [`Parser::attempt_rule`] (or `Parser::match`); when it fails,
//! the cursor is put back where the attempt started, so a failed rule never
//! leaves the parser half-advanced.
//!
//! A `Parser` is mutable state. Give each parse its own instance.

use crate::error::{MatchResult, ParseError, ParseFailure};
use crate::lexer::{tokenize, LexError, Token, TokenKind, TokenSpan};
use tracing::trace;

/// Token cursor with transactional rule attempts
#[derive(Debug, Clone, Default)]
pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
}

/// Something the parser can match: a token kind or a rule function.
///
/// Token kinds yield the consumed token's text. Rule functions yield the text
/// of every token consumed while they ran.
pub trait Rule<'src> {
    type Output;

    fn apply(self, parser: &mut Parser<'src>) -> MatchResult<Self::Output>;
}

impl<'src> Rule<'src> for TokenKind {
    type Output = &'src str;

    fn apply(self, parser: &mut Parser<'src>) -> MatchResult<Self::Output> {
        parser.consume_expected_token(self)
    }
}

impl<'src, F> Rule<'src> for F
where
    F: FnOnce(&mut Parser<'src>) -> MatchResult<()>,
{
    type Output = Vec<&'src str>;

    fn apply(self, parser: &mut Parser<'src>) -> MatchResult<Self::Output> {
        parser.attempt_rule(self)
    }
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn from_source(source: &'src str) -> Result<Self, LexError> {
        Ok(Self::new(tokenize(source)?))
    }

    pub fn tokens(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn token_index(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos)
    }

    /// Kind of the token under the cursor; fails at end of input
    pub fn next_token_kind(&self) -> MatchResult<TokenKind> {
        self.peek()
            .map(|token| token.kind)
            .ok_or_else(|| ParseFailure::at(self.pos))
    }

    pub fn increment_token(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Text of the token just behind the cursor
    pub fn previous_token_value(&self) -> Option<&'src str> {
        self.pos
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map(|token| token.text)
    }

    /// Alias of [`Parser::previous_token_value`]
    pub fn last_token_value(&self) -> Option<&'src str> {
        self.previous_token_value()
    }

    /// Texts of the tokens in `[from, to)`, clamped to the stream
    pub fn token_values_from_to(&self, from: usize, to: usize) -> Vec<&'src str> {
        let to = to.min(self.tokens.len());
        let from = from.min(to);
        self.tokens[from..to].iter().map(|token| token.text).collect()
    }

    /// Consume the next token if it has the given kind
    pub fn consume_expected_token(&mut self, kind: TokenKind) -> MatchResult<&'src str> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let text = token.text;
                self.pos += 1;
                Ok(text)
            }
            other => Err(ParseFailure::at(self.pos)
                .expecting(kind)
                .found(other.map(|token| token.kind))),
        }
    }

    /// Run `rule` as one transaction.
    ///
    /// On success, returns the text of every token the rule consumed. On
    /// failure, the cursor is reset to where it was before the call and the
    /// failure is passed on.
    pub fn attempt_rule<F>(&mut self, rule: F) -> MatchResult<Vec<&'src str>>
    where
        F: FnOnce(&mut Self) -> MatchResult<()>,
    {
        let start = self.pos;

        match rule(self) {
            Ok(()) => Ok(self.token_values_from_to(start, self.pos)),
            Err(failure) => {
                trace!(from = self.pos, to = start, "rewinding failed rule");
                self.pos = start;
                Err(failure)
            }
        }
    }

    /// Match a token kind or a rule function
    pub fn r#match<R: Rule<'src>>(&mut self, rule: R) -> MatchResult<R::Output> {
        rule.apply(self)
    }

    /// Alias of `Parser::match`
    pub fn expect<R: Rule<'src>>(&mut self, rule: R) -> MatchResult<R::Output> {
        self.r#match(rule)
    }

    /// Turn a failure that escaped the grammar into a spanned error
    pub fn error_for(&self, failure: ParseFailure) -> ParseError {
        let token = self.tokens.get(failure.pre_offset);
        let span = token.map(|token| token.span).unwrap_or_else(|| {
            let end = self.tokens.last().map(|token| token.span.end).unwrap_or(0);
            TokenSpan { start: end, end }
        });

        ParseError::UnexpectedToken {
            span,
            expected: failure
                .expected
                .map(|kind| kind.to_string())
                .unwrap_or_else(|| "more input".to_string()),
            found: token
                .map(|token| token.to_string())
                .unwrap_or_else(|| "end of input".to_string()),
            failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(tokens: &[(TokenKind, &'static str)]) -> Parser<'static> {
        Parser::new(
            tokens
                .iter()
                .map(|&(kind, text)| Token::new(kind, text, 0..text.len()))
                .collect(),
        )
    }

    #[test]
    fn test_default_parser_is_empty() {
        let parser = Parser::default();
        assert_eq!(parser.token_index(), 0);
        assert!(parser.tokens().is_empty());
    }

    #[test]
    fn test_next_token_kind() {
        let mut parser = parser(&[(TokenKind::Id, "foo"), (TokenKind::OpenBrace, "{")]);
        assert_eq!(parser.next_token_kind(), Ok(TokenKind::Id));

        parser.increment_token();
        assert_eq!(parser.next_token_kind(), Ok(TokenKind::OpenBrace));
    }

    #[test]
    fn test_next_token_kind_at_end_fails() {
        let mut parser = parser(&[(TokenKind::Id, "foo")]);
        parser.increment_token();

        let failure = parser.next_token_kind().unwrap_err();
        assert_eq!(failure.pre_offset, 1);
        assert_eq!(failure.post_offset, 1);
        assert!(!failure.status);
    }

    #[test]
    fn test_increment_saturates() {
        let mut parser = parser(&[(TokenKind::Id, "foo")]);
        parser.increment_token();
        parser.increment_token();
        assert_eq!(parser.token_index(), 1);
    }

    #[test]
    fn test_consume_returns_text_and_advances() {
        let mut parser = parser(&[(TokenKind::Id, "foo")]);
        assert_eq!(parser.consume_expected_token(TokenKind::Id), Ok("foo"));
        assert_eq!(parser.token_index(), 1);
        assert_eq!(parser.previous_token_value(), Some("foo"));
        assert_eq!(parser.last_token_value(), Some("foo"));
    }

    #[test]
    fn test_consume_mismatch_leaves_cursor() {
        let mut parser = parser(&[(TokenKind::Colon, ":")]);

        let failure = parser.consume_expected_token(TokenKind::Id).unwrap_err();
        assert_eq!(failure.pre_offset, 0);
        assert_eq!(failure.post_offset, 0);
        assert!(!failure.status);
        assert_eq!(failure.expected, Some(TokenKind::Id));
        assert_eq!(failure.found, Some(TokenKind::Colon));
        assert_eq!(parser.token_index(), 0);
    }

    #[test]
    fn test_attempt_runs_rule() {
        let mut parser = Parser::default();
        let mut run = false;

        let consumed = parser
            .attempt_rule(|_| {
                run = true;
                Ok(())
            })
            .unwrap();

        assert!(run);
        assert!(consumed.is_empty());
    }

    #[test]
    fn test_attempt_returns_consumed_values() {
        let mut parser = parser(&[(TokenKind::Id, "one"), (TokenKind::Id, "two")]);

        let consumed = parser
            .attempt_rule(|p| {
                p.expect(TokenKind::Id)?;
                p.expect(TokenKind::Id)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(consumed, vec!["one", "two"]);
        assert_eq!(parser.token_index(), 2);
    }

    #[test]
    fn test_attempt_rewinds_on_failure() {
        let mut parser = parser(&[(TokenKind::Id, "one"), (TokenKind::Id, "two")]);

        let failure = parser
            .attempt_rule(|p| {
                p.expect(TokenKind::Id)?;
                p.expect(TokenKind::Colon)?;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(failure.pre_offset, 1);
        assert_eq!(parser.token_index(), 0);
    }

    #[test]
    fn test_nested_attempts_collect_all_tokens() {
        let mut parser = parser(&[
            (TokenKind::Id, "ul"),
            (TokenKind::Id, "foo"),
            (TokenKind::Colon, ":"),
            (TokenKind::Id, "'bar'"),
        ]);

        let consumed = parser
            .attempt_rule(|p| {
                p.expect(TokenKind::Id)?;
                p.attempt_rule(|p| {
                    p.expect(TokenKind::Id)?;
                    p.expect(TokenKind::Colon)?;
                    Ok(())
                })?;
                p.expect(TokenKind::Id)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(consumed, vec!["ul", "foo", ":", "'bar'"]);
    }

    #[test]
    fn test_token_values_are_clamped() {
        let parser = parser(&[(TokenKind::Id, "a"), (TokenKind::Id, "b")]);
        assert_eq!(parser.token_values_from_to(1, 10), vec!["b"]);
        assert!(parser.token_values_from_to(5, 2).is_empty());
    }

    #[test]
    fn test_error_for_points_at_offending_token() {
        let mut parser = Parser::from_source("ul :").unwrap();
        parser.increment_token();

        let failure = parser.consume_expected_token(TokenKind::Id).unwrap_err();
        let err = parser.error_for(failure);

        assert_eq!(err.span(), TokenSpan { start: 3, end: 4 });
        assert_eq!(err.failure(), Some(&failure));
        assert!(err.to_string().contains("expected identifier"));
    }

    #[test]
    fn test_error_for_at_end_of_input() {
        let parser = Parser::from_source("ul").unwrap();
        let err = parser.error_for(ParseFailure::at(1).expecting(TokenKind::Colon));

        assert_eq!(err.span(), TokenSpan { start: 2, end: 2 });
        assert!(err.to_string().contains("end of input"));
    }
}
