//! Grammar driver for Clean tag statements
//!
//! ```text
//! expressions    -> expression+
//! expression     -> fun_call | statement
//! fun_call       -> id object? function_body?
//! object         -> key_value_pair+
//! key_value_pair -> id colon id
//! function_body  -> open_brace expressions close_brace
//! statement      -> .* (anything else)
//! ```
//!
//! Only the flat part is recognised: one `id`, optionally followed by a single
//! `key : value` pair. Whatever follows the statement is left unread.

use crate::builder::{Builder, Properties};
use crate::error::{MatchResult, ParseResult};
use crate::lexer::{tokenize, TokenKind};
use crate::parser::Parser;
use tracing::{debug, instrument};

/// Parse one tag statement and hand it to `builder`
#[instrument(level = "debug", skip(builder))]
pub fn parse<B: Builder>(source: &str, builder: &mut B) -> ParseResult<B::Node> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);

    function_call(&mut parser, builder).map_err(|failure| parser.error_for(failure))
}

/// fun_call -> id object?
pub fn function_call<B: Builder>(parser: &mut Parser<'_>, builder: &mut B) -> MatchResult<B::Node> {
    let tag_name = parser.r#match(TokenKind::Id)?;

    let mut properties = Properties::new();
    // A missing or malformed pair just means no properties
    if let Ok(pair) = parser.r#match(key_value_pair) {
        if let [key, _, value] = pair[..] {
            properties.insert(key.to_string(), strip_quotes(value).to_string());
        }
    }

    debug!(tag_name, properties = properties.len(), "invoking builder");
    Ok(builder.invoke(tag_name, properties))
}

/// key_value_pair -> id colon id
pub fn key_value_pair(parser: &mut Parser<'_>) -> MatchResult<()> {
    parser.expect(TokenKind::Id)?;
    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::Id)?;
    Ok(())
}

/// Remove one pair of surrounding single quotes, if both ends have one
pub fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
