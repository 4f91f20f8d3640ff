pub mod lexer;
pub mod parser;
pub mod builder;
pub mod clean;
pub mod error;

pub use lexer::{lex, tokenize, LexError, Token, TokenKind, TokenSpan};
pub use parser::{Parser, Rule};
pub use builder::{Builder, Properties};
pub use clean::parse;
pub use error::{MatchResult, ParseError, ParseFailure, ParseResult};

