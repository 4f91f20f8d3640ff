pub mod compile;
pub mod init;
pub mod render;
pub mod tokens;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use tokens::{tokens, TokensArgs};

use anyhow::{anyhow, Context, Result};
use clean_parser::error::pretty;
use clean_parser::ParseError;
use std::io::Read;
use std::path::Path;

/// Read a source file, or stdin when the path is `-`.
///
/// Returns the name to use in diagnostics along with the contents.
pub(crate) fn read_source(input: &Path) -> Result<(String, String)> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }

    let source = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    Ok((input.display().to_string(), source))
}

pub(crate) fn parse_failure(err: &ParseError, name: &str, source: &str) -> anyhow::Error {
    anyhow!("\n{}", pretty::format_error(err, name, source))
}
