use super::{parse_failure, read_source};
use anyhow::Result;
use clap::Args;
use clean_parser::{tokenize, ParseError};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,
}

pub fn tokens(args: TokensArgs, _cwd: &str) -> Result<()> {
    let (name, source) = read_source(&args.input)?;

    let tokens = tokenize(&source)
        .map_err(|e| parse_failure(&ParseError::from(e), &name, &source))?;
    println!("{}", serde_json::to_string_pretty(&tokens)?);

    Ok(())
}
