use super::{parse_failure, read_source};
use anyhow::{anyhow, Result};
use clap::Args;
use clean_compiler_html::HtmlBuilder;
use clean_parser::parse;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,

    /// Output format (html, json)
    #[arg(short, long, default_value = "html")]
    pub format: String,
}

pub fn render(args: RenderArgs, _cwd: &str) -> Result<()> {
    let (name, source) = read_source(&args.input)?;

    let mut builder = HtmlBuilder::new();
    let element =
        parse(&source, &mut builder).map_err(|e| parse_failure(&e, &name, &source))?;

    match args.format.as_str() {
        "html" => println!("{}", element.to_html()),
        "json" => println!("{}", serde_json::to_string_pretty(&element)?),
        other => return Err(anyhow!("Unknown format: {}", other)),
    }

    Ok(())
}
