mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compile, init, render, tokens, CompileArgs, InitArgs, RenderArgs, TokensArgs,
};
use tracing::Level;

/// Clean CLI - turn terse tag statements into markup
#[derive(Parser, Debug)]
#[command(name = "clean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log parser activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a clean.config.json in the current directory
    Init(InitArgs),

    /// Render one statement to HTML
    Render(RenderArgs),

    /// Print the token stream as JSON
    Tokens(TokensArgs),

    /// Compile every source file in the project
    Compile(CompileArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Tokens(args) => tokens(args, &cwd),
        Command::Compile(args) => compile(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
