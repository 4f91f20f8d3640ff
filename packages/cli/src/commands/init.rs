use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let config = Config {
        src_dir: args.src_dir,
        out_dir: args.out_dir,
        ..Config::default()
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    fs::create_dir_all(config.get_src_dir(cwd))?;

    println!(
        "{} Created {}",
        "✓".green(),
        DEFAULT_CONFIG_NAME.bright_white()
    );
    println!("   Source directory: {}", config.src_dir);
    println!("   Output directory: {}", config.out_dir);

    Ok(())
}
