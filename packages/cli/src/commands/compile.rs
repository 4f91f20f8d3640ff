use super::parse_failure;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use clean_compiler_html::HtmlBuilder;
use clean_parser::parse;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let root_dir = PathBuf::from(cwd).join(&args.path);
    let root = root_dir.to_string_lossy().to_string();

    let config = Config::load(&root)?;
    let src_dir = config.get_src_dir(&root);
    let out_dir = match &args.out_dir {
        Some(out) => root_dir.join(out),
        None => config.get_out_dir(&root),
    };

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    println!("{}", "🔨 Compiling Clean files...".bright_blue().bold());

    let files = find_source_files(&src_dir, &config.extension);

    if files.is_empty() {
        println!("{}", format!("⚠️  No .{} files found", config.extension).yellow());
        return Ok(());
    }

    println!("Found {} files", files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);

        match compile_file(file, relative_path, &out_dir, args.stdout) {
            Ok(output) => {
                success_count += 1;
                println!("  {} {} → {}", "✓".green(), relative_path.display(), output);
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} files successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Compiled {} files, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} files failed to compile", error_count))
    }
}

fn find_source_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();

    files.sort();
    files
}

fn compile_file(file: &Path, relative_path: &Path, out_dir: &Path, stdout: bool) -> Result<String> {
    let source = fs::read_to_string(file)?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let mut builder = HtmlBuilder::new();
    let element = parse(&source, &mut builder).map_err(|e| parse_failure(&e, name, &source))?;
    let html = element.to_html();

    if stdout {
        println!("{}", html);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(relative_path).with_extension("html");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!(path = %output_file.display(), "writing output");
    fs::write(&output_file, html)?;

    Ok(output_file.display().to_string())
}
