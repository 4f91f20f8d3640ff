use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "clean.config.json";

/// Clean configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source directory containing Clean files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where `compile` writes its output
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Extension of Clean source files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_extension() -> String {
    "clean".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            extension: default_extension(),
        }
    }
}
