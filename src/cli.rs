//! Command-line argument parsing
//!
//! Supports:
//! - Analyzing one file and printing its decorations
//! - Overriding the detected language and the color policy
//! - JSON output for host adapters
//! - Watch mode, refreshing on every change

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ColorizerConfig;
use crate::palette::ColorPolicy;
use crate::syntax::LanguageId;

/// Color block bands for TypeScript and JavaScript sources
#[derive(Parser, Debug)]
#[command(name = "blockbands", version, about = "Color block bands for TS/JS sources")]
pub struct CliArgs {
    /// Source file to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Language id or extension (e.g. typescriptreact, tsx), instead of
    /// detecting it from the file name
    #[arg(short, long, value_name = "ID")]
    pub language: Option<String>,

    /// Color policy for function-like blocks, overriding the config file
    #[arg(short, long, value_name = "POLICY", value_parser = ColorPolicy::parse)]
    pub policy: Option<ColorPolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep running and refresh whenever the file changes
    #[arg(short, long)]
    pub watch: bool,

    /// Config file to use instead of ~/.config/blockbands/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub path: PathBuf,
    /// Forced language, `None` to detect from the path
    pub language: Option<LanguageId>,
    pub format: OutputFormat,
    pub watch: bool,
    pub colorizer: ColorizerConfig,
}

impl CliArgs {
    /// Resolve the arguments and load the colorizer config
    pub fn into_config(self) -> Result<RunConfig, String> {
        if self.path.is_dir() {
            return Err(format!("{} is a directory", self.path.display()));
        }

        let language = match self.language.as_deref() {
            Some(id) => match LanguageId::from_language_id(id) {
                LanguageId::PlainText if !id.eq_ignore_ascii_case("plaintext") => {
                    return Err(format!("Unknown language: {}", id));
                }
                lang => Some(lang),
            },
            None => None,
        };

        let mut colorizer = match &self.config {
            Some(path) => ColorizerConfig::load_from(path),
            None => ColorizerConfig::load(),
        };
        if let Some(policy) = self.policy {
            colorizer.color_policy = policy;
        }

        Ok(RunConfig {
            path: self.path,
            language,
            format: self.format,
            watch: self.watch,
            colorizer,
        })
    }
}
