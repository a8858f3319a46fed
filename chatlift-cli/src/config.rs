use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chatlift_core::Format;
use serde::Deserialize;

use crate::cli::{Cli, CliFormat};

/// Resolved settings: built-in defaults, then the config file, then CLI
/// overrides, in that order.
#[derive(Debug, Clone)]
pub struct Config {
    pub out_dir: PathBuf,
    pub format: Format,
    pub clipboard: bool,
}

impl Config {
    pub fn load(provided: Option<&Path>) -> Result<Self> {
        let loaded = if let Some(explicit) = provided {
            if !explicit.exists() {
                bail!("config file {} does not exist", explicit.display());
            }
            Some(load_raw_config(explicit)?)
        } else {
            default_config_path()
                .filter(|path| path.exists())
                .map(|path| load_raw_config(&path))
                .transpose()?
        };

        let raw = loaded.unwrap_or_default();

        let format = raw
            .format
            .as_deref()
            .map(parse_format)
            .transpose()?
            .unwrap_or(Format::Markdown);

        Ok(Self {
            out_dir: raw
                .out_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            format,
            clipboard: raw.clipboard.unwrap_or(false),
        })
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(out) = &cli.output {
            self.out_dir = out.clone();
        }
        if let Some(format) = cli.format {
            self.format = match format {
                CliFormat::Markdown => Format::Markdown,
                CliFormat::Html => Format::Html,
                CliFormat::Plaintext => Format::PlainText,
            };
        }
        if cli.clipboard {
            self.clipboard = true;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    out_dir: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    clipboard: Option<bool>,
}

fn parse_format(value: &str) -> Result<Format> {
    match value.trim().to_lowercase().as_str() {
        "md" | "markdown" => Ok(Format::Markdown),
        "html" => Ok(Format::Html),
        "txt" | "plaintext" => Ok(Format::PlainText),
        other => bail!("unsupported format '{other}'"),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatlift").join("chatlift.toml"))
}

fn load_raw_config(path: &Path) -> Result<RawConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
