use anyhow::{Context, Result};
use codebook_core::PreviewBudget;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "./config/codebook.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/codebook.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    #[serde(default = "default_definition_chars")]
    pub definition_chars: usize,
    #[serde(default = "default_rule_chars")]
    pub rule_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            definition_chars: default_definition_chars(),
            rule_chars: default_rule_chars(),
        }
    }
}

fn default_definition_chars() -> usize {
    codebook_core::preview::DEFINITION_BUDGET
}
fn default_rule_chars() -> usize {
    codebook_core::preview::RULE_BUDGET
}

impl PreviewConfig {
    pub fn budget(&self) -> PreviewBudget {
        PreviewBudget {
            definition: self.definition_chars,
            rule: self.rule_chars,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.dataset.path.as_os_str().is_empty() {
        anyhow::bail!("dataset.path must not be empty");
    }

    if config.preview.definition_chars == 0 {
        anyhow::bail!("preview.definition_chars must be > 0");
    }

    if config.preview.rule_chars == 0 {
        anyhow::bail!("preview.rule_chars must be > 0");
    }

    Ok(config)
}

/// Load an explicitly named config, or the default file when present.
///
/// An explicit path must exist. Without one, a missing default file means
/// built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                load_config(default)
            } else {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                Ok(Config::default())
            }
        }
    }
}
