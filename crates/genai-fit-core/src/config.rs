//! genai-fit configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

/// Top-level genai-fit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenaiFitConfig {
    /// Question bank to use instead of the built-in one.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Scoring thresholds and pillar weights.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `genai-fit.toml` in the current directory
/// 2. `~/.config/genai-fit/config.toml`
///
/// Environment variable override: `GENAI_FIT_BANK` (question bank path).
pub fn load_config_from(path: Option<&Path>) -> Result<GenaiFitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("genai-fit.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => GenaiFitConfig::default(),
    };

    if let Ok(bank) = std::env::var("GENAI_FIT_BANK") {
        if !bank.is_empty() {
            config.bank = Some(PathBuf::from(bank));
        }
    }

    config.bank = config
        .bank
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    config
        .scoring
        .validate()
        .context("invalid scoring configuration")?;

    Ok(config)
}

/// Parse a config TOML string without touching the environment.
pub fn parse_config_str(content: &str) -> Result<GenaiFitConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("genai-fit"))
}
