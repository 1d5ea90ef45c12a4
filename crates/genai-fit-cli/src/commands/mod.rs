pub mod init;
pub mod questions;
pub mod render;
pub mod score;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use genai_fit_core::bank::{load_bank, QuestionBank};
use genai_fit_core::config::load_config_from;
use genai_fit_core::scoring::ScoringEngine;

/// Load the config, then the bank (`--bank` wins over the config's `bank`).
pub fn load_assessment(
    bank_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(QuestionBank, ScoringEngine)> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = load_bank(bank_path.or(config.bank).as_deref())?;
    let engine = ScoringEngine::new(config.scoring)?;
    tracing::debug!(bank = bank.id(), questions = bank.len(), "assessment loaded");
    Ok((bank, engine))
}
