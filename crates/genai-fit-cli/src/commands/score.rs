//! The `genai-fit score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use genai_fit_core::report::AssessmentReport;
use genai_fit_core::responses::parse_answers;

use super::render::{emit, OutputFormat};

pub fn execute(
    answers_path: PathBuf,
    bank_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let (bank, engine) = super::load_assessment(bank_path, config_path)?;

    let responses = parse_answers(&answers_path, &bank)?;
    let result = engine
        .score(&bank, &responses)
        .with_context(|| format!("cannot score {}", answers_path.display()))?;

    let report = AssessmentReport::new(&bank, result, engine.config());
    emit(&report, format, output.as_deref())
}
