//! Assessment report envelope with JSON output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::scoring::{AssessmentResult, ScoringConfig};

/// A scored assessment, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the question bank the answers were given against.
    pub bank: BankSummary,
    /// The computed scores and guidance.
    pub result: AssessmentResult,
    /// Thresholds and weights the result was computed with.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Summary of a question bank (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionBank> for BankSummary {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id().to_string(),
            name: bank.name().to_string(),
            question_count: bank.len(),
        }
    }
}

impl AssessmentReport {
    pub fn new(bank: &QuestionBank, result: AssessmentResult, scoring: &ScoringConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: bank.into(),
            result,
            scoring: scoring.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
