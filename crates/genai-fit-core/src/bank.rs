//! TOML question bank loader.
//!
//! Loads question banks from TOML files, enforces their structural rules and
//! reports softer issues as warnings.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::BankError;
use crate::model::{AnswerOption, AnswerShape, Question, Section, WiscarDimension};

/// The bank that ships with genai-fit.
pub const BUILTIN_BANK: &str = include_str!("../../../question-banks/generative-ai.toml");

/// A validated, immutable set of questions.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    id: String,
    name: String,
    description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting anything the scoring engine could not handle.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        check_structure(&questions)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            questions,
        })
    }

    /// The built-in Generative AI bank.
    pub fn builtin() -> Result<Self> {
        parse_bank_str(BUILTIN_BANK, Path::new("<builtin>"))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All questions in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions of one section, in presentation order.
    pub fn section(&self, section: Section) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.section == section)
            .collect()
    }

    /// Wiscar questions tagged with one dimension.
    pub fn dimension(&self, dimension: WiscarDimension) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.section == Section::Wiscar && q.dimension == Some(dimension))
            .collect()
    }
}

fn check_structure(questions: &[Question]) -> Result<(), BankError> {
    let mut seen = HashSet::new();
    for q in questions {
        if !seen.insert(q.id.as_str()) {
            return Err(BankError::DuplicateId(q.id.clone()));
        }
        if q.section == Section::Wiscar && q.dimension.is_none() {
            return Err(BankError::MissingDimension(q.id.clone()));
        }
        if let AnswerShape::Choice { options } = &q.shape {
            if options.len() < 2 {
                return Err(BankError::TooFewOptions(q.id.clone()));
            }
            if options.iter().any(|o| !o.weight.is_finite()) {
                return Err(BankError::InvalidQuestion {
                    id: q.id.clone(),
                    message: "option weights must be finite".into(),
                });
            }
        }
        let (min, max) = q.shape.range();
        if max <= min {
            return Err(BankError::DegenerateRange(q.id.clone()));
        }
    }

    for section in Section::ALL {
        if !questions.iter().any(|q| q.section == section) {
            return Err(BankError::EmptySection(section));
        }
    }

    for dimension in WiscarDimension::ALL {
        if !questions
            .iter()
            .any(|q| q.section == Section::Wiscar && q.dimension == Some(dimension))
        {
            return Err(BankError::EmptyDimension(dimension.to_string()));
        }
    }

    Ok(())
}

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    section: String,
    prompt: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    dimension: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    options: Vec<TomlOption>,
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
    #[serde(default)]
    min_label: Option<String>,
    #[serde(default)]
    max_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    label: String,
    weight: f64,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()?;

    let bank = QuestionBank::new(
        parsed.bank.id,
        parsed.bank.name,
        parsed.bank.description,
        questions,
    )
    .with_context(|| format!("invalid question bank: {}", source_path.display()))?;

    tracing::debug!(
        bank = bank.id(),
        questions = bank.len(),
        "loaded question bank from {}",
        source_path.display()
    );
    Ok(bank)
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let section: Section = q.section.parse().map_err(|e: String| {
        BankError::InvalidQuestion {
            id: q.id.clone(),
            message: e,
        }
    })?;

    let dimension = q
        .dimension
        .map(|d| {
            d.parse::<WiscarDimension>()
                .map_err(|e| BankError::InvalidQuestion {
                    id: q.id.clone(),
                    message: e,
                })
        })
        .transpose()?;

    let shape = match q.kind.to_lowercase().as_str() {
        "choice" => AnswerShape::Choice {
            options: q
                .options
                .into_iter()
                .map(|o| AnswerOption {
                    label: o.label,
                    weight: o.weight,
                })
                .collect(),
        },
        "scale" => {
            let (min, max) = match (q.min, q.max) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    return Err(BankError::InvalidQuestion {
                        id: q.id,
                        message: "scale questions need both min and max".into(),
                    }
                    .into())
                }
            };
            AnswerShape::Scale {
                min,
                max,
                min_label: q.min_label,
                max_label: q.max_label,
            }
        }
        other => {
            return Err(BankError::UnknownAnswerType {
                id: q.id,
                kind: other.to_string(),
            }
            .into())
        }
    };

    Ok(Question {
        id: q.id,
        section,
        prompt: q.prompt,
        category: q.category,
        dimension,
        shape,
    })
}

/// Load the bank at `path`, or the built-in bank when no path is given.
pub fn load_bank(path: Option<&Path>) -> Result<QuestionBank> {
    match path {
        Some(p) => parse_bank(p),
        None => QuestionBank::builtin(),
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a bank for issues that do not prevent scoring.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for q in bank.questions() {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt is empty".into(),
            });
        }

        if q.section != Section::Wiscar && q.dimension.is_some() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!(
                    "dimension is ignored on {} questions",
                    q.section
                ),
            });
        }

        if let AnswerShape::Choice { options } = &q.shape {
            let mut labels = HashSet::new();
            for o in options {
                if !labels.insert(o.label.to_lowercase()) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: format!("duplicate option label: {}", o.label),
                    });
                }
            }
        }
    }

    warnings
}
