//! Response store and answers-file loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::model::{AnswerInput, Question, Response, ResponseValue};

/// Ordered `(question id, value)` pairs with upsert semantics.
///
/// One entry per question; editing an answer replaces its value in place and
/// new answers append at the end. Nothing is ever removed: a restart replaces
/// the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseStore {
    responses: Vec<Response>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the response for `question_id`.
    pub fn update(&mut self, question_id: &str, value: ResponseValue) {
        match self
            .responses
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            Some(existing) => {
                tracing::debug!(question = question_id, %value, "replaced response");
                existing.value = value;
            }
            None => {
                tracing::debug!(question = question_id, %value, "recorded response");
                self.responses.push(Response {
                    question_id: question_id.to_string(),
                    value,
                });
            }
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&ResponseValue> {
        self.responses
            .iter()
            .find(|r| r.question_id == question_id)
            .map(|r| &r.value)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some()
    }

    /// True iff every question in `questions` has a response.
    pub fn is_section_complete<'a>(&self, questions: impl IntoIterator<Item = &'a Question>) -> bool {
        questions.into_iter().all(|q| self.is_answered(&q.id))
    }

    /// Ids of the questions in `questions` that have no response, in order.
    pub fn missing<'a>(&self, questions: impl IntoIterator<Item = &'a Question>) -> Vec<String> {
        questions
            .into_iter()
            .filter(|q| !self.is_answered(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Intermediate TOML structure for answers files.
#[derive(Debug, Deserialize)]
struct TomlAnswersFile {
    #[serde(default)]
    answers: toml::Table,
}

/// Parse an answers file into a response store, checking every answer
/// against `bank`.
pub fn parse_answers(path: &Path, bank: &QuestionBank) -> Result<ResponseStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answers_str(&content, bank)
        .with_context(|| format!("invalid answers file: {}", path.display()))
}

/// Parse answers TOML (an `[answers]` table of question id to number or
/// option label) into a response store.
///
/// Responses are stored in bank order, whatever order the file uses.
pub fn parse_answers_str(content: &str, bank: &QuestionBank) -> Result<ResponseStore> {
    let parsed: TomlAnswersFile = toml::from_str(content).context("failed to parse TOML")?;

    for id in parsed.answers.keys() {
        anyhow::ensure!(bank.get(id).is_some(), "unknown question: {id}");
    }

    let mut store = ResponseStore::new();
    for question in bank.questions() {
        let Some(raw) = parsed.answers.get(&question.id) else {
            continue;
        };
        let input = match raw {
            toml::Value::Integer(n) => AnswerInput::Number(*n as f64),
            toml::Value::Float(n) => AnswerInput::Number(*n),
            toml::Value::String(s) => AnswerInput::Label(s.clone()),
            other => anyhow::bail!(
                "answer for {} must be a number or an option label, got {}",
                question.id,
                other.type_str()
            ),
        };
        let value = question.interpret(&input)?;
        store.update(&question.id, value);
    }

    Ok(store)
}
