//! Assessment error types.
//!
//! Typed failures raised by the question bank, the session and the scoring
//! engine. File loading wraps these with `anyhow` context at the boundary.

use thiserror::Error;

use crate::model::Section;

/// Errors raised while answering, navigating or scoring an assessment.
#[derive(Debug, Error, PartialEq)]
pub enum AssessmentError {
    /// Scoring was requested before every question had a response.
    #[error("incomplete assessment: {} unanswered question(s): {}", .missing.len(), .missing.join(", "))]
    IncompleteAssessment { missing: Vec<String> },

    /// The active section still has unanswered questions.
    #[error("section {section} is incomplete: {}", .missing.join(", "))]
    SectionIncomplete {
        section: Section,
        missing: Vec<String>,
    },

    /// Tried to move past a question that has no response yet.
    #[error("question {0} has not been answered")]
    Unanswered(String),

    /// The question id is not part of the bank.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The response does not match the question's answer shape.
    #[error("question {question_id} expects a {expected} answer")]
    ShapeMismatch {
        question_id: String,
        expected: &'static str,
    },

    /// A scale value outside the question's bounds.
    #[error("value {value} for question {question_id} is outside {min}..={max}")]
    ValueOutOfRange {
        question_id: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// No option with that number, label or weight.
    #[error("question {question_id} has no option {option}")]
    UnknownOption { question_id: String, option: String },

    /// The question's answer range has zero width.
    #[error("question {0} has a degenerate answer range")]
    DegenerateRange(String),

    /// The current step has no questions (introduction or results).
    #[error("the current step has no questions")]
    NoActiveSection,
}

impl AssessmentError {
    /// Returns `true` if the error only means some answers are still missing.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            AssessmentError::IncompleteAssessment { .. }
                | AssessmentError::SectionIncomplete { .. }
                | AssessmentError::Unanswered(_)
        )
    }

    /// Question ids that still need an answer, if this is a completeness error.
    pub fn missing_questions(&self) -> &[String] {
        match self {
            AssessmentError::IncompleteAssessment { missing }
            | AssessmentError::SectionIncomplete { missing, .. } => missing,
            AssessmentError::Unanswered(id) => std::slice::from_ref(id),
            _ => &[],
        }
    }
}

/// Structural problems that make a question bank unusable.
#[derive(Debug, Error, PartialEq)]
pub enum BankError {
    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    #[error("section {0} has no questions")]
    EmptySection(Section),

    #[error("WISCAR dimension {0} has no questions")]
    EmptyDimension(String),

    #[error("wiscar question {0} has no dimension")]
    MissingDimension(String),

    #[error("choice question {0} needs at least two options")]
    TooFewOptions(String),

    #[error("question {0} has a degenerate answer range")]
    DegenerateRange(String),

    #[error("question {id}: unknown answer type {kind:?}")]
    UnknownAnswerType { id: String, kind: String },

    #[error("question {id}: {message}")]
    InvalidQuestion { id: String, message: String },
}

/// Invalid scoring configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("threshold {name} = {value} is above 100")]
    ThresholdOutOfRange { name: &'static str, value: u8 },

    #[error("no_threshold ({no}) must not exceed yes_threshold ({yes})")]
    InvertedThresholds { yes: u8, no: u8 },

    #[error("pillar weight {name} = {value} must be finite and non-negative")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("pillar weights must not all be zero")]
    ZeroWeights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_errors_expose_missing_ids() {
        let err = AssessmentError::IncompleteAssessment {
            missing: vec!["a".into(), "b".into()],
        };
        assert!(err.is_incomplete());
        assert_eq!(err.missing_questions(), ["a", "b"]);
        assert!(err.to_string().contains("2 unanswered"));

        let err = AssessmentError::Unanswered("q1".into());
        assert_eq!(err.missing_questions(), ["q1"]);
        assert!(!AssessmentError::NoActiveSection.is_incomplete());
    }
}
