//! Core data model types for genai-fit.
//!
//! Questions, answer shapes and response values. These are the types the
//! bank, response store, scoring engine and session all share.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssessmentError;

/// One of the three question groupings that gate progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Psychological,
    Technical,
    Wiscar,
}

impl Section {
    /// All sections in the order they are presented.
    pub const ALL: [Section; 3] = [Section::Psychological, Section::Technical, Section::Wiscar];

    /// Heading shown above the section's questions.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Psychological => "Psychological Fit Assessment",
            Section::Technical => "Technical Readiness Assessment",
            Section::Wiscar => "WISCAR Framework Analysis",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Psychological => write!(f, "psychological"),
            Section::Technical => write!(f, "technical"),
            Section::Wiscar => write!(f, "wiscar"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "psychological" | "psych" => Ok(Section::Psychological),
            "technical" | "tech" => Ok(Section::Technical),
            "wiscar" => Ok(Section::Wiscar),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// The six WISCAR readiness dimensions, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WiscarDimension {
    Will,
    Interest,
    Skill,
    Cognitive,
    Ability,
    RealWorld,
}

impl WiscarDimension {
    pub const ALL: [WiscarDimension; 6] = [
        WiscarDimension::Will,
        WiscarDimension::Interest,
        WiscarDimension::Skill,
        WiscarDimension::Cognitive,
        WiscarDimension::Ability,
        WiscarDimension::RealWorld,
    ];

    /// Human-readable label, e.g. "Real-World".
    pub fn label(&self) -> &'static str {
        match self {
            WiscarDimension::Will => "Will",
            WiscarDimension::Interest => "Interest",
            WiscarDimension::Skill => "Skill",
            WiscarDimension::Cognitive => "Cognitive",
            WiscarDimension::Ability => "Ability",
            WiscarDimension::RealWorld => "Real-World",
        }
    }

    /// Short description of what the dimension measures.
    pub fn description(&self) -> &'static str {
        match self {
            WiscarDimension::Will => "Grit & persistence",
            WiscarDimension::Interest => "Authentic passion",
            WiscarDimension::Skill => "Current ability",
            WiscarDimension::Cognitive => "Mental readiness",
            WiscarDimension::Ability => "Learning capacity",
            WiscarDimension::RealWorld => "Career alignment",
        }
    }
}

impl fmt::Display for WiscarDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiscarDimension::Will => write!(f, "will"),
            WiscarDimension::Interest => write!(f, "interest"),
            WiscarDimension::Skill => write!(f, "skill"),
            WiscarDimension::Cognitive => write!(f, "cognitive"),
            WiscarDimension::Ability => write!(f, "ability"),
            WiscarDimension::RealWorld => write!(f, "realWorld"),
        }
    }
}

impl FromStr for WiscarDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "will" => Ok(WiscarDimension::Will),
            "interest" => Ok(WiscarDimension::Interest),
            "skill" => Ok(WiscarDimension::Skill),
            "cognitive" => Ok(WiscarDimension::Cognitive),
            "ability" => Ok(WiscarDimension::Ability),
            "realworld" => Ok(WiscarDimension::RealWorld),
            other => Err(format!("unknown WISCAR dimension: {other}")),
        }
    }
}

/// One selectable option of a single-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown to the respondent.
    pub label: String,
    /// Numeric weight used during scoring.
    pub weight: f64,
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnswerShape {
    /// Single choice from an enumerated option set.
    Choice { options: Vec<AnswerOption> },
    /// Integer scale, e.g. a 1–5 Likert item.
    Scale {
        min: i64,
        max: i64,
        #[serde(default)]
        min_label: Option<String>,
        #[serde(default)]
        max_label: Option<String>,
    },
}

impl AnswerShape {
    /// Lowest and highest value a response to this shape can take.
    pub fn range(&self) -> (f64, f64) {
        match self {
            AnswerShape::Choice { options } => {
                let min = options
                    .iter()
                    .map(|o| o.weight)
                    .fold(f64::INFINITY, f64::min);
                let max = options
                    .iter()
                    .map(|o| o.weight)
                    .fold(f64::NEG_INFINITY, f64::max);
                (min, max)
            }
            AnswerShape::Scale { min, max, .. } => (*min as f64, *max as f64),
        }
    }

    /// Name of the shape as used in bank files.
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerShape::Choice { .. } => "choice",
            AnswerShape::Scale { .. } => "scale",
        }
    }
}

/// A single immutable questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Section this question belongs to.
    pub section: Section,
    /// Prompt shown to the respondent.
    pub prompt: String,
    /// Free-form trait category (e.g. "interest", "prerequisites").
    #[serde(default)]
    pub category: Option<String>,
    /// WISCAR dimension; required for wiscar questions.
    #[serde(default)]
    pub dimension: Option<WiscarDimension>,
    /// How the question is answered.
    pub shape: AnswerShape,
}

impl Question {
    /// Check that `value` has the right shape and lies within range.
    pub fn check(&self, value: &ResponseValue) -> Result<(), AssessmentError> {
        match (&self.shape, value) {
            (AnswerShape::Choice { options }, ResponseValue::Choice { weight }) => {
                if options.iter().any(|o| same_weight(o.weight, *weight)) {
                    Ok(())
                } else {
                    Err(AssessmentError::UnknownOption {
                        question_id: self.id.clone(),
                        option: weight.to_string(),
                    })
                }
            }
            (AnswerShape::Scale { min, max, .. }, ResponseValue::Scale { value }) => {
                if (*min..=*max).contains(value) {
                    Ok(())
                } else {
                    Err(AssessmentError::ValueOutOfRange {
                        question_id: self.id.clone(),
                        value: *value,
                        min: *min,
                        max: *max,
                    })
                }
            }
            (shape, _) => Err(AssessmentError::ShapeMismatch {
                question_id: self.id.clone(),
                expected: shape.kind(),
            }),
        }
    }

    /// Normalise a response to this question into a 0–100 contribution.
    ///
    /// Min–max scaling against the question's own range, so the lowest
    /// possible answer contributes 0 and the highest contributes 100.
    pub fn contribution(&self, value: &ResponseValue) -> Result<f64, AssessmentError> {
        self.check(value)?;
        let (min, max) = self.shape.range();
        let span = max - min;
        if span <= 0.0 {
            return Err(AssessmentError::DegenerateRange(self.id.clone()));
        }
        Ok(((value.as_f64() - min) / span * 100.0).clamp(0.0, 100.0))
    }

    /// Resolve a 1-based option number (as typed by a respondent) into a value.
    pub fn option_by_number(&self, number: usize) -> Result<ResponseValue, AssessmentError> {
        match &self.shape {
            AnswerShape::Choice { options } => number
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .map(|o| ResponseValue::Choice { weight: o.weight })
                .ok_or_else(|| AssessmentError::UnknownOption {
                    question_id: self.id.clone(),
                    option: number.to_string(),
                }),
            AnswerShape::Scale { .. } => Err(AssessmentError::ShapeMismatch {
                question_id: self.id.clone(),
                expected: self.shape.kind(),
            }),
        }
    }

    /// Interpret a raw answer (number or option label) for this question.
    pub fn interpret(&self, input: &AnswerInput) -> Result<ResponseValue, AssessmentError> {
        let value = match (&self.shape, input) {
            (AnswerShape::Choice { .. }, AnswerInput::Number(n)) => {
                ResponseValue::Choice { weight: *n }
            }
            (AnswerShape::Choice { options }, AnswerInput::Label(label)) => options
                .iter()
                .find(|o| o.label.eq_ignore_ascii_case(label.trim()))
                .map(|o| ResponseValue::Choice { weight: o.weight })
                .ok_or_else(|| AssessmentError::UnknownOption {
                    question_id: self.id.clone(),
                    option: label.clone(),
                })?,
            (AnswerShape::Scale { .. }, AnswerInput::Number(n)) if n.fract() == 0.0 => {
                ResponseValue::Scale { value: *n as i64 }
            }
            (AnswerShape::Scale { .. }, _) => {
                return Err(AssessmentError::ShapeMismatch {
                    question_id: self.id.clone(),
                    expected: "scale",
                })
            }
        };
        self.check(&value)?;
        Ok(value)
    }
}

fn same_weight(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// A recorded answer: the selected option's weight or a raw scale value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseValue {
    Choice { weight: f64 },
    Scale { value: i64 },
}

impl ResponseValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            ResponseValue::Choice { weight } => *weight,
            ResponseValue::Scale { value } => *value as f64,
        }
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Choice { weight } => write!(f, "choice({weight})"),
            ResponseValue::Scale { value } => write!(f, "scale({value})"),
        }
    }
}

/// A `(question id, value)` pair held by the response store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    pub value: ResponseValue,
}

/// Untyped answer as read from an answers file.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerInput {
    Number(f64),
    Label(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_question() -> Question {
        Question {
            id: "s".into(),
            section: Section::Psychological,
            prompt: "Scale".into(),
            category: None,
            dimension: None,
            shape: AnswerShape::Scale {
                min: 1,
                max: 5,
                min_label: None,
                max_label: None,
            },
        }
    }

    fn choice_question() -> Question {
        Question {
            id: "c".into(),
            section: Section::Technical,
            prompt: "Choice".into(),
            category: None,
            dimension: None,
            shape: AnswerShape::Choice {
                options: vec![
                    AnswerOption {
                        label: "Low".into(),
                        weight: 0.0,
                    },
                    AnswerOption {
                        label: "Mid".into(),
                        weight: 1.0,
                    },
                    AnswerOption {
                        label: "High".into(),
                        weight: 4.0,
                    },
                ],
            },
        }
    }

    #[test]
    fn section_display_and_parse() {
        assert_eq!(Section::Wiscar.to_string(), "wiscar");
        assert_eq!("Technical".parse::<Section>().unwrap(), Section::Technical);
        assert_eq!("psych".parse::<Section>().unwrap(), Section::Psychological);
        assert!("results".parse::<Section>().is_err());
    }

    #[test]
    fn dimension_parse_accepts_spellings() {
        assert_eq!(
            "realWorld".parse::<WiscarDimension>().unwrap(),
            WiscarDimension::RealWorld
        );
        assert_eq!(
            "real-world".parse::<WiscarDimension>().unwrap(),
            WiscarDimension::RealWorld
        );
        assert_eq!(WiscarDimension::RealWorld.to_string(), "realWorld");
        assert!("grit".parse::<WiscarDimension>().is_err());
    }

    #[test]
    fn scale_contribution_is_min_max_scaled() {
        let q = scale_question();
        assert_eq!(q.contribution(&ResponseValue::Scale { value: 1 }).unwrap(), 0.0);
        assert_eq!(q.contribution(&ResponseValue::Scale { value: 3 }).unwrap(), 50.0);
        assert_eq!(q.contribution(&ResponseValue::Scale { value: 5 }).unwrap(), 100.0);
    }

    #[test]
    fn choice_contribution_uses_weight_range() {
        let q = choice_question();
        let mid = q.contribution(&ResponseValue::Choice { weight: 1.0 }).unwrap();
        assert!((mid - 25.0).abs() < 1e-9);
        assert_eq!(
            q.contribution(&ResponseValue::Choice { weight: 4.0 }).unwrap(),
            100.0
        );
    }

    #[test]
    fn out_of_range_and_wrong_shape_are_rejected() {
        let q = scale_question();
        assert!(matches!(
            q.check(&ResponseValue::Scale { value: 6 }),
            Err(AssessmentError::ValueOutOfRange { .. })
        ));
        assert!(matches!(
            q.check(&ResponseValue::Choice { weight: 1.0 }),
            Err(AssessmentError::ShapeMismatch { .. })
        ));
        let c = choice_question();
        assert!(matches!(
            c.check(&ResponseValue::Choice { weight: 2.0 }),
            Err(AssessmentError::UnknownOption { .. })
        ));
    }

    #[test]
    fn interpret_labels_and_numbers() {
        let c = choice_question();
        assert_eq!(
            c.interpret(&AnswerInput::Label("high".into())).unwrap(),
            ResponseValue::Choice { weight: 4.0 }
        );
        assert_eq!(
            c.interpret(&AnswerInput::Number(1.0)).unwrap(),
            ResponseValue::Choice { weight: 1.0 }
        );
        let s = scale_question();
        assert_eq!(
            s.interpret(&AnswerInput::Number(4.0)).unwrap(),
            ResponseValue::Scale { value: 4 }
        );
        assert!(s.interpret(&AnswerInput::Number(2.5)).is_err());
        assert!(s.interpret(&AnswerInput::Label("4".into())).is_err());
    }

    #[test]
    fn option_numbers_are_one_based() {
        let c = choice_question();
        assert_eq!(
            c.option_by_number(3).unwrap(),
            ResponseValue::Choice { weight: 4.0 }
        );
        assert!(c.option_by_number(0).is_err());
        assert!(c.option_by_number(4).is_err());
        assert!(scale_question().option_by_number(1).is_err());
    }
}
