//! Weighted-average scoring of a completed assessment.
//!
//! Every response is normalised to a 0–100 contribution against its own
//! question; section and WISCAR dimension scores are rounded means of those
//! contributions, and the overall score is a weighted mean of the three
//! pillars (psychological fit, technical readiness, WISCAR average).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::error::{AssessmentError, ConfigError};
use crate::guidance::{self, LearningTrack};
use crate::model::{Question, Section, WiscarDimension};
use crate::responses::ResponseStore;

/// Relative weight of each pillar in the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarWeights {
    #[serde(default = "default_weight")]
    pub psychological: f64,
    #[serde(default = "default_weight")]
    pub technical: f64,
    #[serde(default = "default_weight")]
    pub wiscar: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            psychological: default_weight(),
            technical: default_weight(),
            wiscar: default_weight(),
        }
    }
}

/// Scoring constants. All thresholds are on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Overall score at or above which the recommendation is `yes`.
    #[serde(default = "default_yes_threshold")]
    pub yes_threshold: u8,
    /// Overall score below which the recommendation is `no`.
    #[serde(default = "default_no_threshold")]
    pub no_threshold: u8,
    /// Minimum affinity for a career path to be suggested.
    #[serde(default = "default_career_threshold")]
    pub career_threshold: u8,
    /// Technical readiness at or above which the advanced track is suggested.
    #[serde(default = "default_track_threshold")]
    pub track_threshold: u8,
    /// Upper bound on the number of suggested career paths.
    #[serde(default = "default_max_career_paths")]
    pub max_career_paths: usize,
    #[serde(default)]
    pub weights: PillarWeights,
}

fn default_yes_threshold() -> u8 {
    75
}
fn default_no_threshold() -> u8 {
    45
}
fn default_career_threshold() -> u8 {
    60
}
fn default_track_threshold() -> u8 {
    60
}
fn default_max_career_paths() -> usize {
    4
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            yes_threshold: default_yes_threshold(),
            no_threshold: default_no_threshold(),
            career_threshold: default_career_threshold(),
            track_threshold: default_track_threshold(),
            max_career_paths: default_max_career_paths(),
            weights: PillarWeights::default(),
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("yes_threshold", self.yes_threshold),
            ("no_threshold", self.no_threshold),
            ("career_threshold", self.career_threshold),
            ("track_threshold", self.track_threshold),
        ] {
            if value > 100 {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.no_threshold > self.yes_threshold {
            return Err(ConfigError::InvertedThresholds {
                yes: self.yes_threshold,
                no: self.no_threshold,
            });
        }
        let w = &self.weights;
        for (name, value) in [
            ("psychological", w.psychological),
            ("technical", w.technical),
            ("wiscar", w.wiscar),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if w.psychological + w.technical + w.wiscar <= 0.0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }
}

/// Final verdict derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    /// `yes` at or above the yes threshold, `no` below the no threshold,
    /// `maybe` in between.
    pub fn from_score(overall: u8, config: &ScoringConfig) -> Self {
        if overall >= config.yes_threshold {
            Recommendation::Yes
        } else if overall < config.no_threshold {
            Recommendation::No
        } else {
            Recommendation::Maybe
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Yes, you should pursue Generative AI!",
            Recommendation::Maybe => "Consider exploring Gen AI further",
            Recommendation::No => "Gen AI might not be the best fit right now",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "yes"),
            Recommendation::Maybe => write!(f, "maybe"),
            Recommendation::No => write!(f, "no"),
        }
    }
}

/// Per-dimension WISCAR scores, 0–100 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WiscarScores {
    pub will: u8,
    pub interest: u8,
    pub skill: u8,
    pub cognitive: u8,
    pub ability: u8,
    pub real_world: u8,
}

impl WiscarScores {
    pub fn get(&self, dimension: WiscarDimension) -> u8 {
        match dimension {
            WiscarDimension::Will => self.will,
            WiscarDimension::Interest => self.interest,
            WiscarDimension::Skill => self.skill,
            WiscarDimension::Cognitive => self.cognitive,
            WiscarDimension::Ability => self.ability,
            WiscarDimension::RealWorld => self.real_world,
        }
    }

    fn set(&mut self, dimension: WiscarDimension, score: u8) {
        let slot = match dimension {
            WiscarDimension::Will => &mut self.will,
            WiscarDimension::Interest => &mut self.interest,
            WiscarDimension::Skill => &mut self.skill,
            WiscarDimension::Cognitive => &mut self.cognitive,
            WiscarDimension::Ability => &mut self.ability,
            WiscarDimension::RealWorld => &mut self.real_world,
        };
        *slot = score;
    }

    /// Dimensions with their scores, in fixed WISCAR order.
    pub fn iter(&self) -> impl Iterator<Item = (WiscarDimension, u8)> + '_ {
        WiscarDimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Unrounded mean of the six dimensions.
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, s)| s as f64).sum::<f64>() / WiscarDimension::ALL.len() as f64
    }

    /// Mean of the six dimensions, rounded for display.
    pub fn average(&self) -> u8 {
        to_score(self.mean())
    }

    /// Lowest-scoring dimension; the earliest in WISCAR order wins ties.
    pub fn weakest(&self) -> WiscarDimension {
        self.iter()
            .fold(None, |acc: Option<(WiscarDimension, u8)>, (d, s)| match acc {
                Some((_, best)) if best <= s => acc,
                _ => Some((d, s)),
            })
            .map(|(d, _)| d)
            .unwrap_or(WiscarDimension::Will)
    }
}

/// Everything shown on the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub overall_score: u8,
    pub psychological_fit: u8,
    pub technical_readiness: u8,
    pub wiscar_scores: WiscarScores,
    pub recommendation: Recommendation,
    pub career_paths: Vec<String>,
    pub next_steps: Vec<String>,
    pub learning_track: LearningTrack,
}

/// Pure transformation from a complete response set to an `AssessmentResult`.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create an engine, rejecting invalid configuration.
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a complete response set.
    ///
    /// Fails with [`AssessmentError::IncompleteAssessment`] if any question in
    /// the bank is unanswered; missing answers are never treated as zero.
    /// Responses to questions outside the bank are ignored.
    pub fn score(
        &self,
        bank: &QuestionBank,
        responses: &ResponseStore,
    ) -> Result<AssessmentResult, AssessmentError> {
        let missing = responses.missing(bank.questions());
        if !missing.is_empty() {
            return Err(AssessmentError::IncompleteAssessment { missing });
        }

        for r in responses.iter() {
            if bank.get(&r.question_id).is_none() {
                tracing::warn!(question = %r.question_id, "ignoring response to unknown question");
            }
        }

        let psychological_fit = average(&bank.section(Section::Psychological), responses)?;
        let technical_readiness = average(&bank.section(Section::Technical), responses)?;

        let mut wiscar_scores = WiscarScores::default();
        for dimension in WiscarDimension::ALL {
            let score = average(&bank.dimension(dimension), responses)?;
            wiscar_scores.set(dimension, score);
        }

        let overall_score = self.overall(psychological_fit, technical_readiness, &wiscar_scores);
        let recommendation = Recommendation::from_score(overall_score, &self.config);

        let mut result = AssessmentResult {
            overall_score,
            psychological_fit,
            technical_readiness,
            wiscar_scores,
            recommendation,
            career_paths: Vec::new(),
            next_steps: Vec::new(),
            learning_track: LearningTrack::Beginner,
        };
        result.career_paths = guidance::career_paths(&result, &self.config);
        result.next_steps = guidance::next_steps(&result, &self.config);
        result.learning_track = guidance::learning_track(&result, &self.config);

        tracing::info!(
            bank = bank.id(),
            overall = overall_score,
            psychological = psychological_fit,
            technical = technical_readiness,
            recommendation = %recommendation,
            "scored assessment"
        );
        Ok(result)
    }

    /// Weighted mean of the three pillars.
    pub fn overall(&self, psychological: u8, technical: u8, wiscar: &WiscarScores) -> u8 {
        let w = &self.config.weights;
        let total = w.psychological + w.technical + w.wiscar;
        let weighted = psychological as f64 * w.psychological
            + technical as f64 * w.technical
            + wiscar.mean() * w.wiscar;
        to_score(weighted / total)
    }
}

/// Rounded mean contribution of `questions`.
fn average(questions: &[&Question], responses: &ResponseStore) -> Result<u8, AssessmentError> {
    let mut sum = 0.0;
    for q in questions {
        let value = responses
            .get(&q.id)
            .ok_or_else(|| AssessmentError::Unanswered(q.id.clone()))?;
        sum += q.contribution(value)?;
    }
    if questions.is_empty() {
        return Ok(0);
    }
    Ok(to_score(sum / questions.len() as f64))
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::minimal_bank;
    use crate::model::{AnswerShape, ResponseValue};

    /// Answer every question at the bottom (0.0) or top (1.0) of its range,
    /// or anywhere in between, rounding to the nearest valid answer.
    fn answer_all(bank: &QuestionBank, level: f64) -> ResponseStore {
        let mut store = ResponseStore::new();
        for q in bank.questions() {
            store.update(&q.id, answer_at(q, level));
        }
        store
    }

    fn answer_at(q: &Question, level: f64) -> ResponseValue {
        match &q.shape {
            AnswerShape::Scale { min, max, .. } => ResponseValue::Scale {
                value: min + ((max - min) as f64 * level).round() as i64,
            },
            AnswerShape::Choice { options } => {
                let (lo, hi) = q.shape.range();
                let target = lo + (hi - lo) * level;
                let weight = options
                    .iter()
                    .map(|o| o.weight)
                    .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
                    .unwrap();
                ResponseValue::Choice { weight }
            }
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::default()).unwrap()
    }

    #[test]
    fn all_max_answers_score_100_and_yes() {
        let bank = QuestionBank::builtin().unwrap();
        let result = engine().score(&bank, &answer_all(&bank, 1.0)).unwrap();
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.psychological_fit, 100);
        assert_eq!(result.technical_readiness, 100);
        assert!(result.wiscar_scores.iter().all(|(_, s)| s == 100));
        assert_eq!(result.recommendation, Recommendation::Yes);
        assert_eq!(result.learning_track, LearningTrack::Advanced);
    }

    #[test]
    fn all_min_answers_score_0_and_no() {
        let bank = QuestionBank::builtin().unwrap();
        let result = engine().score(&bank, &answer_all(&bank, 0.0)).unwrap();
        assert_eq!(result.overall_score, 0);
        assert_eq!(result.psychological_fit, 0);
        assert_eq!(result.technical_readiness, 0);
        assert!(result.wiscar_scores.iter().all(|(_, s)| s == 0));
        assert_eq!(result.recommendation, Recommendation::No);
        assert_eq!(result.learning_track, LearningTrack::Beginner);
    }

    #[test]
    fn sub_scores_stay_in_range() {
        let bank = QuestionBank::builtin().unwrap();
        for step in 0..=10 {
            let result = engine()
                .score(&bank, &answer_all(&bank, step as f64 / 10.0))
                .unwrap();
            assert!(result.overall_score <= 100);
            assert!(result.psychological_fit <= 100);
            assert!(result.technical_readiness <= 100);
            assert!(result.wiscar_scores.iter().all(|(_, s)| s <= 100));
        }
    }

    #[test]
    fn scoring_is_idempotent() {
        let bank = QuestionBank::builtin().unwrap();
        let responses = answer_all(&bank, 0.6);
        let engine = engine();
        let first = engine.score(&bank, &responses).unwrap();
        let second = engine.score(&bank, &responses).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_responses_fail_fast() {
        let bank = minimal_bank();
        let mut responses = answer_all(&bank, 1.0);
        let mut partial = ResponseStore::new();
        for r in responses.iter().filter(|r| r.question_id != "wis-skill") {
            partial.update(&r.question_id, r.value);
        }
        let err = engine().score(&bank, &partial).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::IncompleteAssessment {
                missing: vec!["wis-skill".into()]
            }
        );

        responses.update("wis-skill", ResponseValue::Scale { value: 3 });
        assert!(engine().score(&bank, &responses).is_ok());
        assert!(engine().score(&bank, &ResponseStore::new()).is_err());
    }

    #[test]
    fn section_average_is_rounded_mean_of_contributions() {
        let bank = minimal_bank();
        let mut responses = answer_all(&bank, 0.0);
        // psy-1: 4 on 1..=5 -> 75; psy-2: weight 1 of 0..=2 -> 50; mean 62.5 -> 63
        responses.update("psy-1", ResponseValue::Scale { value: 4 });
        responses.update("psy-2", ResponseValue::Choice { weight: 1.0 });
        let result = engine().score(&bank, &responses).unwrap();
        assert_eq!(result.psychological_fit, 63);
        assert_eq!(result.technical_readiness, 0);
    }

    #[test]
    fn updating_one_answer_only_moves_its_own_scores() {
        let bank = minimal_bank();
        let mut responses = answer_all(&bank, 0.5);
        let before = engine().score(&bank, &responses).unwrap();

        responses.update("wis-skill", ResponseValue::Scale { value: 5 });
        let after = engine().score(&bank, &responses).unwrap();

        assert_eq!(before.psychological_fit, after.psychological_fit);
        assert_eq!(before.technical_readiness, after.technical_readiness);
        for dim in WiscarDimension::ALL {
            if dim != WiscarDimension::Skill {
                assert_eq!(before.wiscar_scores.get(dim), after.wiscar_scores.get(dim));
            }
        }
        assert_eq!(after.wiscar_scores.skill, 100);
    }

    #[test]
    fn recommendation_thresholds_partition_scores() {
        let config = ScoringConfig::default();
        for score in 0..=100u8 {
            let rec = Recommendation::from_score(score, &config);
            let expected = if score >= 75 {
                Recommendation::Yes
            } else if score < 45 {
                Recommendation::No
            } else {
                Recommendation::Maybe
            };
            assert_eq!(rec, expected, "score {score}");
        }
        assert_eq!(Recommendation::from_score(75, &config), Recommendation::Yes);
        assert_eq!(Recommendation::from_score(74, &config), Recommendation::Maybe);
        assert_eq!(Recommendation::from_score(45, &config), Recommendation::Maybe);
        assert_eq!(Recommendation::from_score(44, &config), Recommendation::No);
    }

    #[test]
    fn overall_uses_configured_weights() {
        let wiscar = WiscarScores {
            will: 60,
            interest: 60,
            skill: 60,
            cognitive: 60,
            ability: 60,
            real_world: 60,
        };
        assert_eq!(engine().overall(90, 30, &wiscar), 60);

        let tech_only = ScoringEngine::new(ScoringConfig {
            weights: PillarWeights {
                psychological: 0.0,
                technical: 1.0,
                wiscar: 0.0,
            },
            ..ScoringConfig::default()
        })
        .unwrap();
        assert_eq!(tech_only.overall(90, 30, &wiscar), 30);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let inverted = ScoringConfig {
            yes_threshold: 40,
            no_threshold: 50,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            ScoringEngine::new(inverted),
            Err(ConfigError::InvertedThresholds { .. })
        ));

        let too_high = ScoringConfig {
            yes_threshold: 101,
            ..ScoringConfig::default()
        };
        assert!(too_high.validate().is_err());

        let zero = ScoringConfig {
            weights: PillarWeights {
                psychological: 0.0,
                technical: 0.0,
                wiscar: 0.0,
            },
            ..ScoringConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroWeights));

        let negative = ScoringConfig {
            weights: PillarWeights {
                technical: -1.0,
                ..PillarWeights::default()
            },
            ..ScoringConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn wiscar_weakest_prefers_earliest_on_ties() {
        let scores = WiscarScores {
            will: 80,
            interest: 40,
            skill: 90,
            cognitive: 40,
            ability: 70,
            real_world: 50,
        };
        assert_eq!(scores.weakest(), WiscarDimension::Interest);
        assert_eq!(scores.average(), 62);
    }

    #[test]
    fn result_serializes_camel_case_dimensions() {
        let bank = minimal_bank();
        let result = engine().score(&bank, &answer_all(&bank, 1.0)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["wiscar_scores"]["realWorld"], 100);
        assert_eq!(json["recommendation"], "yes");
    }
}
