//! Career path, next-step and learning-track selection.
//!
//! Deterministic rules over the computed scores. Candidate lists are fixed;
//! only their selection and order depend on the result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::WiscarDimension;
use crate::scoring::{AssessmentResult, Recommendation, ScoringConfig};

/// A score a career path draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Psychological,
    Technical,
    Wiscar(WiscarDimension),
}

impl Driver {
    fn score(&self, result: &AssessmentResult) -> u8 {
        match self {
            Driver::Psychological => result.psychological_fit,
            Driver::Technical => result.technical_readiness,
            Driver::Wiscar(d) => result.wiscar_scores.get(*d),
        }
    }
}

/// A candidate career path and the scores it depends on.
#[derive(Debug, Clone, Copy)]
pub struct CareerPath {
    pub title: &'static str,
    pub summary: &'static str,
    pub drivers: &'static [Driver],
}

impl CareerPath {
    /// Mean of the driver scores.
    pub fn affinity(&self, result: &AssessmentResult) -> f64 {
        if self.drivers.is_empty() {
            return 0.0;
        }
        self.drivers
            .iter()
            .map(|d| d.score(result) as f64)
            .sum::<f64>()
            / self.drivers.len() as f64
    }
}

/// Career catalogue, in tie-break order.
pub const CAREER_PATHS: &[CareerPath] = &[
    CareerPath {
        title: "Prompt Engineer",
        summary: "Craft effective inputs for AI models",
        drivers: &[
            Driver::Psychological,
            Driver::Wiscar(WiscarDimension::Interest),
            Driver::Wiscar(WiscarDimension::Cognitive),
        ],
    },
    CareerPath {
        title: "AI Research Engineer",
        summary: "Build custom AI applications",
        drivers: &[
            Driver::Technical,
            Driver::Wiscar(WiscarDimension::Skill),
            Driver::Wiscar(WiscarDimension::Will),
        ],
    },
    CareerPath {
        title: "GenAI Product Manager",
        summary: "Guide AI product strategy",
        drivers: &[
            Driver::Psychological,
            Driver::Wiscar(WiscarDimension::RealWorld),
            Driver::Wiscar(WiscarDimension::Interest),
        ],
    },
    CareerPath {
        title: "ML Scientist",
        summary: "Develop new algorithms",
        drivers: &[
            Driver::Technical,
            Driver::Wiscar(WiscarDimension::Cognitive),
            Driver::Wiscar(WiscarDimension::Ability),
        ],
    },
    CareerPath {
        title: "Creative AI Developer",
        summary: "Build artistic AI tools",
        drivers: &[
            Driver::Wiscar(WiscarDimension::Interest),
            Driver::Wiscar(WiscarDimension::Skill),
            Driver::Psychological,
        ],
    },
    CareerPath {
        title: "AI Ethicist",
        summary: "Shape responsible AI use",
        drivers: &[
            Driver::Psychological,
            Driver::Wiscar(WiscarDimension::Cognitive),
            Driver::Wiscar(WiscarDimension::RealWorld),
        ],
    },
];

/// One-line description of a catalogue career path.
///
/// `None` for titles outside the catalogue, such as the fallback path.
pub fn career_summary(title: &str) -> Option<&'static str> {
    CAREER_PATHS
        .iter()
        .find(|path| path.title == title)
        .map(|path| path.summary)
}

/// Suggested when no catalogue path reaches the threshold.
pub const FALLBACK_CAREER_PATH: &str = "AI-Augmented Specialist in your current field";

/// Which of the two fixed learning-resource tracks to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningTrack {
    Beginner,
    Advanced,
}

impl LearningTrack {
    pub fn title(&self) -> &'static str {
        match self {
            LearningTrack::Beginner => "Beginner Track",
            LearningTrack::Advanced => "Advanced Track",
        }
    }

    pub fn resources(&self) -> &'static [&'static str] {
        match self {
            LearningTrack::Beginner => &[
                "Python Programming Fundamentals",
                "Introduction to Machine Learning",
                "OpenAI Playground & Prompt Engineering",
            ],
            LearningTrack::Advanced => &[
                "Transformer Architecture Deep Dive",
                "Fine-tuning and RLHF",
                "Multi-modal AI Applications",
            ],
        }
    }
}

impl fmt::Display for LearningTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningTrack::Beginner => write!(f, "beginner"),
            LearningTrack::Advanced => write!(f, "advanced"),
        }
    }
}

/// Paths whose affinity reaches the career threshold, strongest first.
pub fn career_paths(result: &AssessmentResult, config: &ScoringConfig) -> Vec<String> {
    let threshold = config.career_threshold as f64;
    let mut ranked: Vec<(usize, f64)> = CAREER_PATHS
        .iter()
        .enumerate()
        .map(|(i, p)| (i, p.affinity(result)))
        .filter(|(_, affinity)| *affinity >= threshold)
        .collect();
    // stable sort keeps catalogue order on ties
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let paths: Vec<String> = ranked
        .into_iter()
        .take(config.max_career_paths)
        .map(|(i, _)| CAREER_PATHS[i].title.to_string())
        .collect();

    if paths.is_empty() {
        vec![FALLBACK_CAREER_PATH.to_string()]
    } else {
        paths
    }
}

/// Ordered next steps: verdict, technical foundation or practice, weakest
/// WISCAR dimension, community.
pub fn next_steps(result: &AssessmentResult, config: &ScoringConfig) -> Vec<String> {
    let mut steps = Vec::new();

    steps.push(
        match result.recommendation {
            Recommendation::Yes => {
                "Enroll in a structured Generative AI course or specialization"
            }
            Recommendation::Maybe => {
                "Try a short hands-on prompt engineering workshop before committing"
            }
            Recommendation::No => {
                "Explore adjacent fields such as data analysis or UX research that use AI tools"
            }
        }
        .to_string(),
    );

    if result.technical_readiness < config.track_threshold {
        steps.push("Strengthen your Python programming fundamentals".to_string());
        steps.push("Review linear algebra, probability and statistics basics".to_string());
    } else {
        steps.push("Build a small project on top of a hosted LLM API".to_string());
        steps.push("Study the transformer architecture and fine-tuning techniques".to_string());
    }

    steps.push(weakest_dimension_step(result.wiscar_scores.weakest()).to_string());
    steps.push("Join a Generative AI community to learn from practitioners".to_string());

    steps
}

fn weakest_dimension_step(dimension: WiscarDimension) -> &'static str {
    match dimension {
        WiscarDimension::Will => "Set a weekly learning schedule and track your streak",
        WiscarDimension::Interest => {
            "Sample a few Gen AI applications to find the area that excites you most"
        }
        WiscarDimension::Skill => "Practice with small coding and data exercises every week",
        WiscarDimension::Cognitive => {
            "Work through system design and problem-solving exercises"
        }
        WiscarDimension::Ability => {
            "Pick one new tool and write up what you learned after a week"
        }
        WiscarDimension::RealWorld => {
            "Talk to people working in Gen AI roles about their day-to-day work"
        }
    }
}

/// `Advanced` once technical readiness reaches the track threshold.
pub fn learning_track(result: &AssessmentResult, config: &ScoringConfig) -> LearningTrack {
    if result.technical_readiness >= config.track_threshold {
        LearningTrack::Advanced
    } else {
        LearningTrack::Beginner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WiscarScores;

    fn result(psych: u8, tech: u8, wiscar: WiscarScores) -> AssessmentResult {
        AssessmentResult {
            overall_score: 0,
            psychological_fit: psych,
            technical_readiness: tech,
            wiscar_scores: wiscar,
            recommendation: Recommendation::Maybe,
            career_paths: vec![],
            next_steps: vec![],
            learning_track: LearningTrack::Beginner,
        }
    }

    fn flat(score: u8) -> WiscarScores {
        WiscarScores {
            will: score,
            interest: score,
            skill: score,
            cognitive: score,
            ability: score,
            real_world: score,
        }
    }

    #[test]
    fn career_summaries_come_from_the_catalogue() {
        assert_eq!(
            career_summary("Prompt Engineer"),
            Some("Craft effective inputs for AI models")
        );
        assert_eq!(career_summary("AI Ethicist"), Some("Shape responsible AI use"));
        assert_eq!(career_summary(FALLBACK_CAREER_PATH), None);
    }

    #[test]
    fn strong_technical_profile_ranks_technical_paths_first() {
        let r = result(50, 100, flat(80));
        let paths = career_paths(&r, &ScoringConfig::default());
        assert_eq!(paths[0], "AI Research Engineer");
        assert_eq!(paths[1], "ML Scientist");
        assert!(paths.len() <= 4);
    }

    #[test]
    fn ties_keep_catalogue_order_and_cap_applies() {
        let r = result(80, 80, flat(80));
        let paths = career_paths(&r, &ScoringConfig::default());
        assert_eq!(
            paths,
            vec![
                "Prompt Engineer",
                "AI Research Engineer",
                "GenAI Product Manager",
                "ML Scientist"
            ]
        );
    }

    #[test]
    fn weak_profile_gets_fallback_path() {
        let r = result(10, 10, flat(10));
        assert_eq!(
            career_paths(&r, &ScoringConfig::default()),
            vec![FALLBACK_CAREER_PATH]
        );
    }

    #[test]
    fn next_steps_follow_technical_readiness_and_weakest_dimension() {
        let mut wiscar = flat(70);
        wiscar.real_world = 20;
        let mut r = result(70, 30, wiscar);
        r.recommendation = Recommendation::No;

        let steps = next_steps(&r, &ScoringConfig::default());
        assert_eq!(steps.len(), 5);
        assert!(steps[0].contains("adjacent fields"));
        assert!(steps[1].contains("Python"));
        assert!(steps[3].contains("Gen AI roles"));
        assert!(steps[4].contains("community"));

        r.technical_readiness = 90;
        let steps = next_steps(&r, &ScoringConfig::default());
        assert!(steps[1].contains("hosted LLM API"));
    }

    #[test]
    fn learning_track_threshold() {
        let config = ScoringConfig::default();
        assert_eq!(
            learning_track(&result(0, 59, flat(0)), &config),
            LearningTrack::Beginner
        );
        assert_eq!(
            learning_track(&result(0, 60, flat(0)), &config),
            LearningTrack::Advanced
        );
        assert_eq!(LearningTrack::Advanced.resources().len(), 3);
    }
}
