//! Step controller for one assessment run.
//!
//! A [`Session`] owns the question bank, the response store, one question
//! cursor per section and the cached result. Front-ends drive it with
//! answer/next/previous/advance/retreat/jump calls and render whatever state
//! it reports back.

use std::fmt;

use crate::bank::QuestionBank;
use crate::error::AssessmentError;
use crate::model::{Question, ResponseValue, Section};
use crate::responses::ResponseStore;
use crate::scoring::{AssessmentResult, ScoringEngine};

/// The five screens of an assessment, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Introduction,
    Psychological,
    Technical,
    Wiscar,
    Results,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Introduction,
        Step::Psychological,
        Step::Technical,
        Step::Wiscar,
        Step::Results,
    ];

    pub fn index(&self) -> usize {
        match self {
            Step::Introduction => 0,
            Step::Psychological => 1,
            Step::Technical => 2,
            Step::Wiscar => 3,
            Step::Results => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    /// The section answered on this step, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            Step::Psychological => Some(Section::Psychological),
            Step::Technical => Some(Section::Technical),
            Step::Wiscar => Some(Section::Wiscar),
            Step::Introduction | Step::Results => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Introduction => "Introduction",
            Step::Psychological => "Psychological Fit",
            Step::Technical => "Technical Aptitude",
            Step::Wiscar => "WISCAR Analysis",
            Step::Results => "Your Results",
        }
    }

    /// Overall progress shown in the header: 20% per step, starting at 20%.
    pub fn progress_percent(&self) -> u8 {
        20 + 20 * self.index() as u8
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position within a section's ordered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCursor {
    position: usize,
    len: usize,
}

impl SectionCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.len
    }

    /// Move forward one question. Returns `false` on the last question.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Move back one question. Returns `false` on the first question.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Section-local progress, counting the current question as seen.
    pub fn progress_percent(&self) -> u8 {
        if self.len == 0 {
            return 100;
        }
        (((self.position + 1) as f64 / self.len as f64) * 100.0).round() as u8
    }
}

/// Where a "next" action landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Moved to another question of the same section (0-based index).
    Question(usize),
    /// Left the section; the session is now on this step.
    Step(Step),
}

/// State of one assessment run.
#[derive(Debug, Clone)]
pub struct Session {
    bank: QuestionBank,
    engine: ScoringEngine,
    step: Step,
    responses: ResponseStore,
    cursors: [SectionCursor; 3],
    result: Option<AssessmentResult>,
}

impl Session {
    pub fn new(bank: QuestionBank, engine: ScoringEngine) -> Self {
        let cursors = cursors_for(&bank);
        Self {
            bank,
            engine,
            step: Step::Introduction,
            responses: ResponseStore::new(),
            cursors,
            result: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn progress_percent(&self) -> u8 {
        self.step.progress_percent()
    }

    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    /// The cached result of the last transition into the results step.
    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// Move to the next step.
    ///
    /// Entering the results step scores the full response store and caches
    /// the result first; if scoring fails the step is left unchanged.
    /// Advancing from the results step does nothing.
    pub fn advance(&mut self) -> Result<Step, AssessmentError> {
        let Some(next) = Step::from_index(self.step.index() + 1) else {
            return Ok(self.step);
        };
        if next == Step::Results {
            let result = self.engine.score(&self.bank, &self.responses)?;
            self.result = Some(result);
        }
        tracing::debug!(from = %self.step, to = %next, "advanced");
        self.step = next;
        Ok(next)
    }

    /// Move to the previous step, stopping at the introduction.
    pub fn retreat(&mut self) -> Step {
        if let Some(prev) = self.step.index().checked_sub(1).and_then(Step::from_index) {
            tracing::debug!(from = %self.step, to = %prev, "retreated");
            self.step = prev;
        }
        self.step
    }

    /// Show `step` directly. Never re-scores.
    pub fn jump(&mut self, step: Step) {
        tracing::debug!(from = %self.step, to = %step, "jumped");
        self.step = step;
    }

    /// Record an answer after checking it against the question.
    pub fn answer(&mut self, question_id: &str, value: ResponseValue) -> Result<(), AssessmentError> {
        let question = self
            .bank
            .get(question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.to_string()))?;
        question.check(&value)?;
        self.responses.update(question_id, value);
        Ok(())
    }

    /// Answer the question currently displayed in the active section.
    pub fn answer_current(&mut self, value: ResponseValue) -> Result<(), AssessmentError> {
        let id = self
            .current_question()
            .ok_or(AssessmentError::NoActiveSection)?
            .id
            .clone();
        self.answer(&id, value)
    }

    pub fn section_questions(&self, section: Section) -> Vec<&Question> {
        self.bank.section(section)
    }

    pub fn is_section_complete(&self, section: Section) -> bool {
        self.responses
            .is_section_complete(self.bank.section(section))
    }

    pub fn cursor(&self, section: Section) -> &SectionCursor {
        &self.cursors[section_slot(section)]
    }

    /// The question displayed on the current step, if it is a section step.
    pub fn current_question(&self) -> Option<&Question> {
        let section = self.step.section()?;
        let position = self.cursor(section).position();
        self.bank.section(section).get(position).copied()
    }

    /// Move past the current question.
    ///
    /// Requires the current question to be answered. On the last question of
    /// the section it requires the whole section to be answered and then
    /// advances the step instead.
    pub fn next_question(&mut self) -> Result<Movement, AssessmentError> {
        let section = self.step.section().ok_or(AssessmentError::NoActiveSection)?;
        let question = self
            .current_question()
            .ok_or(AssessmentError::NoActiveSection)?;
        if !self.responses.is_answered(&question.id) {
            return Err(AssessmentError::Unanswered(question.id.clone()));
        }

        let slot = section_slot(section);
        if self.cursors[slot].next() {
            return Ok(Movement::Question(self.cursors[slot].position()));
        }

        let missing = self.responses.missing(self.bank.section(section));
        if !missing.is_empty() {
            return Err(AssessmentError::SectionIncomplete { section, missing });
        }
        self.advance().map(Movement::Step)
    }

    /// Go back one question within the active section. Returns the new
    /// position, or `None` on the first question.
    pub fn previous_question(&mut self) -> Option<usize> {
        let section = self.step.section()?;
        let cursor = &mut self.cursors[section_slot(section)];
        cursor.previous().then(|| cursor.position())
    }

    /// Discard all responses, the cached result and cursor positions.
    pub fn restart(&mut self) {
        tracing::debug!(answered = self.responses.len(), "restarting assessment");
        self.responses = ResponseStore::new();
        self.result = None;
        self.cursors = cursors_for(&self.bank);
        self.step = Step::Introduction;
    }
}

fn section_slot(section: Section) -> usize {
    match section {
        Section::Psychological => 0,
        Section::Technical => 1,
        Section::Wiscar => 2,
    }
}

fn cursors_for(bank: &QuestionBank) -> [SectionCursor; 3] {
    Section::ALL.map(|s| SectionCursor::new(bank.section(s).len()))
}
