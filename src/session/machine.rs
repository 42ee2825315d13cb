//! QuizSession - the answer/navigation state machine
//!
//! A session owns one display order over a shared `QuestionSet`, the
//! current position, the score counters and, for bidirectional sessions,
//! the memo of answers already given. Every command either applies fully
//! or is rejected with no state change.

use ahash::AHashMap;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{Navigation, Question, QuestionSet, SessionConfig, Settings};
use crate::error::{InvalidCommand, QuizError, Result};
use crate::order::{display_order, option_order, OptionOrder};

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A question at `position` in the display order is current
    Active { position: usize },
    /// Advanced past the last question
    Finished,
    /// The question set has no questions
    Empty,
}

/// The answer given to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub selected_option: String,
    pub was_correct: bool,
}

/// Score counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub score: usize,
    pub answered: usize,
    pub total: usize,
}

/// Result of an accepted answer, for feedback rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
    /// Present only when explanations are enabled and non-blank
    pub explanation: Option<String>,
}

/// Read-only view of the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub question: &'a Question,
    pub position: usize,
    pub total: usize,
    /// Options in presentation order
    pub options: Vec<&'a str>,
    pub answer: Option<&'a AnswerRecord>,
}

impl QuestionView<'_> {
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

/// Multiple-choice quiz session
pub struct QuizSession {
    set: Arc<QuestionSet>,
    navigation: Navigation,
    rng: StdRng,
    order: Vec<usize>,
    phase: Phase,
    score: usize,
    answered: usize,
    /// Answers keyed by index into the question set; `None` for linear sessions
    answers: Option<AHashMap<usize, AnswerRecord>>,
    /// Answer given during the current visit of a linear session
    visit_answer: Option<AnswerRecord>,
    /// Option presentation order for the current visit
    visit_options: OptionOrder,
}

impl QuizSession {
    /// Create a session positioned on the first question of a fresh display order
    pub fn new(set: Arc<QuestionSet>, config: SessionConfig) -> Self {
        Self::with_rng(set, config.navigation, config.rng())
    }

    /// Create a session drawing every shuffle from `rng`
    pub fn with_rng(set: Arc<QuestionSet>, navigation: Navigation, rng: StdRng) -> Self {
        let answers = match navigation {
            Navigation::Bidirectional => Some(AHashMap::with_capacity(set.len())),
            Navigation::Linear => None,
        };
        let mut session = Self {
            set,
            navigation,
            rng,
            order: Vec::new(),
            phase: Phase::Empty,
            score: 0,
            answered: 0,
            answers,
            visit_answer: None,
            visit_options: OptionOrder::new(),
        };
        session.reset();
        session
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    pub fn settings(&self) -> &Settings {
        &self.set.settings
    }

    pub fn question_set(&self) -> &Arc<QuestionSet> {
        &self.set
    }

    /// Indices into the question set, in display order
    pub fn display_order(&self) -> &[usize] {
        &self.order
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            answered: self.answered,
            total: self.set.len(),
        }
    }

    /// Recorded answer for a question id (bidirectional sessions only)
    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerRecord> {
        let index = self.set.questions.iter().position(|q| q.id == question_id)?;
        self.answer_at(index)
    }

    /// Recorded answer for the question at `index` in the question set
    pub fn answer_at(&self, index: usize) -> Option<&AnswerRecord> {
        self.answers.as_ref().and_then(|memo| memo.get(&index))
    }

    /// Number of remembered answers, `None` for linear sessions
    pub fn remembered_answers(&self) -> Option<usize> {
        self.answers.as_ref().map(|memo| memo.len())
    }

    /// The question at the current position, with its presentation state
    pub fn current_view(&self) -> Result<QuestionView<'_>> {
        let position = self.active_position()?;
        let index = self.order[position];
        let question = &self.set.questions[index];
        let options = self
            .visit_options
            .iter()
            .filter_map(|&i| question.options.get(i).map(String::as_str))
            .collect();

        Ok(QuestionView {
            question,
            position,
            total: self.order.len(),
            options,
            answer: self.record_at(index),
        })
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Score `selected` against the current question
    ///
    /// A question can be answered once; later calls are rejected and leave
    /// the counters untouched.
    pub fn submit_answer(&mut self, selected: &str) -> Result<Feedback> {
        let position = self.active_position()?;
        let index = self.order[position];
        let question = &self.set.questions[index];

        if self.record_at(index).is_some() {
            return Err(self.reject(InvalidCommand::AlreadyAnswered));
        }
        if selected.is_empty() {
            return Err(self.reject(InvalidCommand::NoSelection));
        }
        if !question.offers(selected) {
            return Err(self.reject(InvalidCommand::UnknownOption));
        }

        let correct = question.is_correct(selected);
        let feedback = Feedback {
            correct,
            correct_answer: question.correct_answer.clone(),
            explanation: self.explanation_for(question),
        };
        let record = AnswerRecord {
            selected_option: selected.to_string(),
            was_correct: correct,
        };

        match self.answers.as_mut() {
            Some(memo) => {
                memo.insert(index, record);
            }
            None => self.visit_answer = Some(record),
        }
        self.answered += 1;
        if correct {
            self.score += 1;
        }

        log::debug!(
            "answered position {} correct={} score={}/{}",
            position,
            correct,
            self.score,
            self.answered
        );
        Ok(feedback)
    }

    /// Move to the next question, or finish after the last one
    pub fn advance(&mut self) -> Result<Phase> {
        let position = self.active_position()?;
        if self.record_at(self.order[position]).is_none() {
            return Err(self.reject(InvalidCommand::NotAnswered));
        }

        if position + 1 < self.order.len() {
            self.enter(position + 1);
        } else {
            self.phase = Phase::Finished;
            self.visit_answer = None;
            self.visit_options.clear();
            log::debug!("quiz finished: {:?}", self.scoreboard());
        }
        Ok(self.phase)
    }

    /// Move back to the previous question (bidirectional sessions only)
    pub fn retreat(&mut self) -> Result<Phase> {
        if self.navigation == Navigation::Linear {
            return Err(self.reject(InvalidCommand::RetreatUnsupported));
        }
        let position = self.active_position()?;
        if position == 0 {
            return Err(self.reject(InvalidCommand::AtFirstQuestion));
        }
        self.enter(position - 1);
        Ok(self.phase)
    }

    /// Clear every answer and counter and start over on a new display order
    pub fn restart(&mut self) -> Phase {
        self.reset();
        log::debug!("quiz restarted with {} questions", self.order.len());
        self.phase
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn reset(&mut self) {
        self.score = 0;
        self.answered = 0;
        if let Some(memo) = self.answers.as_mut() {
            memo.clear();
        }
        let len = self.set.len();
        self.order = display_order(len, self.set.settings.shuffle_questions, &mut self.rng);
        if len == 0 {
            self.phase = Phase::Empty;
            self.visit_answer = None;
            self.visit_options.clear();
        } else {
            self.enter(0);
        }
    }

    /// Make `position` current and fix its option order for this visit
    fn enter(&mut self, position: usize) {
        self.phase = Phase::Active { position };
        self.visit_answer = None;

        let index = self.order[position];
        let answered = self
            .answers
            .as_ref()
            .is_some_and(|memo| memo.contains_key(&index));
        // Answered questions keep their authored order so the stored choice lines up
        let shuffle = self.set.settings.shuffle_options && !answered;
        let option_count = self.set.questions[index].options.len();
        self.visit_options = option_order(option_count, shuffle, &mut self.rng);
    }

    fn active_position(&self) -> Result<usize> {
        match self.phase {
            Phase::Active { position } => Ok(position),
            Phase::Finished => Err(QuizError::InvalidCommand(InvalidCommand::Finished)),
            Phase::Empty => Err(QuizError::EmptyQuiz),
        }
    }

    fn record_at(&self, index: usize) -> Option<&AnswerRecord> {
        match self.answers.as_ref() {
            Some(memo) => memo.get(&index),
            None => self.visit_answer.as_ref(),
        }
    }

    pub(crate) fn explanation_for(&self, question: &Question) -> Option<String> {
        if !self.set.settings.show_explanation {
            return None;
        }
        question.explanation_text().map(str::to_string)
    }

    fn reject(&self, command: InvalidCommand) -> QuizError {
        log::debug!("rejected command in {:?}: {}", self.phase, command);
        QuizError::InvalidCommand(command)
    }
}

impl std::fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizSession")
            .field("navigation", &self.navigation)
            .field("phase", &self.phase)
            .field("order", &self.order)
            .field("scoreboard", &self.scoreboard())
            .finish()
    }
}
