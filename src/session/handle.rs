//! QuizRunner - Python handle over a session slot
//!
//! This module provides the QuizRunner PyClass the presentation layer
//! drives. Commands the session rejects come back as `False` or as an
//! `accepted: False` dict instead of raising, so a stray click never
//! surfaces as an exception.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use super::{Feedback, Phase, QuestionView, RenderModel, Scoreboard};
use crate::error::QuizError;
use crate::loader::SessionSlot;

// ============================================================================
// QuizRunner PyClass
// ============================================================================

/// QuizRunner - a started quiz session, or the error that kept it from starting
#[pyclass]
#[derive(Debug)]
pub struct QuizRunner {
    slot: SessionSlot,
}

impl QuizRunner {
    pub fn new(slot: SessionSlot) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    /// Submit an answer, reporting rejection as an error
    pub fn try_submit(&mut self, option: &str) -> Result<Feedback, QuizError> {
        match &mut self.slot {
            SessionSlot::Started(session) => session.submit_answer(option),
            SessionSlot::NotStarted(err) => Err(QuizError::Load(err.clone())),
        }
    }

    pub fn try_advance(&mut self) -> Result<Phase, QuizError> {
        match &mut self.slot {
            SessionSlot::Started(session) => session.advance(),
            SessionSlot::NotStarted(err) => Err(QuizError::Load(err.clone())),
        }
    }

    pub fn try_retreat(&mut self) -> Result<Phase, QuizError> {
        match &mut self.slot {
            SessionSlot::Started(session) => session.retreat(),
            SessionSlot::NotStarted(err) => Err(QuizError::Load(err.clone())),
        }
    }

    fn phase_name(&self) -> &'static str {
        match self.slot.session().map(|s| s.phase()) {
            None => "not_started",
            Some(Phase::Empty) => "empty",
            Some(Phase::Active { .. }) => "active",
            Some(Phase::Finished) => "finished",
        }
    }
}

// ============================================================================
// PyMethods Implementation
// ============================================================================

#[pymethods]
impl QuizRunner {
    // ------------------------------------------------------------------------
    // Getter Properties
    // ------------------------------------------------------------------------

    /// Whether the quiz data loaded and a session exists
    #[getter]
    fn is_started(&self) -> bool {
        self.slot.session().is_some()
    }

    #[getter]
    fn is_finished(&self) -> bool {
        self.slot.session().is_some_and(|s| s.is_finished())
    }

    /// One of "not_started", "empty", "active", "finished"
    #[getter]
    fn phase(&self) -> &'static str {
        self.phase_name()
    }

    /// Current position in the display order, if a question is current
    #[getter]
    fn position(&self) -> Option<usize> {
        match self.slot.session().map(|s| s.phase()) {
            Some(Phase::Active { position }) => Some(position),
            _ => None,
        }
    }

    #[getter]
    fn total_questions(&self) -> usize {
        self.slot.session().map(|s| s.scoreboard().total).unwrap_or(0)
    }

    #[getter]
    fn navigation(&self) -> Option<String> {
        self.slot.session().map(|s| s.navigation().to_string())
    }

    /// Load error message for a quiz that never started
    #[getter]
    fn load_error(&self) -> Option<String> {
        self.slot.load_error().map(|e| e.to_string())
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Answer the current question
    ///
    /// # Returns
    /// Dict with `accepted`, and on acceptance `correct`, `correct_answer`
    /// and `explanation`; on rejection `reason`
    fn submit_answer(&mut self, py: Python<'_>, option: &str) -> PyResult<Py<PyAny>> {
        let dict = PyDict::new(py);
        match self.try_submit(option) {
            Ok(feedback) => {
                dict.set_item("accepted", true)?;
                dict.set_item("correct", feedback.correct)?;
                dict.set_item("correct_answer", feedback.correct_answer)?;
                dict.set_item("explanation", feedback.explanation)?;
            }
            Err(err) => {
                dict.set_item("accepted", false)?;
                dict.set_item("reason", err.to_string())?;
            }
        }
        Ok(dict.into_any().unbind())
    }

    /// Move forward; returns whether the command was accepted
    fn advance(&mut self) -> bool {
        self.try_advance().is_ok()
    }

    /// Move back; returns whether the command was accepted
    fn retreat(&mut self) -> bool {
        self.try_retreat().is_ok()
    }

    /// Start over; returns False for a quiz that never started
    fn restart(&mut self) -> bool {
        match self.slot.session_mut() {
            Some(session) => {
                session.restart();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Current question with its presentation state
    ///
    /// # Raises
    /// LookupError for a quiz with no questions, ValueError once finished,
    /// IOError/ValueError for a quiz that never started
    fn current_view(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        match &self.slot {
            SessionSlot::Started(session) => {
                let view = session.current_view()?;
                Ok(view_to_dict(py, &view)?.into_any().unbind())
            }
            SessionSlot::NotStarted(err) => Err(err.clone().into()),
        }
    }

    fn scoreboard(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let board = self.slot.session().map(|s| s.scoreboard()).unwrap_or(Scoreboard {
            score: 0,
            answered: 0,
            total: 0,
        });
        Ok(scoreboard_to_dict(py, &board)?.into_any().unbind())
    }

    /// Full render model as a dict
    fn render(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        Ok(render_to_dict(py, &self.slot.render())?.into_any().unbind())
    }

    /// Full render model as a JSON string
    fn render_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.slot.render())
            .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        match self.slot.session() {
            Some(session) => {
                let board = session.scoreboard();
                format!(
                    "QuizRunner(phase={}, score={}, answered={}, total={})",
                    self.phase_name(),
                    board.score,
                    board.answered,
                    board.total
                )
            }
            None => format!("QuizRunner(phase={})", self.phase_name()),
        }
    }
}

// ============================================================================
// Dict Conversion Helpers
// ============================================================================

fn scoreboard_to_dict<'py>(py: Python<'py>, board: &Scoreboard) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("score", board.score)?;
    dict.set_item("answered", board.answered)?;
    dict.set_item("total", board.total)?;
    Ok(dict)
}

fn view_to_dict<'py>(py: Python<'py>, view: &QuestionView<'_>) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", &view.question.id)?;
    dict.set_item("type", &view.question.kind)?;
    dict.set_item("prompt", &view.question.prompt)?;
    dict.set_item("position", view.position)?;
    dict.set_item("total", view.total)?;
    dict.set_item("options", PyList::new(py, view.options.iter().copied())?)?;
    dict.set_item("answered", view.is_answered())?;
    dict.set_item("selected", view.answer.map(|a| a.selected_option.as_str()))?;
    dict.set_item("was_correct", view.answer.map(|a| a.was_correct))?;
    Ok(dict)
}

fn render_to_dict<'py>(py: Python<'py>, model: &RenderModel) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("status", &model.status)?;
    dict.set_item("progress", &model.progress)?;
    dict.set_item("prompt", &model.prompt)?;

    let options = PyList::empty(py);
    for option in &model.options {
        let item = PyDict::new(py);
        item.set_item("text", &option.text)?;
        item.set_item("checked", option.checked)?;
        item.set_item("disabled", option.disabled)?;
        options.append(item)?;
    }
    dict.set_item("options", options)?;

    match &model.feedback {
        Some(feedback) => {
            let item = PyDict::new(py);
            item.set_item("correct", feedback.correct)?;
            item.set_item("correct_answer", &feedback.correct_answer)?;
            dict.set_item("feedback", item)?;
        }
        None => dict.set_item("feedback", py.None())?,
    }

    dict.set_item("explanation", model.explanation.as_deref())?;
    dict.set_item("summary", model.summary.as_deref())?;
    dict.set_item("error_detail", model.error_detail.as_deref())?;
    dict.set_item("scoreboard", scoreboard_to_dict(py, &model.scoreboard)?)?;

    let controls = PyDict::new(py);
    controls.set_item("answer", model.controls.answer)?;
    controls.set_item("next", model.controls.next)?;
    controls.set_item("previous", model.controls.previous)?;
    controls.set_item("restart", model.controls.restart)?;
    dict.set_item("controls", controls)?;

    Ok(dict)
}

// ============================================================================
// Tests (no Python interpreter required)
// ============================================================================
