//! Quiz Runner Core - multiple-choice quiz session engine
//!
//! This crate loads a question document, drives one quiz session per user
//! through answering, navigation, scoring and restart, and hands the
//! presentation layer a pure render model after each command. Python
//! bindings are provided via PyO3.

use pyo3::prelude::*;

pub mod config;
pub mod error;
pub mod loader;
pub mod order;
pub mod session;

use crate::config::{Navigation, QuestionSet, SessionConfig};
use crate::loader::{QuizSource, SessionSlot};
use crate::session::{QuizRunner, QuizSession};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;

// ============================================================================
// Cached Question Set
// ============================================================================

/// Question set loaded by `init_quiz`, shared by every `new_session`
static CACHED_QUIZ: OnceCell<RwLock<Arc<QuestionSet>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

fn session_config(navigation: &str, seed: Option<u64>) -> PyResult<SessionConfig> {
    let navigation: Navigation = navigation
        .parse()
        .map_err(PyErr::new::<pyo3::exceptions::PyValueError, _>)?;
    Ok(SessionConfig { navigation, seed })
}

// ============================================================================
// Python Functions
// ============================================================================

/// Start a quiz from document text
///
/// # Arguments
/// * `text` - JSON document with optional `settings` and a `questions` array
/// * `navigation` - "bidirectional" (default) or "linear"
/// * `seed` - Optional seed making every shuffle reproducible
///
/// # Returns
/// A QuizRunner; if the document is invalid the runner is not started and
/// renders an error state
#[pyfunction]
#[pyo3(signature = (text, navigation="bidirectional", seed=None))]
fn parse_quiz(text: &str, navigation: &str, seed: Option<u64>) -> PyResult<QuizRunner> {
    let config = session_config(navigation, seed)?;
    let slot = SessionSlot::from_load(crate::config::parse_document(text), config);
    Ok(QuizRunner::new(slot))
}

/// Load a quiz from a file path or http(s) URL, blocking until done
///
/// The GIL is released while the document is fetched.
#[pyfunction]
#[pyo3(signature = (source, navigation="bidirectional", seed=None))]
fn load_quiz(
    py: Python<'_>,
    source: &str,
    navigation: &str,
    seed: Option<u64>,
) -> PyResult<QuizRunner> {
    let config = session_config(navigation, seed)?;
    let source = QuizSource::parse(source);
    let slot = py.detach(|| {
        pyo3_async_runtimes::tokio::get_runtime().block_on(loader::start(&source, config))
    });
    Ok(QuizRunner::new(slot))
}

/// Load a quiz asynchronously
///
/// # Returns
/// A Python awaitable that resolves to a QuizRunner
///
/// # Example (Python)
/// ```python
/// runner = await load_quiz_async("https://example.com/quiz.json")
/// print(runner.render()["prompt"])
/// ```
#[pyfunction]
#[pyo3(signature = (source, navigation="bidirectional", seed=None))]
fn load_quiz_async<'py>(
    py: Python<'py>,
    source: &str,
    navigation: &str,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyAny>> {
    let config = session_config(navigation, seed)?;
    let source = QuizSource::parse(source);

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let slot = loader::start(&source, config).await;
        Ok(QuizRunner::new(slot))
    })
}

/// Load and cache a question set for `new_session`
///
/// # Raises
/// IOError or ValueError if the document cannot be loaded
#[pyfunction]
fn init_quiz(py: Python<'_>, source: &str) -> PyResult<usize> {
    let source = QuizSource::parse(source);
    let set = py.detach(|| {
        pyo3_async_runtimes::tokio::get_runtime().block_on(loader::load(&source))
    })?;
    let count = set.len();

    // If already initialized, replace the cached set
    let cached = CACHED_QUIZ.get_or_init(|| RwLock::new(set.clone()));
    *cached.write() = set;

    Ok(count)
}

/// Check if a question set is cached
#[pyfunction]
fn is_quiz_initialized() -> bool {
    CACHED_QUIZ.get().is_some()
}

/// Start an independent session over the cached question set
///
/// # Raises
/// RuntimeError if `init_quiz` was not called first
#[pyfunction]
#[pyo3(signature = (navigation="bidirectional", seed=None))]
fn new_session(navigation: &str, seed: Option<u64>) -> PyResult<QuizRunner> {
    let config = session_config(navigation, seed)?;
    let set = CACHED_QUIZ
        .get()
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                "Quiz not initialized. Call init_quiz() first.",
            )
        })?
        .read()
        .clone();

    Ok(QuizRunner::new(SessionSlot::Started(QuizSession::new(set, config))))
}

/// Escape text for safe inclusion in HTML
#[pyfunction]
fn escape_html(text: &str) -> String {
    session::escape_html(text)
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn quiz_runner_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(load_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(load_quiz_async, m)?)?;
    m.add_function(wrap_pyfunction!(init_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(is_quiz_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(new_session, m)?)?;
    m.add_function(wrap_pyfunction!(escape_html, m)?)?;
    m.add_class::<QuizRunner>()?;
    Ok(())
}
