//! Error types for the quiz runner engine

use pyo3::exceptions::{PyIOError, PyLookupError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

/// Failure to obtain or parse a question document.
///
/// Fatal to session start: a session that fails to load never becomes active.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Could not load quiz data (HTTP {0})")]
    Status(u16),

    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed quiz data: {0}")]
    Malformed(String),

    #[error("Quiz data does not contain 'questions' as an array")]
    MissingQuestions,
}

/// A command the session refused without changing state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCommand {
    #[error("no option selected")]
    NoSelection,

    #[error("option is not offered by the current question")]
    UnknownOption,

    #[error("question already answered")]
    AlreadyAnswered,

    #[error("current question has not been answered")]
    NotAnswered,

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("backward navigation is disabled for this session")]
    RetreatUnsupported,

    #[error("quiz is finished")]
    Finished,
}

/// Main error type for the quiz runner engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid command: {0}")]
    InvalidCommand(#[from] InvalidCommand),

    #[error("Quiz has no questions")]
    EmptyQuiz,
}

impl From<LoadError> for PyErr {
    fn from(err: LoadError) -> PyErr {
        match err {
            LoadError::Transport(_) | LoadError::Status(_) | LoadError::Io { .. } => {
                PyIOError::new_err(err.to_string())
            }
            LoadError::Malformed(_) | LoadError::MissingQuestions => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

impl From<QuizError> for PyErr {
    fn from(err: QuizError) -> PyErr {
        match err {
            QuizError::Load(load) => load.into(),
            QuizError::InvalidCommand(cmd) => {
                PyValueError::new_err(format!("Invalid command: {}", cmd))
            }
            QuizError::EmptyQuiz => PyLookupError::new_err("Quiz has no questions"),
        }
    }
}

/// Result type alias for the quiz runner engine
pub type Result<T> = std::result::Result<T, QuizError>;
