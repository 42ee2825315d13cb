//! Quiz loading module
//!
//! Loading is the only suspending step: fetch the document, parse it into a
//! `QuestionSet` and start a session. A failed load yields a slot that is
//! distinguishable from any started session.

mod source;

pub use source::*;

use std::sync::Arc;

use crate::config::{parse_document, QuestionSet, SessionConfig};
use crate::error::LoadError;
use crate::session::{QuizSession, RenderModel};

/// Fetch and parse a question document
pub async fn load(source: &QuizSource) -> Result<Arc<QuestionSet>, LoadError> {
    let text = source.fetch().await?;
    let set = parse_document(&text)?;
    log::info!(
        "loaded {} questions (shuffle_questions={}, shuffle_options={})",
        set.len(),
        set.settings.shuffle_questions,
        set.settings.shuffle_options
    );
    Ok(set)
}

/// Load a document and start a session on it
pub async fn start(source: &QuizSource, config: SessionConfig) -> SessionSlot {
    SessionSlot::from_load(load(source).await, config)
}

/// Outcome of a start attempt
#[derive(Debug)]
pub enum SessionSlot {
    Started(QuizSession),
    /// Load failed; no session state exists
    NotStarted(LoadError),
}

impl SessionSlot {
    /// Start a session on a loaded set, or keep the load error
    pub fn from_load(loaded: Result<Arc<QuestionSet>, LoadError>, config: SessionConfig) -> Self {
        match loaded {
            Ok(set) => SessionSlot::Started(QuizSession::new(set, config)),
            Err(err) => {
                log::warn!("quiz failed to load: {}", err);
                SessionSlot::NotStarted(err)
            }
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            SessionSlot::Started(session) => Some(session),
            SessionSlot::NotStarted(_) => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match self {
            SessionSlot::Started(session) => Some(session),
            SessionSlot::NotStarted(_) => None,
        }
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            SessionSlot::Started(_) => None,
            SessionSlot::NotStarted(err) => Some(err),
        }
    }

    /// Render model for either outcome
    pub fn render(&self) -> RenderModel {
        match self {
            SessionSlot::Started(session) => session.render(),
            SessionSlot::NotStarted(err) => RenderModel::load_failure(err),
        }
    }
}
