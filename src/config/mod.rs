//! Configuration module for quiz data structures
//!
//! This module handles parsing and normalization of the question document
//! and the options a session is constructed with.

mod question;
mod session;
mod settings;

pub use question::*;
pub use session::*;
pub use settings::*;

use crate::error::LoadError;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Loaded quiz data: settings plus the ordered question list
///
/// Fixed after load and shared by every session built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    pub settings: Settings,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(settings: Settings, questions: Vec<Question>) -> Arc<Self> {
        Arc::new(Self { settings, questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parse a question document
///
/// Expected format: `{"settings": {...}?, "questions": [{...}, ...]}`
pub fn parse_document(text: &str) -> Result<Arc<QuestionSet>, LoadError> {
    let root: Value =
        serde_json::from_str(text).map_err(|e| LoadError::Malformed(e.to_string()))?;
    let root = root
        .as_object()
        .ok_or_else(|| LoadError::Malformed("document root is not an object".to_string()))?;

    let settings = match root.get("settings") {
        Some(Value::Object(overrides)) => Settings::default().merge(overrides),
        _ => Settings::default(),
    };

    let raw_questions = match root.get("questions") {
        Some(Value::Array(items)) => items,
        _ => return Err(LoadError::MissingQuestions),
    };

    let questions = raw_questions
        .iter()
        .enumerate()
        .map(|(i, raw)| normalize_question(i, raw))
        .collect::<Result<Vec<_>, _>>()?;

    warn_on_suspicious_ids(&questions);

    Ok(QuestionSet::new(settings, questions))
}

fn warn_on_suspicious_ids(questions: &[Question]) {
    let mut seen = HashSet::with_capacity(questions.len());
    for (i, q) in questions.iter().enumerate() {
        if q.id.is_empty() {
            log::warn!("question #{} has an empty id", i + 1);
        } else if !seen.insert(q.id.as_str()) {
            log::warn!("question #{} reuses id {:?}", i + 1, q.id);
        }
    }
}
