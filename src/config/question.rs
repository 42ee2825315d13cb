//! Question structures and raw record normalization

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LoadError;

/// Question type used when a record does not carry one
pub const DEFAULT_QUESTION_TYPE: &str = "single_choice";

/// A single multiple-choice question, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    /// Whether `option` is one of the displayed choices
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Exact text comparison against the correct answer
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }

    /// Explanation text if it carries anything besides whitespace
    pub fn explanation_text(&self) -> Option<&str> {
        let trimmed = self.explanation.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(self.explanation.as_str())
        }
    }
}

/// Coerce any JSON value to text
///
/// `null` becomes the empty string, arrays are joined with `,`.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_to_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn field_text(record: &Map<String, Value>, name: &str) -> Option<String> {
    match record.get(name) {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_to_text(v)),
    }
}

/// Normalize one raw question record
///
/// `index` is only used for error reporting.
pub fn normalize_question(index: usize, raw: &Value) -> Result<Question, LoadError> {
    let record = raw.as_object().ok_or_else(|| {
        LoadError::Malformed(format!("question #{} is not an object", index + 1))
    })?;

    let options = match record.get("options") {
        Some(Value::Array(items)) => items.iter().map(value_to_text).collect(),
        _ => Vec::new(),
    };

    // Root explanation wins over the nested meta.explicacion fallback
    let explanation = field_text(record, "explanation")
        .or_else(|| {
            record
                .get("meta")
                .and_then(Value::as_object)
                .and_then(|meta| field_text(meta, "explicacion"))
        })
        .unwrap_or_default();

    Ok(Question {
        id: field_text(record, "id").unwrap_or_default(),
        kind: field_text(record, "type").unwrap_or_else(|| DEFAULT_QUESTION_TYPE.to_string()),
        prompt: field_text(record, "question").unwrap_or_default(),
        options,
        correct_answer: field_text(record, "correct_answer").unwrap_or_default(),
        explanation,
    })
}
