//! Quiz presentation settings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings read from the document's `settings` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub show_progress: bool,
    pub shuffle_options: bool,
    pub show_explanation: bool,
    pub shuffle_questions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_progress: true,
            shuffle_options: true,
            show_explanation: true,
            shuffle_questions: true,
        }
    }
}

impl Settings {
    /// Overlay the known keys of a partial settings object onto `self`.
    ///
    /// Values are taken by truthiness, absent and unknown keys are left alone.
    pub fn merge(mut self, overrides: &Map<String, Value>) -> Self {
        let slots: [(&str, &mut bool); 4] = [
            ("show_progress", &mut self.show_progress),
            ("shuffle_options", &mut self.shuffle_options),
            ("show_explanation", &mut self.show_explanation),
            ("shuffle_questions", &mut self.shuffle_questions),
        ];
        for (key, slot) in slots {
            if let Some(value) = overrides.get(key) {
                *slot = truthy(value);
            }
        }
        self
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
