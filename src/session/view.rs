//! Render model handed to the presentation layer
//!
//! The renderer never touches session state; it redraws from a
//! `RenderModel` after each command.

use serde::Serialize;

use super::{Phase, QuizSession, Scoreboard};
use crate::config::Navigation;
use crate::error::{LoadError, QuizError};

/// Placeholder shown when a question has no prompt text
pub const EMPTY_PROMPT: &str = "(No prompt)";

/// One selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub text: String,
    /// Pre-selected because it is the stored answer
    pub checked: bool,
    /// Inputs are locked once the question is answered
    pub disabled: bool,
}

/// Correctness feedback for an answered question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub correct: bool,
    /// Shown alongside an incorrect answer
    pub correct_answer: String,
}

/// Enabled state of each navigation action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// The renderer additionally requires a checked option
    pub answer: bool,
    pub next: bool,
    pub previous: bool,
    pub restart: bool,
}

/// Everything needed to draw one frame of the quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Status line, empty unless something went wrong
    pub status: String,
    pub progress: String,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub feedback: Option<FeedbackView>,
    pub explanation: Option<String>,
    /// Final score line once the quiz is finished
    pub summary: Option<String>,
    /// Markup-safe error detail for a quiz that failed to start
    pub error_detail: Option<String>,
    pub scoreboard: Scoreboard,
    pub controls: Controls,
}

impl RenderModel {
    fn blank(scoreboard: Scoreboard) -> Self {
        Self {
            status: String::new(),
            progress: String::new(),
            prompt: String::new(),
            options: Vec::new(),
            feedback: None,
            explanation: None,
            summary: None,
            error_detail: None,
            scoreboard,
            controls: Controls::default(),
        }
    }

    /// Frame for an active position whose question cannot be viewed
    fn mark_unavailable(&mut self, position: usize, error: &QuizError) {
        log::warn!("no view for active position {}: {}", position, error);
        self.status = "Question unavailable.".to_string();
        self.controls = Controls {
            restart: true,
            ..Controls::default()
        };
    }

    /// Display-only model for a quiz that never started
    pub fn load_failure(error: &LoadError) -> Self {
        let mut model = Self::blank(Scoreboard {
            score: 0,
            answered: 0,
            total: 0,
        });
        model.status = "Failed to load.".to_string();
        model.prompt = "Could not start the quiz.".to_string();
        model.error_detail = Some(escape_html(&format!("Detail: {}", error)));
        model
    }
}

impl QuizSession {
    /// Build the render model for the current state
    pub fn render(&self) -> RenderModel {
        let scoreboard = self.scoreboard();
        let show_progress = self.settings().show_progress;
        let mut model = RenderModel::blank(scoreboard);

        match self.phase() {
            Phase::Empty => {
                model.status = "This quiz has no questions.".to_string();
                model.controls.restart = true;
            }
            Phase::Finished => {
                if show_progress {
                    model.progress = "Finished".to_string();
                }
                model.prompt = "End of quiz".to_string();
                model.summary = Some(format!(
                    "Score: {} / {}",
                    scoreboard.score, scoreboard.total
                ));
                model.controls.restart = true;
            }
            Phase::Active { position } => match self.current_view() {
                Ok(view) => {
                    if show_progress {
                        model.progress = format!("Question {} / {}", position + 1, view.total);
                    }
                    model.prompt = if view.question.prompt.is_empty() {
                        EMPTY_PROMPT.to_string()
                    } else {
                        view.question.prompt.clone()
                    };

                    let answered = view.is_answered();
                    model.options = view
                        .options
                        .iter()
                        .map(|&text| OptionView {
                            text: text.to_string(),
                            checked: view.answer.is_some_and(|a| a.selected_option == text),
                            disabled: answered,
                        })
                        .collect();

                    if let Some(answer) = view.answer {
                        model.feedback = Some(FeedbackView {
                            correct: answer.was_correct,
                            correct_answer: view.question.correct_answer.clone(),
                        });
                        model.explanation = self.explanation_for(view.question);
                    }

                    model.controls = Controls {
                        answer: !answered,
                        next: answered,
                        previous: position > 0
                            && self.navigation() == Navigation::Bidirectional,
                        restart: true,
                    };
                }
                Err(err) => model.mark_unavailable(position, &err),
            },
        }

        model
    }
}

/// Escape text for inclusion in HTML markup
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Navigation, Question, QuestionSet, SessionConfig, Settings};
    use crate::error::InvalidCommand;

    fn set(show_progress: bool) -> std::sync::Arc<QuestionSet> {
        let q = |id: &str, prompt: &str, correct: &str| Question {
            id: id.to_string(),
            kind: "single_choice".to_string(),
            prompt: prompt.to_string(),
            options: vec!["yes".to_string(), "no".to_string()],
            correct_answer: correct.to_string(),
            explanation: "See chapter 2.".to_string(),
        };
        QuestionSet::new(
            Settings {
                show_progress,
                shuffle_options: false,
                show_explanation: true,
                shuffle_questions: false,
            },
            vec![q("a", "Is it?", "yes"), q("b", "", "no")],
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_unavailable_question_keeps_restart() {
        let mut model = QuizSession::new(set(true), SessionConfig::default()).render();
        model.mark_unavailable(0, &QuizError::InvalidCommand(InvalidCommand::Finished));

        assert_eq!(model.status, "Question unavailable.");
        assert_eq!(
            model.controls,
            Controls {
                answer: false,
                next: false,
                previous: false,
                restart: true
            }
        );
    }

    #[test]
    fn test_render_unanswered_question() {
        let s = QuizSession::new(set(true), SessionConfig::default());
        let model = s.render();
        assert_eq!(model.progress, "Question 1 / 2");
        assert_eq!(model.prompt, "Is it?");
        assert_eq!(model.options.len(), 2);
        assert!(model.options.iter().all(|o| !o.checked && !o.disabled));
        assert_eq!(model.feedback, None);
        assert_eq!(model.explanation, None);
        assert_eq!(
            model.controls,
            Controls {
                answer: true,
                next: false,
                previous: false,
                restart: true
            }
        );
    }

    #[test]
    fn test_render_answered_question_locks_inputs() {
        let mut s = QuizSession::new(set(true), SessionConfig::default());
        s.submit_answer("no").unwrap();
        let model = s.render();

        let checked: Vec<_> = model.options.iter().filter(|o| o.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].text, "no");
        assert!(model.options.iter().all(|o| o.disabled));
        assert_eq!(
            model.feedback,
            Some(FeedbackView {
                correct: false,
                correct_answer: "yes".to_string()
            })
        );
        assert_eq!(model.explanation.as_deref(), Some("See chapter 2."));
        assert!(!model.controls.answer);
        assert!(model.controls.next);
    }

    #[test]
    fn test_render_placeholder_prompt_and_previous() {
        let mut s = QuizSession::new(set(false), SessionConfig::default());
        s.submit_answer("yes").unwrap();
        s.advance().unwrap();
        let model = s.render();
        assert_eq!(model.progress, "");
        assert_eq!(model.prompt, EMPTY_PROMPT);
        assert!(model.controls.previous);
    }

    #[test]
    fn test_linear_render_never_offers_previous() {
        let mut s = QuizSession::new(
            set(true),
            SessionConfig::default().with_navigation(Navigation::Linear),
        );
        s.submit_answer("yes").unwrap();
        s.advance().unwrap();
        assert!(!s.render().controls.previous);
    }

    #[test]
    fn test_render_finished() {
        let mut s = QuizSession::new(set(true), SessionConfig::default());
        s.submit_answer("yes").unwrap();
        s.advance().unwrap();
        s.submit_answer("yes").unwrap();
        s.advance().unwrap();

        let model = s.render();
        assert_eq!(model.progress, "Finished");
        assert_eq!(model.prompt, "End of quiz");
        assert_eq!(model.summary.as_deref(), Some("Score: 1 / 2"));
        assert!(model.options.is_empty());
        assert_eq!(
            model.controls,
            Controls {
                answer: false,
                next: false,
                previous: false,
                restart: true
            }
        );
    }

    #[test]
    fn test_render_empty_quiz() {
        let s = QuizSession::new(
            QuestionSet::new(Settings::default(), Vec::new()),
            SessionConfig::default(),
        );
        let model = s.render();
        assert_eq!(model.status, "This quiz has no questions.");
        assert_eq!(model.scoreboard.total, 0);
        assert!(!model.controls.answer && !model.controls.next);
    }

    #[test]
    fn test_load_failure_is_escaped_and_disabled() {
        let model = RenderModel::load_failure(&LoadError::Malformed("<eof>".to_string()));
        assert_eq!(model.status, "Failed to load.");
        assert_eq!(
            model.error_detail.as_deref(),
            Some("Detail: Malformed quiz data: &lt;eof&gt;")
        );
        assert_eq!(model.controls, Controls::default());
    }

    #[test]
    fn test_render_model_serializes() {
        let s = QuizSession::new(set(true), SessionConfig::default());
        let json = serde_json::to_value(s.render()).unwrap();
        assert_eq!(json["progress"], "Question 1 / 2");
        assert_eq!(json["scoreboard"]["total"], 2);
    }
}
