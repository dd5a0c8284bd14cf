//! Trivia: everyone answers the same question, correct answers score.
//!
//! Simultaneous-action discipline — each player answers the current
//! question once, and the question advances only after every player in
//! the room has answered. The game ends when the question pack runs out.

use std::collections::HashMap;

use parlor_protocol::PlayerId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{ActionOutcome, EngineState, GameEngine, GameError};
use crate::roster::Roster;

/// Points for a correct answer.
const CORRECT_POINTS: u32 = 10;

/// One question: the prompt, the options shown to players, and the
/// correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct: String,
}

/// The part of a question that is safe to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// Trivia configuration: the question pack.
#[derive(Debug, Clone)]
pub struct TriviaConfig {
    pub questions: Vec<Question>,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

fn default_questions() -> Vec<Question> {
    fn q(text: &str, options: &[&str], correct: &str) -> Question {
        Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: correct.to_string(),
        }
    }

    vec![
        q(
            "What is the capital of France?",
            &["London", "Berlin", "Paris", "Madrid"],
            "Paris",
        ),
        q(
            "Which planet is known as the Red Planet?",
            &["Venus", "Mars", "Jupiter", "Saturn"],
            "Mars",
        ),
        q(
            "What is the largest mammal in the world?",
            &["African Elephant", "Blue Whale", "Giraffe", "Polar Bear"],
            "Blue Whale",
        ),
        q(
            "Who painted the Mona Lisa?",
            &["Van Gogh", "Da Vinci", "Picasso", "Rembrandt"],
            "Da Vinci",
        ),
    ]
}

/// Snapshot data for a trivia room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriviaState {
    /// Zero-based index of the question currently open for answers.
    pub current_question: usize,
    pub total_questions: usize,
    /// The open question; omitted once the pack is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    /// Viewer-private: has the viewer answered the open question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered: Option<bool>,
}

#[derive(Deserialize)]
struct AnswerPayload {
    answer: String,
}

/// The trivia engine. Holds the question pack and the per-question
/// answer map; scores live in the roster.
pub struct TriviaEngine {
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<PlayerId, String>,
    finished: bool,
}

impl TriviaEngine {
    pub fn new(config: TriviaConfig) -> Self {
        Self {
            finished: config.questions.is_empty(),
            questions: config.questions,
            current: 0,
            answers: HashMap::new(),
        }
    }

    /// Clears the answer map and opens the next question; finishes the
    /// game when the pack is exhausted. Runs at most once per round.
    fn advance_question(&mut self) {
        self.answers.clear();
        self.current += 1;
        if self.current >= self.questions.len() {
            self.finished = true;
            tracing::debug!("trivia question pack exhausted");
        }
    }
}

impl GameEngine for TriviaEngine {
    fn handle_action(
        &mut self,
        roster: &mut Roster,
        player: &PlayerId,
        action: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, GameError> {
        if action != "answer" {
            return Err(GameError::InvalidPayload(format!(
                "trivia does not accept action {action:?}"
            )));
        }
        if self.answers.contains_key(player) {
            return Err(GameError::AlreadyActed);
        }
        let AnswerPayload { answer } = serde_json::from_value(payload.clone())
            .map_err(|e| GameError::InvalidPayload(e.to_string()))?;

        let Some(question) = self.questions.get(self.current) else {
            return Err(GameError::InvalidPayload("no open question".into()));
        };

        let correct = answer == question.correct;
        let points = if correct { CORRECT_POINTS } else { 0 };
        if correct {
            roster.award(player, points);
        }
        self.answers.insert(player.clone(), answer);

        if self.answers.len() == roster.len() {
            self.advance_question();
        }

        Ok(ActionOutcome::Answered { correct, points })
    }

    fn remove_player(&mut self, roster: &Roster, player: &PlayerId) {
        self.answers.remove(player);
        // The departed player may have been the last holdout.
        if !self.finished && !roster.is_empty() && self.answers.len() == roster.len() {
            self.advance_question();
        }
    }

    fn state(&self, _roster: &Roster, viewer: Option<&PlayerId>) -> EngineState {
        EngineState::Trivia(TriviaState {
            current_question: self.current,
            total_questions: self.questions.len(),
            question: if self.finished {
                None
            } else {
                self.questions.get(self.current).map(QuestionView::from)
            },
            answered: if self.finished {
                None
            } else {
                viewer.map(|v| self.answers.contains_key(v))
            },
        })
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
