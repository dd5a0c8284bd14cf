//! Word chain: each word must start with the last letter of the
//! previous one.
//!
//! Strict round-robin discipline — exactly one player may act at a
//! time, in roster order with wrap-around. An accepted word scores its
//! length. The game ends the moment no legal word remains for the
//! required letter.

use parlor_protocol::PlayerId;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{ActionOutcome, EngineState, GameEngine, GameError};
use crate::roster::Roster;

/// Built-in dictionary used when no word list is configured.
const DEFAULT_WORDS: &[&str] = &[
    "apple", "banana", "cat", "dog", "elephant", "fish", "giraffe", "house", "ice", "jacket",
    "king", "lion", "monkey", "nest", "orange", "penguin", "queen", "rabbit", "snake", "tiger",
    "umbrella", "violet", "whale", "xylophone", "yellow", "zebra",
];

/// Word chain configuration.
#[derive(Debug, Clone)]
pub struct WordChainConfig {
    /// Words shorter than this are rejected.
    pub min_word_length: usize,
    /// The reference word list.
    pub words: Vec<String>,
    /// Fixed first letter. `None` picks the first letter of a random
    /// legal-length dictionary word.
    pub starting_letter: Option<char>,
}

impl Default for WordChainConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            starting_letter: None,
        }
    }
}

/// Snapshot data for a word chain room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordChainState {
    /// Completed turns so far.
    pub round: u32,
    /// Accepted words, oldest first.
    pub words_used: Vec<String>,
    /// The letter the next word must start with.
    pub current_letter: char,
    /// Whose turn it is. `None` only if every tracked player has left.
    pub current_turn: Option<PlayerId>,
    /// Viewer-private: is it the viewer's turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_my_turn: Option<bool>,
}

#[derive(Deserialize)]
struct MovePayload {
    word: String,
}

/// The word chain engine. Turn order is frozen from the roster at
/// start time; leavers are spliced out of it.
pub struct WordChainEngine {
    words: Vec<String>,
    min_len: usize,
    used: Vec<String>,
    current_letter: char,
    turn_order: Vec<PlayerId>,
    turn: usize,
    round: u32,
    finished: bool,
}

impl WordChainEngine {
    pub fn new(config: WordChainConfig, roster: &Roster) -> Self {
        let current_letter = config.starting_letter.unwrap_or_else(|| {
            let candidates: Vec<char> = config
                .words
                .iter()
                .filter(|w| w.chars().count() >= config.min_word_length)
                .filter_map(|w| w.chars().next())
                .collect();
            candidates
                .as_slice()
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or('a')
        });

        let mut engine = Self {
            min_len: config.min_word_length,
            words: config.words,
            used: Vec::new(),
            current_letter,
            turn_order: roster.ids().cloned().collect(),
            turn: 0,
            round: 0,
            finished: false,
        };
        // An unplayable opening letter ends the game before any turn.
        if !engine.any_legal_word() {
            engine.finished = true;
        }
        engine
    }

    /// Is there an unused dictionary word of legal length starting with
    /// the current letter?
    fn any_legal_word(&self) -> bool {
        self.words.iter().any(|w| {
            w.chars().count() >= self.min_len
                && w.starts_with(self.current_letter)
                && !self.used.contains(w)
        })
    }

    fn current_actor(&self) -> Option<&PlayerId> {
        self.turn_order.get(self.turn)
    }
}

impl GameEngine for WordChainEngine {
    fn handle_action(
        &mut self,
        roster: &mut Roster,
        player: &PlayerId,
        action: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, GameError> {
        if action != "move" {
            return Err(GameError::InvalidPayload(format!(
                "word chain does not accept action {action:?}"
            )));
        }
        if self.current_actor() != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        let MovePayload { word } = serde_json::from_value(payload.clone())
            .map_err(|e| GameError::InvalidPayload(e.to_string()))?;
        let word = word.to_lowercase();

        // The five acceptance predicates, checked before any mutation.
        if word.chars().count() < self.min_len {
            return Err(GameError::InvalidPayload(format!(
                "word must be at least {} characters",
                self.min_len
            )));
        }
        if self.used.contains(&word) {
            return Err(GameError::InvalidPayload("word already used".into()));
        }
        if !word.starts_with(self.current_letter) {
            return Err(GameError::InvalidPayload(format!(
                "word must start with '{}'",
                self.current_letter
            )));
        }
        if !self.words.contains(&word) {
            return Err(GameError::InvalidPayload("word not in dictionary".into()));
        }

        let points = word.chars().count() as u32;
        roster.award(player, points);
        if let Some(last) = word.chars().last() {
            self.current_letter = last;
        }
        self.used.push(word);
        self.turn = (self.turn + 1) % self.turn_order.len();
        self.round += 1;

        if !self.any_legal_word() {
            self.finished = true;
            tracing::debug!(letter = %self.current_letter, "no legal word remains");
        }

        Ok(ActionOutcome::WordAccepted {
            points,
            next_letter: self.current_letter,
        })
    }

    fn remove_player(&mut self, _roster: &Roster, player: &PlayerId) {
        let Some(pos) = self.turn_order.iter().position(|p| p == player) else {
            return;
        };
        self.turn_order.remove(pos);
        if self.turn_order.is_empty() {
            return;
        }
        if pos < self.turn {
            self.turn -= 1;
        } else if self.turn >= self.turn_order.len() {
            self.turn = 0;
        }
    }

    fn state(&self, _roster: &Roster, viewer: Option<&PlayerId>) -> EngineState {
        EngineState::WordChain(WordChainState {
            round: self.round,
            words_used: self.used.clone(),
            current_letter: self.current_letter,
            current_turn: self.current_actor().cloned(),
            is_my_turn: if self.finished {
                None
            } else {
                viewer.map(|v| self.current_actor() == Some(v))
            },
        })
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
