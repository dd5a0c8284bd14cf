//! Rock-paper-scissors: best-of-N between exactly two players.
//!
//! Simultaneous discipline with one move per round — a round resolves
//! only once both players have chosen, and pending choices are never
//! visible to the opponent. The round winner scores a point; the game
//! ends when a player has more wins than can be overtaken or the round
//! budget runs out.

use std::collections::HashMap;

use parlor_protocol::PlayerId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{ActionOutcome, EngineState, GameEngine, GameError};
use crate::roster::Roster;

/// A move token. `rock > scissors > paper > rock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// The standard beats-relation.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Paper, Move::Rock)
                | (Move::Scissors, Move::Paper)
        )
    }
}

/// A resolved round: both moves and the round winner (`None` = tie).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub moves: HashMap<PlayerId, Move>,
    pub winner: Option<PlayerId>,
}

/// Rock-paper-scissors configuration.
#[derive(Debug, Clone)]
pub struct RpsConfig {
    /// Round budget. The match also ends early once a player's wins
    /// exceed half of this.
    pub max_rounds: u32,
}

impl Default for RpsConfig {
    fn default() -> Self {
        Self { max_rounds: 5 }
    }
}

/// Snapshot data for a rock-paper-scissors room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpsState {
    /// One-based number of the round currently being played. `None`
    /// once the match is finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round: Option<usize>,
    pub max_rounds: u32,
    /// Resolved rounds, oldest first.
    pub rounds: Vec<RoundRecord>,
    /// Players who have not yet moved this round. Who has moved is
    /// public; what they chose is not.
    pub waiting_for: Vec<PlayerId>,
    /// Viewer-private: the viewer's own pending move, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_move: Option<Move>,
}

#[derive(Deserialize)]
struct ChoosePayload {
    #[serde(rename = "move")]
    choice: Move,
}

/// The rock-paper-scissors engine. Pending moves live here; scores
/// live in the roster.
pub struct RpsEngine {
    max_rounds: u32,
    moves: HashMap<PlayerId, Move>,
    rounds: Vec<RoundRecord>,
    finished: bool,
}

impl RpsEngine {
    pub fn new(config: RpsConfig) -> Self {
        Self {
            max_rounds: config.max_rounds,
            moves: HashMap::new(),
            rounds: Vec::new(),
            finished: false,
        }
    }

    /// Resolves the round once both moves are in: scores the winner,
    /// appends the round record, clears the pending-move map, and
    /// checks the completion rule.
    fn resolve_round(&mut self, roster: &mut Roster) -> Option<PlayerId> {
        // Pending moves in roster order, so the record reads stably.
        let pair: Vec<(PlayerId, Move)> = roster
            .iter()
            .filter_map(|p| self.moves.get(&p.id).map(|m| (p.id.clone(), *m)))
            .collect();
        let Ok([(first, first_move), (second, second_move)]) =
            <[(PlayerId, Move); 2]>::try_from(pair)
        else {
            return None;
        };

        let winner = if first_move == second_move {
            None
        } else if first_move.beats(second_move) {
            Some(first)
        } else {
            Some(second)
        };

        if let Some(w) = &winner {
            roster.award(w, 1);
        }
        self.rounds.push(RoundRecord {
            moves: std::mem::take(&mut self.moves),
            winner: winner.clone(),
        });

        let best = roster.iter().map(|p| p.score).max().unwrap_or(0);
        if best > self.max_rounds / 2 || self.rounds.len() as u32 >= self.max_rounds {
            self.finished = true;
        }

        winner
    }
}

impl GameEngine for RpsEngine {
    fn handle_action(
        &mut self,
        roster: &mut Roster,
        player: &PlayerId,
        action: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, GameError> {
        if action != "choose" {
            return Err(GameError::InvalidPayload(format!(
                "rock-paper-scissors does not accept action {action:?}"
            )));
        }
        if self.moves.contains_key(player) {
            return Err(GameError::AlreadyActed);
        }
        let ChoosePayload { choice } = serde_json::from_value(payload.clone())
            .map_err(|e| GameError::InvalidPayload(e.to_string()))?;

        self.moves.insert(player.clone(), choice);

        if self.moves.len() == 2 {
            let winner = self.resolve_round(roster);
            Ok(ActionOutcome::RoundResolved { winner })
        } else {
            Ok(ActionOutcome::MoveRecorded)
        }
    }

    fn remove_player(&mut self, _roster: &Roster, player: &PlayerId) {
        self.moves.remove(player);
        // Exactly-two-player variant: a departure ends the match.
        self.finished = true;
    }

    fn state(&self, roster: &Roster, viewer: Option<&PlayerId>) -> EngineState {
        EngineState::RockPaperScissors(RpsState {
            current_round: if self.finished {
                None
            } else {
                Some(self.rounds.len() + 1)
            },
            max_rounds: self.max_rounds,
            rounds: self.rounds.clone(),
            waiting_for: if self.finished {
                Vec::new()
            } else {
                roster
                    .ids()
                    .filter(|id| !self.moves.contains_key(id))
                    .cloned()
                    .collect()
            },
            my_move: viewer.and_then(|v| self.moves.get(v).copied()),
        })
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
