//! The `GameEngine` trait — the contract every variant implements.
//!
//! The registry drives engines exclusively through this trait: actions
//! in, outcomes and snapshots out. An engine exists only while its room
//! is InProgress or Finished; it never outlives the room and never owns
//! the roster.

use parlor_protocol::PlayerId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::roster::Roster;
use crate::rps::RpsState;
use crate::trivia::TriviaState;
use crate::word_chain::WordChainState;

/// Why an action was rejected.
///
/// A rejected action performs **no mutation** — no score change, no
/// turn advance, no recorded move. All of these are recoverable and
/// scoped to the one command that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A turn-based variant received an action from someone other than
    /// the current actor.
    #[error("not your turn")]
    NotYourTurn,

    /// A simultaneous-action variant received a second action from the
    /// same player in one round.
    #[error("already acted this round")]
    AlreadyActed,

    /// The action verb or payload was malformed or semantically invalid
    /// for the variant (unknown verb, missing field, bad move token,
    /// word too short, and so on).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// What a successful action did, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Trivia: the answer was recorded (and scored if correct).
    Answered { correct: bool, points: u32 },

    /// Word chain: the word was accepted; the turn has advanced.
    WordAccepted { points: u32, next_letter: char },

    /// Rock-paper-scissors: the move was recorded; waiting on the
    /// opponent before the round resolves.
    MoveRecorded,

    /// Rock-paper-scissors: both moves were in, the round resolved.
    /// `winner` is `None` on a tie.
    RoundResolved { winner: Option<PlayerId> },
}

/// Variant-specific snapshot data, embedded in room broadcasts.
///
/// A closed sum over the supported variants, internally tagged so the
/// JSON carries `"variant": "trivia"` etc. Viewer-private fields inside
/// each variant's state are `Option`s that stay `None` (and off the
/// wire) for broadcasts, so pending simultaneous moves never leak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum EngineState {
    Trivia(TriviaState),
    WordChain(WordChainState),
    RockPaperScissors(RpsState),
}

/// The capability set shared by every game variant.
///
/// All methods take the roster by reference: the room owns the single
/// authoritative roster, and the engine reads and mutates it in place.
/// The registry guarantees `handle_action` is only called while the
/// room is InProgress and only for players present in the roster.
pub trait GameEngine: Send {
    /// Processes one action from a player.
    ///
    /// Validation order: actor entitlement first (turn order or
    /// one-action-per-round), then payload shape. Any `Err` leaves the
    /// engine and roster untouched.
    fn handle_action(
        &mut self,
        roster: &mut Roster,
        player: &PlayerId,
        action: &str,
        payload: &Value,
    ) -> Result<ActionOutcome, GameError>;

    /// Called after a player has been removed from the roster.
    ///
    /// The engine drops the player from its transient state (pending
    /// answers/moves, turn order). Mid-game removal ends that player's
    /// participation but only ends the game where the variant's rules
    /// say so (two-player variants finish immediately).
    fn remove_player(&mut self, roster: &Roster, player: &PlayerId);

    /// Pure read of the variant's current state.
    ///
    /// With a `viewer`, includes that player's private fields (has the
    /// viewer answered/moved, is it their turn) without revealing other
    /// players' pending choices.
    fn state(&self, roster: &Roster, viewer: Option<&PlayerId>) -> EngineState;

    /// Returns `true` once the variant's terminal condition is reached.
    ///
    /// Checked by the registry after every action and removal; the
    /// registry then finishes the room and picks the winner from the
    /// roster (strict score maximum, first-in-order tie-break).
    fn is_finished(&self) -> bool;
}
