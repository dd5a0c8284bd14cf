//! Game variants for Parlor: the engine contract and its implementations.
//!
//! Every supported game type implements the same capability set —
//! handle an action, report per-viewer state, react to a player
//! leaving, and say when it's over. The registry drives engines through
//! [`GameEngine`] without knowing which variant is behind it.
//!
//! # Key types
//!
//! - [`GameEngine`] — the trait each variant implements
//! - [`GameVariant`] — the closed set of variants, plus the factory
//! - [`Roster`] — the single authoritative player list, owned by the
//!   room and borrowed by the engine on every call
//! - [`EngineState`] — per-variant snapshot data for broadcasts
//! - [`GameError`] — action rejections (no mutation on rejection)

mod engine;
mod roster;
mod rps;
mod trivia;
mod variant;
mod word_chain;

pub use engine::{ActionOutcome, EngineState, GameEngine, GameError};
pub use roster::{PlayerEntry, Roster};
pub use rps::{Move, RoundRecord, RpsConfig, RpsEngine, RpsState};
pub use trivia::{Question, QuestionView, TriviaConfig, TriviaEngine, TriviaState};
pub use variant::{EngineSettings, GameVariant, build_engine};
pub use word_chain::{WordChainConfig, WordChainEngine, WordChainState};
