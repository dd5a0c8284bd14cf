//! The closed set of game variants and the engine factory.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::GameEngine;
use crate::roster::Roster;
use crate::rps::{RpsConfig, RpsEngine};
use crate::trivia::{TriviaConfig, TriviaEngine};
use crate::word_chain::{WordChainConfig, WordChainEngine};

/// A supported game type.
///
/// The wire token (in `create` commands and snapshots) is the
/// snake_case name: `"trivia"`, `"word_chain"`, `"rock_paper_scissors"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    Trivia,
    WordChain,
    RockPaperScissors,
}

impl GameVariant {
    /// Parses a wire token, case-insensitively. `None` for unknown
    /// tokens — the registry maps that to `UnknownVariant`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "trivia" => Some(Self::Trivia),
            "word_chain" => Some(Self::WordChain),
            "rock_paper_scissors" => Some(Self::RockPaperScissors),
            _ => None,
        }
    }

    /// The wire token for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivia => "trivia",
            Self::WordChain => "word_chain",
            Self::RockPaperScissors => "rock_paper_scissors",
        }
    }

    /// Minimum headcount before the start condition can pass.
    pub fn min_players(&self) -> usize {
        match self {
            Self::Trivia => 2,
            Self::WordChain => 2,
            Self::RockPaperScissors => 2,
        }
    }

    /// Default room capacity. Rock-paper-scissors is exactly two
    /// players; the others cap at four.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Trivia => 4,
            Self::WordChain => 4,
            Self::RockPaperScissors => 2,
        }
    }

    /// The start condition: variant minimum headcount plus the
    /// universal all-ready check.
    pub fn can_start(&self, roster: &Roster) -> bool {
        roster.len() >= self.min_players() && roster.all_ready()
    }
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-variant configuration, held by the registry and handed to the
/// factory at start time. Defaults match the built-in content packs.
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub trivia: TriviaConfig,
    pub word_chain: WordChainConfig,
    pub rps: RpsConfig,
}

/// Builds the engine for a room that is starting.
///
/// Called exactly once per room, at the Waiting→Starting transition,
/// with the roster frozen in its start-time order (round-robin variants
/// take turns in this order).
pub fn build_engine(
    variant: GameVariant,
    roster: &Roster,
    settings: &EngineSettings,
) -> Box<dyn GameEngine> {
    match variant {
        GameVariant::Trivia => Box::new(TriviaEngine::new(settings.trivia.clone())),
        GameVariant::WordChain => {
            Box::new(WordChainEngine::new(settings.word_chain.clone(), roster))
        }
        GameVariant::RockPaperScissors => Box::new(RpsEngine::new(settings.rps.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_protocol::PlayerId;

    fn ready_roster(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            let id = PlayerId::new(format!("p{i}"));
            roster.add(id.clone(), format!("P{i}"));
            roster.get_mut(&id).unwrap().ready = true;
        }
        roster
    }

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!(GameVariant::parse("trivia"), Some(GameVariant::Trivia));
        assert_eq!(GameVariant::parse("word_chain"), Some(GameVariant::WordChain));
        assert_eq!(
            GameVariant::parse("rock_paper_scissors"),
            Some(GameVariant::RockPaperScissors)
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(GameVariant::parse("TRIVIA"), Some(GameVariant::Trivia));
    }

    #[test]
    fn test_parse_unknown_token_is_none() {
        assert_eq!(GameVariant::parse("chess"), None);
        assert_eq!(GameVariant::parse(""), None);
    }

    #[test]
    fn test_wire_token_round_trip() {
        for v in [
            GameVariant::Trivia,
            GameVariant::WordChain,
            GameVariant::RockPaperScissors,
        ] {
            assert_eq!(GameVariant::parse(v.as_str()), Some(v));
        }
    }

    #[test]
    fn test_serde_token_matches_as_str() {
        let json = serde_json::to_string(&GameVariant::RockPaperScissors).unwrap();
        assert_eq!(json, "\"rock_paper_scissors\"");
    }

    #[test]
    fn test_can_start_needs_minimum_headcount() {
        let roster = ready_roster(1);
        assert!(!GameVariant::Trivia.can_start(&roster));

        let roster = ready_roster(2);
        assert!(GameVariant::Trivia.can_start(&roster));
    }

    #[test]
    fn test_can_start_needs_everyone_ready() {
        let mut roster = ready_roster(2);
        roster.get_mut(&PlayerId::new("p0")).unwrap().ready = false;
        assert!(!GameVariant::WordChain.can_start(&roster));
    }

    #[test]
    fn test_rps_capacity_is_exactly_two() {
        assert_eq!(GameVariant::RockPaperScissors.capacity(), 2);
        assert_eq!(GameVariant::RockPaperScissors.min_players(), 2);
    }

    #[test]
    fn test_factory_builds_each_variant() {
        let roster = ready_roster(2);
        let settings = EngineSettings::default();
        for v in [
            GameVariant::Trivia,
            GameVariant::WordChain,
            GameVariant::RockPaperScissors,
        ] {
            let engine = build_engine(v, &roster, &settings);
            assert!(!engine.is_finished());
        }
    }
}
