//! The room roster: one authoritative list of players and scores.
//!
//! The roster is owned by the room and borrowed by the engine on every
//! call — never duplicated — so player lists and scores cannot diverge
//! between the two.

use parlor_protocol::PlayerId;
use serde::{Deserialize, Serialize};

/// One player's entry in a room.
///
/// This is also the wire shape of the `players` array in broadcast
/// snapshots, so the field names are part of the gateway contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// The player's unique id.
    pub id: PlayerId,
    /// Display name, chosen at join time.
    pub name: String,
    /// Whether the player has signalled readiness.
    pub ready: bool,
    /// Accumulated score for this session.
    pub score: u32,
}

/// An insertion-ordered collection of [`PlayerEntry`]s.
///
/// Order matters twice: round-robin variants take turns in roster
/// order, and winner ties break toward the first-encountered entry.
/// Rooms hold a handful of players, so linear lookup is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<PlayerEntry>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players currently in the roster.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no players remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the player is in the roster.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.entries.iter().any(|p| &p.id == id)
    }

    /// Appends a new player with a zero score, not ready.
    ///
    /// Capacity is the registry's concern; the roster just stores.
    pub fn add(&mut self, id: PlayerId, name: impl Into<String>) {
        self.entries.push(PlayerEntry {
            id,
            name: name.into(),
            ready: false,
            score: 0,
        });
    }

    /// Removes a player, returning their entry if present.
    pub fn remove(&mut self, id: &PlayerId) -> Option<PlayerEntry> {
        let pos = self.entries.iter().position(|p| &p.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Looks up a player's entry.
    pub fn get(&self, id: &PlayerId) -> Option<&PlayerEntry> {
        self.entries.iter().find(|p| &p.id == id)
    }

    /// Looks up a player's entry mutably.
    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut PlayerEntry> {
        self.entries.iter_mut().find(|p| &p.id == id)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerEntry> {
        self.entries.iter()
    }

    /// Iterates player ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.entries.iter().map(|p| &p.id)
    }

    /// Returns `true` if every player has flagged ready.
    ///
    /// An empty roster is trivially all-ready; the minimum-headcount
    /// half of the start condition rules that case out.
    pub fn all_ready(&self) -> bool {
        self.entries.iter().all(|p| p.ready)
    }

    /// Adds points to a player's score. Unknown ids are ignored.
    pub fn award(&mut self, id: &PlayerId, points: u32) {
        if let Some(entry) = self.get_mut(id) {
            entry.score += points;
        }
    }

    /// The player with the strictly maximum score.
    ///
    /// Ties break toward the first-encountered entry in roster order —
    /// the documented tie-break for winner selection.
    pub fn leader(&self) -> Option<&PlayerEntry> {
        let mut best: Option<&PlayerEntry> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.score <= b.score => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Snapshot of all entries, in order.
    pub fn entries(&self) -> &[PlayerEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    fn roster_of(ids: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for id in ids {
            roster.add(pid(id), format!("name-{id}"));
        }
        roster
    }

    #[test]
    fn test_add_and_remove() {
        let mut roster = roster_of(&["a", "b"]);
        assert_eq!(roster.len(), 2);
        assert!(roster.contains(&pid("a")));

        let removed = roster.remove(&pid("a")).unwrap();
        assert_eq!(removed.id, pid("a"));
        assert_eq!(roster.len(), 1);
        assert!(!roster.contains(&pid("a")));
    }

    #[test]
    fn test_remove_unknown_returns_none() {
        let mut roster = roster_of(&["a"]);
        assert!(roster.remove(&pid("zzz")).is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_new_players_start_not_ready_with_zero_score() {
        let roster = roster_of(&["a"]);
        let entry = roster.get(&pid("a")).unwrap();
        assert!(!entry.ready);
        assert_eq!(entry.score, 0);
    }

    #[test]
    fn test_all_ready() {
        let mut roster = roster_of(&["a", "b"]);
        assert!(!roster.all_ready());

        roster.get_mut(&pid("a")).unwrap().ready = true;
        assert!(!roster.all_ready());

        roster.get_mut(&pid("b")).unwrap().ready = true;
        assert!(roster.all_ready());
    }

    #[test]
    fn test_award_accumulates() {
        let mut roster = roster_of(&["a"]);
        roster.award(&pid("a"), 10);
        roster.award(&pid("a"), 5);
        assert_eq!(roster.get(&pid("a")).unwrap().score, 15);
    }

    #[test]
    fn test_award_unknown_id_is_ignored() {
        let mut roster = roster_of(&["a"]);
        roster.award(&pid("ghost"), 10);
        assert_eq!(roster.get(&pid("a")).unwrap().score, 0);
    }

    #[test]
    fn test_leader_strict_maximum() {
        let mut roster = roster_of(&["a", "b", "c"]);
        roster.award(&pid("b"), 20);
        roster.award(&pid("a"), 10);
        assert_eq!(roster.leader().unwrap().id, pid("b"));
    }

    #[test]
    fn test_leader_tie_breaks_to_first_in_roster_order() {
        let mut roster = roster_of(&["a", "b"]);
        roster.award(&pid("a"), 10);
        roster.award(&pid("b"), 10);
        assert_eq!(roster.leader().unwrap().id, pid("a"));
    }

    #[test]
    fn test_leader_of_empty_roster_is_none() {
        assert!(Roster::new().leader().is_none());
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let roster = roster_of(&["x", "y", "z"]);
        let ids: Vec<&str> = roster.ids().map(|p| p.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }
}
