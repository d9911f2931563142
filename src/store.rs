//! Tournament storage: a trait for the web layer plus the in-memory implementation.

use crate::models::{Tournament, TournamentId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// CRUD access to tournaments by id. Implementations are shared behind a lock by the web layer.
pub trait TournamentStore: Send + Sync {
    fn insert(&mut self, tournament: Tournament) -> TournamentId;

    /// Mutable access; counts as activity on the tournament.
    fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament>;

    fn remove(&mut self, id: TournamentId) -> Option<Tournament>;

    /// Drop tournaments idle for at least `max_idle`; returns how many were removed.
    fn purge_inactive(&mut self, max_idle: Duration) -> usize;
}

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// Tournaments kept in process memory. Last write wins; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<TournamentId, TournamentEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStore for MemoryStore {
    fn insert(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id;
        self.entries.insert(
            id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        id
    }

    fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.entries.get_mut(&id).map(|entry| {
            entry.last_activity = Instant::now();
            &mut entry.tournament
        })
    }

    fn remove(&mut self, id: TournamentId) -> Option<Tournament> {
        self.entries.remove(&id).map(|entry| entry.tournament)
    }

    fn purge_inactive(&mut self, max_idle: Duration) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.last_activity.elapsed() < max_idle);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut store = MemoryStore::new();
        let id = store.insert(Tournament::new());
        assert!(store.get_mut(id).is_some());
        assert_eq!(store.remove(id).map(|t| t.id), Some(id));
        assert!(store.get_mut(id).is_none());
    }

    #[test]
    fn purge_keeps_recent_tournaments() {
        let mut store = MemoryStore::new();
        let id = store.insert(Tournament::new());
        assert_eq!(store.purge_inactive(Duration::from_secs(3600)), 0);
        assert!(store.get_mut(id).is_some());
        assert_eq!(store.purge_inactive(Duration::ZERO), 1);
        assert!(store.get_mut(id).is_none());
    }
}
