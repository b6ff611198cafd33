// Per-game planner sessions.
//
// A session holds the tuning state the planner carries between turns of one
// game, keyed by (game id, snake id) since one process can play several
// concurrent games. Sessions are created when the game server announces
// /start and destroyed on /end; nothing accumulates for the life of the
// process.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Mutable planner state for one snake in one game.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    /// First iterative-deepening depth to try on the next turn.
    pub starting_depth: usize,
}

/// Registry of live sessions, shared across request handlers.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<(String, String), PlannerSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Creates (or resets) the session for a game/snake pair.
    pub fn create(&self, game_id: &str, snake_id: &str, initial_depth: usize) {
        self.sessions.lock().insert(
            (game_id.to_string(), snake_id.to_string()),
            PlannerSession {
                starting_depth: initial_depth,
            },
        );
    }

    /// Removes the session; returns false if none existed.
    pub fn destroy(&self, game_id: &str, snake_id: &str) -> bool {
        self.sessions
            .lock()
            .remove(&(game_id.to_string(), snake_id.to_string()))
            .is_some()
    }

    /// The depth the planner should start from this turn. Falls back to
    /// `default` when no session exists (a /move without /start).
    pub fn starting_depth(&self, game_id: &str, snake_id: &str, default: usize) -> usize {
        self.sessions
            .lock()
            .get(&(game_id.to_string(), snake_id.to_string()))
            .map(|s| s.starting_depth)
            .unwrap_or(default)
    }

    /// Records the depth the last completed search reached so the next turn
    /// can skip the shallow warmup iterations. No-op without a session.
    pub fn record_depth(&self, game_id: &str, snake_id: &str, completed: usize, max_depth: usize) {
        if completed == 0 {
            return;
        }
        if let Some(session) = self
            .sessions
            .lock()
            .get_mut(&(game_id.to_string(), snake_id.to_string()))
        {
            session.starting_depth = completed.min(max_depth);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy_lifecycle() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        store.create("g1", "s1", 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.starting_depth("g1", "s1", 9), 2);

        assert!(store.destroy("g1", "s1"));
        assert!(store.is_empty());
        assert!(!store.destroy("g1", "s1"));
    }

    #[test]
    fn starting_depth_falls_back_without_session() {
        let store = SessionStore::new();
        assert_eq!(store.starting_depth("none", "none", 3), 3);
    }

    #[test]
    fn record_depth_updates_and_clamps() {
        let store = SessionStore::new();
        store.create("g1", "s1", 2);

        store.record_depth("g1", "s1", 5, 8);
        assert_eq!(store.starting_depth("g1", "s1", 2), 5);

        store.record_depth("g1", "s1", 12, 8);
        assert_eq!(store.starting_depth("g1", "s1", 2), 8);

        // A run that completed nothing leaves the tuning untouched
        store.record_depth("g1", "s1", 0, 8);
        assert_eq!(store.starting_depth("g1", "s1", 2), 8);
    }

    #[test]
    fn sessions_are_keyed_per_game_and_snake() {
        let store = SessionStore::new();
        store.create("g1", "s1", 2);
        store.create("g2", "s1", 4);
        assert_eq!(store.starting_depth("g1", "s1", 0), 2);
        assert_eq!(store.starting_depth("g2", "s1", 0), 4);
    }
}
