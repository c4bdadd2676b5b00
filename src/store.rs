//! Session store: one lock per room so unrelated games never serialize
//! against each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::common::SessionError;
use crate::protocol::{AttackReport, SessionSnapshot};
use crate::session::GameSession;

struct Entry {
    session: GameSession,
    touched: Instant,
}

impl Entry {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            touched: Instant::now(),
        }
    }
}

/// Owns every live [`GameSession`], keyed by game id. The outer mutex is held
/// only for map lookup and insertion; each entry carries its own mutex, so a
/// mutation on one session blocks only callers of that same session.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Mutex<Entry>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn entry(&self, id: &str) -> Option<Arc<Mutex<Entry>>> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    /// Snapshot of the session under `id`, or a default empty-lobby snapshot
    /// echoing the queried id when no such session exists. Never errors;
    /// polling clients hit this endpoint continuously.
    pub fn get_state(&self, id: &str) -> SessionSnapshot {
        match self.entry(id) {
            Some(entry) => {
                let mut guard = entry.lock().unwrap();
                guard.touched = Instant::now();
                SessionSnapshot::from(&guard.session)
            }
            None => SessionSnapshot::empty_lobby(id),
        }
    }

    /// Join the room `id`, creating it with `name` as player 1 if it does not
    /// exist yet. Always returns the resulting snapshot; full rooms and
    /// creator rejoins leave the session unchanged.
    pub fn join(&self, id: &str, name: &str) -> SessionSnapshot {
        let entry = {
            let mut map = self.sessions.lock().unwrap();
            map.entry(id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Entry::new(GameSession::new(id, name)))))
                .clone()
        };
        let mut guard = entry.lock().unwrap();
        // A freshly created room has `name` as player 1, so this is a no-op
        // on the create path and the second-slot logic otherwise.
        guard.session.join(name);
        guard.touched = Instant::now();
        SessionSnapshot::from(&guard.session)
    }

    /// Store `name`'s fleet in room `id`. Fails for unknown rooms and for
    /// fleets that break the placement rules.
    pub fn place_ships(
        &self,
        id: &str,
        name: &str,
        cells: &[u8],
    ) -> Result<SessionSnapshot, SessionError> {
        let entry = self.entry(id).ok_or(SessionError::NotFound)?;
        let mut guard = entry.lock().unwrap();
        guard.session.place_ships(name, cells)?;
        guard.touched = Instant::now();
        Ok(SessionSnapshot::from(&guard.session))
    }

    /// Resolve an attack in room `id` and report the outcome together with
    /// the recorded coordinate and the winner, if the shot decided the game.
    pub fn attack(
        &self,
        id: &str,
        shooter: &str,
        row: u8,
        col: u8,
    ) -> Result<AttackReport, SessionError> {
        let entry = self.entry(id).ok_or(SessionError::NotFound)?;
        let mut guard = entry.lock().unwrap();
        let outcome = guard.session.attack(shooter, row, col)?;
        guard.touched = Instant::now();
        Ok(AttackReport {
            status: outcome,
            last_move_row: row,
            last_move_col: col,
            winner: guard.session.winner().map(str::to_string),
        })
    }

    /// Drop sessions that have not been touched for longer than `ttl`.
    /// Returns the number of evicted sessions. Entries locked by an in-flight
    /// operation are skipped; they are not idle.
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let mut map = self.sessions.lock().unwrap();
        let before = map.len();
        map.retain(|_, entry| match entry.try_lock() {
            Ok(guard) => guard.touched.elapsed() <= ttl,
            Err(_) => true,
        });
        before - map.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
