//! Per-room game state machine: players, fleets, turn order and victory.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::common::{AttackOutcome, SessionError};
use crate::config::{cell_index, FLEET_SIZE, GRID_CELLS, GRID_SIZE, WIN_HITS};

/// Lifecycle phase of a session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Lobby,
    Playing,
    Finished,
}

/// Which of the two player slots a name occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    P1,
    P2,
}

/// State of one game room. All mutation goes through [`join`](Self::join),
/// [`place_ships`](Self::place_ships) and [`attack`](Self::attack); the store
/// serializes those calls per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) id: String,
    pub(crate) player1: String,
    pub(crate) player2: Option<String>,
    pub(crate) turn: Option<String>,
    pub(crate) status: GameStatus,
    pub(crate) winner: Option<String>,
    pub(crate) last_move: Option<(u8, u8)>,
    pub(crate) ships_p1: BTreeSet<u8>,
    pub(crate) ships_p2: BTreeSet<u8>,
    pub(crate) ready_p1: bool,
    pub(crate) ready_p2: bool,
    pub(crate) hits_p1: u8,
    pub(crate) hits_p2: u8,
    // Defender cells already struck, so a repeated hit on the same cell
    // cannot advance the counter twice.
    struck_p1: BTreeSet<u8>,
    struck_p2: BTreeSet<u8>,
}

impl GameSession {
    /// Open a new room with `player1` as its creator. The creator moves first.
    pub fn new(id: impl Into<String>, player1: impl Into<String>) -> Self {
        let player1 = player1.into();
        Self {
            id: id.into(),
            turn: Some(player1.clone()),
            player1,
            player2: None,
            status: GameStatus::Lobby,
            winner: None,
            last_move: None,
            ships_p1: BTreeSet::new(),
            ships_p2: BTreeSet::new(),
            ready_p1: false,
            ready_p2: false,
            hits_p1: 0,
            hits_p2: 0,
            struck_p1: BTreeSet::new(),
            struck_p2: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    fn slot_of(&self, name: &str) -> Option<Slot> {
        if name == self.player1 {
            Some(Slot::P1)
        } else if self.player2.as_deref() == Some(name) {
            Some(Slot::P2)
        } else {
            None
        }
    }

    /// Take the second slot if it is free and `name` is not the creator.
    /// Anything else (room full, creator rejoin, finished game) is a silent
    /// no-op so that rejoining is idempotent for the client.
    pub fn join(&mut self, name: &str) {
        if self.status == GameStatus::Finished {
            return;
        }
        if self.player2.is_none() && name != self.player1 {
            self.player2 = Some(name.to_string());
            // Both players present; the creator keeps the first move.
            self.turn = Some(self.player1.clone());
        }
    }

    /// Record a player's fleet and mark them ready. Once both players are
    /// ready the session moves to `Playing` with the creator to move.
    ///
    /// Placement from a name that holds neither slot is silently ignored,
    /// mirroring the join semantics. Placement outside the lobby phase is
    /// rejected, so a fleet cannot be rearranged mid-game.
    pub fn place_ships(&mut self, name: &str, cells: &[u8]) -> Result<(), SessionError> {
        match self.status {
            GameStatus::Lobby => {}
            GameStatus::Playing => return Err(SessionError::PlacementClosed),
            GameStatus::Finished => return Err(SessionError::GameOver),
        }
        let fleet: BTreeSet<u8> = cells.iter().copied().collect();
        if fleet.len() != FLEET_SIZE || cells.len() != FLEET_SIZE {
            return Err(SessionError::InvalidFleet);
        }
        if fleet.iter().any(|&cell| cell >= GRID_CELLS) {
            return Err(SessionError::InvalidFleet);
        }
        match self.slot_of(name) {
            Some(Slot::P1) => {
                self.ships_p1 = fleet;
                self.ready_p1 = true;
            }
            Some(Slot::P2) => {
                self.ships_p2 = fleet;
                self.ready_p2 = true;
            }
            None => return Ok(()),
        }
        if self.ready_p1 && self.ready_p2 {
            self.status = GameStatus::Playing;
            self.turn = Some(self.player1.clone());
        }
        Ok(())
    }

    /// Resolve an attack by `shooter` at (row, col).
    ///
    /// The shooter must hold one of the two slots. The turn flips to the
    /// other slot's occupant whether the shot hits or not, and the coordinate
    /// is recorded as the last move. A hit on a cell that was already struck
    /// counts as a miss. The third hit finishes the game.
    pub fn attack(
        &mut self,
        shooter: &str,
        row: u8,
        col: u8,
    ) -> Result<AttackOutcome, SessionError> {
        if self.status == GameStatus::Finished {
            return Err(SessionError::GameOver);
        }
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(SessionError::OutOfBounds);
        }
        let slot = self.slot_of(shooter).ok_or(SessionError::UnknownPlayer)?;
        let target = cell_index(row, col);

        let outcome = match slot {
            Slot::P1 => {
                if self.ships_p2.contains(&target) && self.struck_p2.insert(target) {
                    AttackOutcome::Hit
                } else {
                    AttackOutcome::Miss
                }
            }
            Slot::P2 => {
                if self.ships_p1.contains(&target) && self.struck_p1.insert(target) {
                    AttackOutcome::Hit
                } else {
                    AttackOutcome::Miss
                }
            }
        };

        self.turn = match slot {
            Slot::P1 => self.player2.clone(),
            Slot::P2 => Some(self.player1.clone()),
        };
        self.last_move = Some((row, col));

        if outcome == AttackOutcome::Hit {
            let hits = match slot {
                Slot::P1 => &mut self.hits_p1,
                Slot::P2 => &mut self.hits_p2,
            };
            *hits += 1;
            if *hits >= WIN_HITS {
                self.winner = Some(shooter.to_string());
                self.status = GameStatus::Finished;
            }
        }
        Ok(outcome)
    }
}
