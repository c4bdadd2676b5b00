//! Common types: attack outcomes and session errors.

use serde::{Deserialize, Serialize};

use crate::config::FLEET_SIZE;

/// Outcome of resolving a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttackOutcome {
    /// Attack struck an intact ship cell of the defender.
    Hit,
    /// Attack landed on open water or on a cell that was already struck.
    Miss,
}

/// Errors returned by session and store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No session exists under the requested id.
    NotFound,
    /// The session is finished; no further mutation is accepted.
    GameOver,
    /// Ship placement is only accepted while the session is in the lobby.
    PlacementClosed,
    /// A fleet must be exactly `FLEET_SIZE` distinct cells inside the grid.
    InvalidFleet,
    /// Shooter is not a registered player of this session.
    UnknownPlayer,
    /// Attack coordinate lies outside the grid.
    OutOfBounds,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::NotFound => write!(f, "Game not found"),
            SessionError::GameOver => write!(f, "Game is already finished"),
            SessionError::PlacementClosed => write!(f, "Ship placement is closed"),
            SessionError::InvalidFleet => {
                write!(f, "Fleet must be {} distinct cells on the grid", FLEET_SIZE)
            }
            SessionError::UnknownPlayer => write!(f, "Player is not part of this game"),
            SessionError::OutOfBounds => write!(f, "Coordinate is outside the grid"),
        }
    }
}

impl std::error::Error for SessionError {}
