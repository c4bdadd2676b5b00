//! JSON wire contract consumed by the mobile client.
//!
//! Field names are camelCase and status values uppercase, matching what the
//! client's HTTP layer expects; changing a key here breaks deployed clients.

use serde::{Deserialize, Serialize};

use crate::common::AttackOutcome;
use crate::session::{GameSession, GameStatus};

/// Full view of one session as returned by the state, join and place
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game_id: String,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub turn: Option<String>,
    pub status: GameStatus,
    pub winner: Option<String>,
    pub last_move_row: Option<u8>,
    pub last_move_col: Option<u8>,
    pub ships_p1: Vec<u8>,
    pub ships_p2: Vec<u8>,
    pub ready_p1: bool,
    pub ready_p2: bool,
    pub hits_p1: u8,
    pub hits_p2: u8,
}

impl SessionSnapshot {
    /// Default snapshot served for ids with no session: an empty lobby that
    /// echoes the queried id.
    pub fn empty_lobby(game_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            player1: None,
            player2: None,
            turn: None,
            status: GameStatus::Lobby,
            winner: None,
            last_move_row: None,
            last_move_col: None,
            ships_p1: Vec::new(),
            ships_p2: Vec::new(),
            ready_p1: false,
            ready_p2: false,
            hits_p1: 0,
            hits_p2: 0,
        }
    }
}

impl From<&GameSession> for SessionSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            game_id: session.id.clone(),
            player1: Some(session.player1.clone()),
            player2: session.player2.clone(),
            turn: session.turn.clone(),
            status: session.status,
            winner: session.winner.clone(),
            last_move_row: session.last_move.map(|(row, _)| row),
            last_move_col: session.last_move.map(|(_, col)| col),
            ships_p1: session.ships_p1.iter().copied().collect(),
            ships_p2: session.ships_p2.iter().copied().collect(),
            ready_p1: session.ready_p1,
            ready_p2: session.ready_p2,
            hits_p1: session.hits_p1,
            hits_p2: session.hits_p2,
        }
    }
}

/// Reply to an attack. Deliberately not the full session; the client polls
/// the state endpoint for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackReport {
    pub status: AttackOutcome,
    pub last_move_row: u8,
    pub last_move_col: u8,
    pub winner: Option<String>,
}

/// Query string of `GET /game/state`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    pub game_id: String,
}

/// Body of `POST /game/join`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub game_id: String,
    pub player_name: String,
}

/// Body of `POST /game/place`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRequest {
    pub game_id: String,
    pub player_name: String,
    pub ships: Vec<u8>,
}

/// Body of `POST /game/attack`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRequest {
    pub game_id: String,
    pub player_name: String,
    pub row: u8,
    pub col: u8,
}
