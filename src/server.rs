//! HTTP transport glue: an axum router over the session store.
//!
//! The core never sees HTTP; every handler is a thin wrapper that decodes a
//! request, calls one store operation and encodes the result.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;

use crate::common::SessionError;
use crate::protocol::{AttackRequest, JoinRequest, PlaceRequest, SessionSnapshot, StateQuery};
use crate::store::SessionStore;

/// Sweep period ceiling for the idle-session sweeper.
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Evict sessions idle longer than this; `None` keeps them forever.
    pub session_ttl: Option<Duration>,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            session_ttl: None,
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        // 0.0.0.0 keeps the server reachable from phones on the same LAN.
        Self::new("0.0.0.0", 5000)
    }
}

/// Build the four-endpoint router over a shared store.
pub fn create_router(store: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/game/state", get(get_state))
        .route("/game/join", post(join_game))
        .route("/game/place", post(place_ships))
        .route("/game/attack", post(handle_attack))
        .with_state(store)
}

async fn get_state(
    State(store): State<Arc<SessionStore>>,
    Query(query): Query<StateQuery>,
) -> Json<SessionSnapshot> {
    Json(store.get_state(&query.game_id))
}

async fn join_game(
    State(store): State<Arc<SessionStore>>,
    Json(req): Json<JoinRequest>,
) -> Json<SessionSnapshot> {
    log::info!("join: game={} player={}", req.game_id, req.player_name);
    Json(store.join(&req.game_id, &req.player_name))
}

async fn place_ships(
    State(store): State<Arc<SessionStore>>,
    Json(req): Json<PlaceRequest>,
) -> Response {
    match store.place_ships(&req.game_id, &req.player_name, &req.ships) {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => {
            log::debug!("place rejected on game {}: {}", req.game_id, err);
            error_response(err)
        }
    }
}

/// Attack errors keep the legacy shape: the client only looks at the `status`
/// field, so every failure is a 200 with `{"status": "ERROR"}`.
async fn handle_attack(
    State(store): State<Arc<SessionStore>>,
    Json(req): Json<AttackRequest>,
) -> Response {
    match store.attack(&req.game_id, &req.player_name, req.row, req.col) {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            log::debug!("attack rejected on game {}: {}", req.game_id, err);
            Json(json!({ "status": "ERROR" })).into_response()
        }
    }
}

fn error_response(err: SessionError) -> Response {
    let status = match err {
        SessionError::NotFound => StatusCode::NOT_FOUND,
        SessionError::InvalidFleet | SessionError::UnknownPlayer | SessionError::OutOfBounds => {
            StatusCode::BAD_REQUEST
        }
        SessionError::PlacementClosed | SessionError::GameOver => StatusCode::CONFLICT,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// The running server: binds, serves until Ctrl-C/SIGTERM, and optionally
/// sweeps idle sessions in the background.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub async fn run(self, store: Arc<SessionStore>) -> anyhow::Result<()> {
        let address = self.config.socket_addr();

        if let Some(ttl) = self.config.session_ttl {
            spawn_idle_sweeper(store.clone(), ttl);
        }

        let router = create_router(store);
        let listener = TcpListener::bind(&address).await?;
        log::info!("listening on {}", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("server shutdown complete");
        Ok(())
    }
}

fn spawn_idle_sweeper(store: Arc<SessionStore>, ttl: Duration) {
    let period = ttl.min(MAX_SWEEP_PERIOD);
    log::info!("idle sessions evicted after {:?}", ttl);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        // The first tick fires immediately; skip it.
        tick.tick().await;
        loop {
            tick.tick().await;
            let evicted = store.purge_idle(ttl);
            if evicted > 0 {
                log::info!("evicted {} idle session(s)", evicted);
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            log::info!("received Ctrl+C, shutting down");
        }
        () = terminate => {
            log::info!("received SIGTERM, shutting down");
        }
    }
}
