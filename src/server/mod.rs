pub mod error;
pub mod routes;
pub mod ws;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{EngineConfig, GridSize};
use crate::error::SnakeError;
use crate::game::SnakeEngine;
use crate::session::SessionRegistry;

/// Application state shared across all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Game behind the `/api/game/*` routes.
    pub game: Arc<Mutex<SnakeEngine>>,
    pub sessions: SessionRegistry,
    initial_length: u16,
    seed: Option<u64>,
    engines_created: Arc<AtomicU64>,
}

impl AppState {
    /// Builds the default game from `config`. With a seed, every engine the
    /// state creates places food deterministically.
    pub fn new(config: EngineConfig, seed: Option<u64>) -> Result<Self, SnakeError> {
        let game = build_engine(config, seed)?;

        Ok(Self {
            game: Arc::new(Mutex::new(game)),
            sessions: SessionRegistry::new(),
            initial_length: config.initial_length,
            seed,
            engines_created: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Creates an engine for a new session on `grid`.
    ///
    /// The n-th session engine is seeded with `seed + n`, so seeded sessions
    /// replay in creation order without sharing one food sequence.
    pub fn new_engine(&self, grid: GridSize) -> Result<SnakeEngine, SnakeError> {
        let config = EngineConfig::new(grid).with_initial_length(self.initial_length);
        build_engine(config, self.next_session_seed())
    }

    fn next_session_seed(&self) -> Option<u64> {
        let base = self.seed?;
        let ordinal = self.engines_created.fetch_add(1, Ordering::Relaxed) + 1;
        Some(base.wrapping_add(ordinal))
    }
}

fn build_engine(config: EngineConfig, seed: Option<u64>) -> Result<SnakeEngine, SnakeError> {
    match seed {
        Some(seed) => SnakeEngine::new_with_seed(config, seed),
        None => SnakeEngine::new(config),
    }
}

/// Builds the HTTP router. `static_dir`, when given, is served under
/// `/static`.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/", get(routes::root))
        .route("/api/game/state", get(routes::game_state))
        .route("/api/game/score", get(routes::game_score))
        .route("/api/game/move", post(routes::move_snake))
        .route("/api/game/direction/{direction}", post(routes::change_direction))
        .route("/api/game/reset", post(routes::reset_game))
        .route("/api/game/food", post(routes::set_food))
        .route("/game/start", post(routes::start_game))
        .route("/game/{session_id}/state", get(routes::session_state))
        .route("/game/{session_id}", delete(routes::end_session))
        .route("/ws/{session_id}", get(ws::ws_handler));

    if let Some(dir) = static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
