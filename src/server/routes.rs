use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize};
use crate::input::Direction;
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::snapshot::Snapshot;

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub message: String,
    pub session_id: String,
}

/// Grid requested by `POST /game/start`; missing sides use the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct StartParams {
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Debug food override body.
#[derive(Debug, Serialize, Deserialize)]
pub struct FoodRequest {
    pub x: i32,
    pub y: i32,
}

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let active_sessions = state.sessions.len().await;
    Json(json!({
        "message": "Snake Game API is running",
        "status": "active",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": active_sessions,
        "endpoints": {
            "GET /api/game/state": "Get current game state",
            "GET /api/game/score": "Get current score",
            "POST /api/game/move": "Move snake one step",
            "POST /api/game/direction/{direction}": "Change snake direction (up/right/down/left)",
            "POST /api/game/reset": "Reset game to initial state",
            "POST /api/game/food": "Move the food (debug)",
            "POST /game/start": "Start a new game session",
            "GET /game/{session_id}/state": "Get a session's game state",
            "DELETE /game/{session_id}": "End a game session",
            "GET /ws/{session_id}": "Drive a session over WebSocket"
        }
    }))
}

pub async fn game_state(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.game.lock().await.snapshot())
}

pub async fn game_score(State(state): State<AppState>) -> Json<ScoreResponse> {
    let score = state.game.lock().await.score();
    Json(ScoreResponse { score })
}

pub async fn move_snake(State(state): State<AppState>) -> Json<SuccessResponse> {
    let outcome = state.game.lock().await.step();
    tracing::debug!(?outcome, "default game stepped");
    Json(SuccessResponse {
        success: outcome.success(),
    })
}

pub async fn change_direction(
    State(state): State<AppState>,
    Path(direction): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let direction: Direction = direction.parse()?;
    state.game.lock().await.set_direction(direction);
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn reset_game(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.game.lock().await.reset()?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn set_food(
    State(state): State<AppState>,
    Json(food): Json<FoodRequest>,
) -> Json<SuccessResponse> {
    state.game.lock().await.set_food_position(food.x, food.y);
    Json(SuccessResponse { success: true })
}

pub async fn start_game(
    State(state): State<AppState>,
    Query(params): Query<StartParams>,
) -> Result<Json<StartResponse>, ApiError> {
    let grid = GridSize::try_new(
        params.width.unwrap_or(i64::from(DEFAULT_GRID_WIDTH)),
        params.height.unwrap_or(i64::from(DEFAULT_GRID_HEIGHT)),
    )?;
    let engine = state.new_engine(grid)?;
    let session_id = state.sessions.create(engine).await;

    Ok(Json(StartResponse {
        message: "Game started".to_owned(),
        session_id,
    }))
}

pub async fn session_state(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    let session = state.sessions.get(&session_id).await?;
    let snapshot = session.engine().lock().await.snapshot();
    Ok(Json(snapshot))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session = state.sessions.get(&session_id).await?;
    // Holding the attach flag keeps a socket from claiming the session while
    // it is removed.
    if !session.try_attach() {
        return Err(ApiError::SessionBusy(session_id));
    }

    state.sessions.remove(&session_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
