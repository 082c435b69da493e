use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use crate::input::Direction;
use crate::server::error::{ApiError, ErrorBody};
use crate::server::AppState;
use crate::session::{Session, SessionId, SessionRegistry};
use crate::snapshot::Snapshot;

/// Frame pushed after every accepted direction.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateMessage {
    pub success: bool,
    pub state: Snapshot,
    pub rendered_state: String,
    pub score: u32,
    pub is_game_over: bool,
}

impl StateMessage {
    fn new(success: bool, state: Snapshot) -> Self {
        Self {
            success,
            rendered_state: state.render_text(),
            score: state.score,
            is_game_over: state.game_over,
            state,
        }
    }
}

/// WebSocket upgrade handler; the session must exist and be free.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let session = state.sessions.get(&session_id).await?;
    if !session.try_attach() {
        return Err(ApiError::SessionBusy(session_id));
    }

    let registry = state.sessions.clone();
    let failed_session = Arc::clone(&session);
    Ok(ws
        .on_failed_upgrade(move |error| {
            tracing::warn!(%error, "websocket upgrade failed");
            failed_session.detach();
        })
        .on_upgrade(move |socket| handle_socket(socket, session_id, session, registry)))
}

/// Drives one session until the client goes away, then ends the session.
async fn handle_socket(
    socket: WebSocket,
    session_id: SessionId,
    session: Arc<Session>,
    registry: SessionRegistry,
) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(%session_id, "client attached");

    // Replies are written before the next frame is read, so a client that
    // stops reading stalls its own loop instead of queueing replies.
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let Some(reply) = handle_text_message(&session, &session_id, text.as_str()).await
                else {
                    continue;
                };
                if let Err(error) = sender.send(reply).await {
                    tracing::debug!(%session_id, %error, "failed to send reply");
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!(%session_id, "client closed the socket");
                break;
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(%session_id, %error, "websocket error");
                break;
            }
        }
    }

    session.detach();
    if registry.remove(&session_id).await.is_err() {
        tracing::debug!(%session_id, "session was already removed");
    }
}

/// Applies one direction frame and builds the reply.
async fn handle_text_message(
    session: &Session,
    session_id: &str,
    text: &str,
) -> Option<Message> {
    let payload = match text.parse::<Direction>() {
        Ok(direction) => {
            let (success, snapshot) = {
                let mut engine = session.engine().lock().await;
                engine.set_direction(direction);
                let outcome = engine.step();
                tracing::debug!(%session_id, %direction, ?outcome, "session stepped");
                (outcome.success(), engine.snapshot())
            };
            serde_json::to_string(&StateMessage::new(success, snapshot))
        }
        Err(error) => {
            tracing::warn!(%session_id, %error, "rejected frame");
            serde_json::to_string(&ErrorBody {
                error: error.to_string(),
            })
        }
    };

    match payload {
        Ok(json) => Some(Message::Text(json.into())),
        Err(error) => {
            tracing::warn!(%session_id, %error, "failed to encode reply");
            None
        }
    }
}
