use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use marquee_core::content::{parse_table_list, ContentTable};
use serde::Deserialize;

use super::hub::RealtimeHub;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RealtimeQuery {
    /// Comma-separated table names; absent means every table.
    pub tables: Option<String>,
}

/// GET /api/v1/realtime?tables=a,b
///
/// Upgrades to a WebSocket that streams `TableChange` frames for the
/// requested tables. Unknown table names are rejected before the upgrade.
pub async fn realtime_handler(
    State(state): State<AppState>,
    Query(query): Query<RealtimeQuery>,
    ws: WebSocketUpgrade,
) -> AppResult<impl IntoResponse> {
    let tables = parse_table_list(query.tables.as_deref()).map_err(AppError::BadRequest)?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state.realtime, tables)))
}

/// Register with the hub, forward its frames, and drain inbound frames
/// until the client goes away.
async fn handle_socket(socket: WebSocket, hub: Arc<RealtimeHub>, tables: Vec<ContentTable>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, tables = tables.len(), "Realtime client connected");

    let mut rx = hub.add(conn_id.clone(), tables).await;
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Realtime sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            // The feed is one-way.
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Realtime receive error");
                break;
            }
        }
    }

    hub.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Realtime client disconnected");
}
