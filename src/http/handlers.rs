//! Route handlers.
//!
//! # Responsibilities
//! - Reject malformed input before anything touches the daemon socket
//! - Hold an admission gate slot for the duration of each forward
//! - Map forwarder errors onto HTTP statuses (503 unavailable, 502 other)

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::command::ChannelCommand;
use crate::downstream::ForwardError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `ANY /` — flat JSON object mapping channel-id strings to integer values.
pub async fn set_channel_values(State(state): State<AppState>, body: Bytes) -> Response {
    let start = Instant::now();

    if body.is_empty() {
        return reject(Route::Set, start, "request body required");
    }

    let map: HashMap<String, i64> = match serde_json::from_slice(&body) {
        Ok(map) => map,
        Err(e) => return reject(Route::Set, start, &e.to_string()),
    };

    let command = match ChannelCommand::from_map(&map) {
        Ok(command) => command,
        Err(e) => return reject(Route::Set, start, &e.to_string()),
    };

    forward(&state, Route::Set, command, start).await
}

#[derive(Debug, Deserialize)]
pub struct SetQuery {
    channel: u32,
    value: i64,
}

/// `GET /set?channel=<n>&value=<v>` — single-channel query variant.
pub async fn set_channel_query(
    State(state): State<AppState>,
    query: Result<Query<SetQuery>, QueryRejection>,
) -> Response {
    let start = Instant::now();

    let Query(query) = match query {
        Ok(query) => query,
        Err(e) => return reject(Route::SetQuery, start, &e.body_text()),
    };

    let command = ChannelCommand::single(query.channel, query.value);
    forward(&state, Route::SetQuery, command, start).await
}

/// `GET /status` — fixed-delay liveness route behind its own, wider gate.
pub async fn status(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let _slot = state.status_gate.acquire().await;
    tokio::time::sleep(state.status_delay).await;

    metrics::record_request(Route::Status.name(), 200, start);
    (StatusCode::OK, "OK").into_response()
}

#[derive(Clone, Copy)]
enum Route {
    Set,
    SetQuery,
    Status,
}

impl Route {
    fn name(self) -> &'static str {
        match self {
            Route::Set => "set",
            Route::SetQuery => "set_query",
            Route::Status => "status",
        }
    }
}

/// Serialize the command to the daemon while holding a set-gate slot.
async fn forward(state: &AppState, route: Route, command: ChannelCommand, start: Instant) -> Response {
    let _slot = state.set_gate.acquire().await;

    match state.daemon.send(&command).await {
        Ok(()) => {
            let encoded = command.encode();
            metrics::record_request(route.name(), 200, start);
            (StatusCode::OK, format!("OK ({})", encoded)).into_response()
        }
        Err(e) => {
            let status = match e {
                ForwardError::DaemonUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ForwardError::Dial(_) | ForwardError::Write(_) => StatusCode::BAD_GATEWAY,
            };
            tracing::error!(
                route = route.name(),
                status = status.as_u16(),
                error = %e,
                "Forwarding failed"
            );
            metrics::record_request(route.name(), status.as_u16(), start);
            (status, e.to_string()).into_response()
        }
    }
}

fn reject(route: Route, start: Instant, message: &str) -> Response {
    tracing::debug!(route = route.name(), error = message, "Rejected request");
    metrics::record_request(route.name(), 400, start);
    (StatusCode::BAD_REQUEST, message.to_string()).into_response()
}
