use crate::prelude::{eprintln, *};
use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::Mutex;
use toolbelt_core::Session;
use tower_http::cors::{Any, CorsLayer};

/// Server state. Each `/sse` connection owns one session, keyed by the id
/// announced in its `endpoint` event.
struct ServerState {
    global: crate::Global,
    sessions: std::sync::Mutex<HashMap<String, Arc<Mutex<Session>>>>,
}

impl ServerState {
    fn new(global: crate::Global) -> Self {
        Self {
            global,
            sessions: std::sync::Mutex::new(HashMap::new()),
        }
    }

    fn open_session(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(id.clone(), Arc::new(Mutex::new(Session::new())));
        }
        log::debug!("opened sse session {id}");
        id
    }

    fn close_session(&self, id: &str) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(id);
        }
        log::debug!("closed sse session {id}");
    }

    fn session(&self, id: Option<&str>) -> Option<Arc<Mutex<Session>>> {
        let id = id?;
        let sessions = self.sessions.lock().ok()?;
        sessions.get(id).cloned()
    }
}

/// Drops the connection's session when its event stream goes away.
struct SessionGuard {
    state: Arc<ServerState>,
    id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.close_session(&self.id);
    }
}

#[derive(Debug, Default, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Starting MCP server with SSE transport on {}:{}...",
            options.host, options.port
        );
    }

    let addr = format!("{}:{}", options.host, options.port);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(global.clone()));

    let app_router = Router::new()
        .route("/sse", get(sse_handler))
        .route("/message", post(message_handler))
        .layer(cors)
        .with_state(state);

    if global.verbose {
        eprintln!("MCP server listening on http://{}", addr);
        eprintln!("SSE endpoint: http://{}/sse", addr);
        eprintln!("Message endpoint: http://{}/message", addr);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("mcp sse server listening on {addr}");

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Opens a session and tells the client where to post its messages. The
/// stream stays open until the client disconnects.
async fn sse_handler(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let id = state.open_session();
    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/message?sessionId={id}"));
    let guard = SessionGuard { state, id };

    let stream = stream::once(async move { Ok(endpoint) })
        .chain(stream::pending())
        .map(move |event| {
            let _guard = &guard;
            event
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Posts without a known `sessionId` run against a fresh session.
async fn message_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<MessageQuery>,
    Json(request): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let request_str = serde_json::to_string(&request).unwrap_or_default();

    if state.global.verbose {
        eprintln!("Received: {request_str}");
    }

    let response = match state.session(query.session_id.as_deref()) {
        Some(session) => {
            let mut session = session.lock().await;
            super::handle_request(&request_str, &mut session, &state.global).await
        }
        None => {
            log::debug!("no sse session for {:?}", query.session_id);
            let mut session = Session::new();
            super::handle_request(&request_str, &mut session, &state.global).await
        }
    };

    Json(serde_json::to_value(response).unwrap_or(serde_json::Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn state() -> Arc<ServerState> {
        Arc::new(ServerState::new(crate::Global { verbose: false }))
    }

    async fn post(state: &Arc<ServerState>, id: Option<&str>, name: &str, arguments: Value) -> String {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        });
        let query = MessageQuery {
            session_id: id.map(str::to_string),
        };
        let Json(response) = message_handler(State(state.clone()), Query(query), Json(request)).await;
        response["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string()
    }

    // ============================================================================
    // session isolation tests
    // ============================================================================

    #[tokio::test]
    async fn test_connections_do_not_share_sessions() {
        let state = state();
        let a = state.open_session();
        let b = state.open_session();

        post(&state, Some(&a), "hmac", json!({"message": "msg", "key": "key"})).await;
        post(&state, Some(&a), "base64", json!({"input": "aGVsbG8=", "mode": "decode"})).await;

        let hmac = post(&state, Some(&b), "hmac", json!({"message": "other"})).await;
        assert_eq!(hmac, "Enter message and key");

        let encoded = post(&state, Some(&b), "base64", json!({"input": "hello"})).await;
        assert_eq!(encoded, "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_session_keeps_state_between_posts() {
        let state = state();
        let id = state.open_session();

        post(&state, Some(&id), "hmac", json!({"message": "msg"})).await;
        let hmac = post(&state, Some(&id), "hmac", json!({"key": "key"})).await;
        assert!(hmac.starts_with("HMAC-SHA256: "));
    }

    #[tokio::test]
    async fn test_unknown_session_gets_fresh_state() {
        let state = state();
        let id = state.open_session();
        post(&state, Some(&id), "hmac", json!({"message": "msg"})).await;

        let hmac = post(&state, Some("missing"), "hmac", json!({"key": "key"})).await;
        assert_eq!(hmac, "Enter message and key");
        let hmac = post(&state, None, "hmac", json!({"key": "key"})).await;
        assert_eq!(hmac, "Enter message and key");
    }

    #[tokio::test]
    async fn test_closing_stream_drops_session() {
        let state = state();
        let id = state.open_session();
        assert!(state.session(Some(&id)).is_some());

        drop(SessionGuard {
            state: state.clone(),
            id: id.clone(),
        });
        assert!(state.session(Some(&id)).is_none());
    }
}
