//! Fake Jellyfin server
//!
//! Serves the user list on `/Users` and a non-JSON body on `/broken/Users`.
//! It runs on its own thread and tokio runtime, since the code under test
//! uses a blocking HTTP client.

#![allow(dead_code)]

use super::constants::*;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::net::TcpListener;

struct FakeState {
    users: Value,
    requests: AtomicUsize,
}

/// When dropped, the server shuts down and its thread is joined.
pub struct FakeJellyfin {
    /// Base URL for requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    state: Arc<FakeState>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FakeJellyfin {
    /// Spawns a server knowing alice and Bob.
    pub fn spawn() -> Self {
        Self::spawn_with_users(json!([
            {"Name": ALICE_NAME, "Id": ALICE_ID, "ServerId": "s1", "HasPassword": true},
            {"Name": BOB_NAME, "Id": BOB_ID, "ServerId": "s1", "HasPassword": false}
        ]))
    }

    pub fn spawn_with_users(users: Value) -> Self {
        let state = Arc::new(FakeState {
            users,
            requests: AtomicUsize::new(0),
        });
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let app = Router::new()
            .route("/Users", get(list_users))
            .route("/broken/Users", get(broken_users))
            .with_state(state.clone());

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .unwrap();
            });
        });

        let addr = addr_rx.recv().unwrap();
        FakeJellyfin {
            base_url: format!("http://{}", addr),
            state,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    /// Number of requests to `/Users` seen so far.
    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

impl Drop for FakeJellyfin {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn list_users(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let expected = format!("MediaBrowser Token={}", API_KEY);
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(state.users.clone()).into_response()
}

async fn broken_users() -> Response {
    (StatusCode::OK, "<html>not the API</html>").into_response()
}
