//! Throwaway game server for integration tests.
//!
//! Speaks the same JSON contract as the real server but performs no rule checks:
//! each accepted move just relocates the piece and flips the turn, unless a reply
//! has been scripted for it.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use client::api::HttpGameServer;
use client::config::ClientConfig;
use client::controller::Controller;
use serde_json::json;
use xiangqi_core::{GameState, Move, Position, Side, VisualCell};

/// A canned answer for the next `POST /api/move`.
pub enum MoveReply {
    Accept(GameState),
    Reject(StatusCode, &'static str),
    Raw(StatusCode, &'static str),
}

#[derive(Default)]
struct Inner {
    game: Option<GameState>,
    received: Vec<Move>,
    script: VecDeque<MoveReply>,
}

#[derive(Clone, Default)]
pub struct MockServer {
    inner: Arc<Mutex<Inner>>,
}

impl MockServer {
    pub fn script(&self, reply: MoveReply) {
        self.inner.lock().unwrap().script.push_back(reply);
    }

    pub fn moves(&self) -> Vec<Move> {
        self.inner.lock().unwrap().received.clone()
    }

    pub fn set_game(&self, game: Option<GameState>) {
        self.inner.lock().unwrap().game = game;
    }
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn new_game(State(mock): State<MockServer>) -> Json<GameState> {
    let game = GameState::standard();
    mock.inner.lock().unwrap().game = Some(game.clone());
    Json(game)
}

async fn game_state(State(mock): State<MockServer>) -> Response {
    match mock.inner.lock().unwrap().game.clone() {
        Some(game) => Json(game).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "No game in progress" })),
        )
            .into_response(),
    }
}

async fn make_move(State(mock): State<MockServer>, Json(mv): Json<Move>) -> Response {
    let mut inner = mock.inner.lock().unwrap();
    inner.received.push(mv);

    match inner.script.pop_front() {
        Some(MoveReply::Accept(game)) => {
            inner.game = Some(game.clone());
            Json(game).into_response()
        }
        Some(MoveReply::Reject(status, detail)) => {
            (status, Json(json!({ "detail": detail }))).into_response()
        }
        Some(MoveReply::Raw(status, body)) => (status, body.to_string()).into_response(),
        None => {
            let Some(game) = inner.game.as_mut() else {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "detail": "No game in progress" })),
                )
                    .into_response();
            };
            let Some(piece) = game.pieces.get_mut(mv.piece_id) else {
                return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Invalid move" })))
                    .into_response();
            };
            piece.position = mv.destination();
            game.current_turn = game.current_turn.opponent();
            Json(game.clone()).into_response()
        }
    }
}

/// Start the stand-in server on an ephemeral port. Returns its handle and base URL.
pub async fn spawn() -> (MockServer, String) {
    let mock = MockServer::default();
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/new-game", post(new_game))
        .route("/api/game-state", get(game_state))
        .route("/api/move", post(make_move))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server error");
    });

    (mock, format!("http://{addr}"))
}

/// HTTP-backed controller pointed at `base_url`, playing the first side.
pub fn controller(base_url: &str) -> Controller<HttpGameServer> {
    let config = ClientConfig {
        api_url: base_url.to_string(),
        ..ClientConfig::default()
    };
    let server = HttpGameServer::new(&config).expect("Failed to build HTTP client");
    Controller::new(server, Side::Red)
}

/// The rendered cell holding logical coordinate `(x, y)`.
pub fn cell(x: u8, y: u8) -> VisualCell {
    xiangqi_core::logical_to_visual(Position::new(x, y).expect("on board")).expect("on board")
}
