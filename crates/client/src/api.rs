//! Game server contract and its HTTP implementation.

use std::future::Future;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use xiangqi_core::{GameState, Move};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Reason shown when the server refuses a move without saying why.
pub const DEFAULT_REJECTION: &str = "Invalid move";

/// The authoritative game server. Every call either yields a full snapshot or an error;
/// nothing here ever patches a local state.
pub trait GameServer {
    /// `POST /api/new-game`
    fn new_game(&self) -> impl Future<Output = Result<GameState, ClientError>> + Send;

    /// `POST /api/move`
    fn submit_move(&self, mv: Move) -> impl Future<Output = Result<GameState, ClientError>> + Send;

    /// `GET /api/game-state`
    fn fetch_state(&self) -> impl Future<Output = Result<GameState, ClientError>> + Send;

    /// `GET /healthz`
    fn health(&self) -> impl Future<Output = Result<(), ClientError>> + Send;
}

pub struct HttpGameServer {
    client: Client,
    base_url: String,
}

impl HttpGameServer {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Client build error: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl GameServer for HttpGameServer {
    async fn new_game(&self) -> Result<GameState, ClientError> {
        let resp = self.client.post(self.url("/api/new-game")).send().await?;
        read_state(resp).await
    }

    async fn submit_move(&self, mv: Move) -> Result<GameState, ClientError> {
        tracing::debug!(
            piece_id = mv.piece_id,
            to_x = mv.to_x,
            to_y = mv.to_y,
            "Submitting move"
        );
        let resp = self
            .client
            .post(self.url("/api/move"))
            .json(&mv)
            .send()
            .await?;
        read_state(resp).await
    }

    async fn fetch_state(&self) -> Result<GameState, ClientError> {
        let resp = self.client.get(self.url("/api/game-state")).send().await?;
        read_state(resp).await
    }

    async fn health(&self) -> Result<(), ClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Transport(format!("HTTP {}", resp.status())));
        }
        let body: Value = resp.json().await?;
        match body.get("status").and_then(|v| v.as_str()) {
            Some("ok") => Ok(()),
            _ => Err(ClientError::Protocol(format!("Unexpected health body: {body}"))),
        }
    }
}

/// Turn a server response into a validated snapshot.
/// 4xx answers are rejections carrying the server's `detail`; 5xx answers are
/// treated as the server failing, not as a verdict on the move.
async fn read_state(resp: Response) -> Result<GameState, ClientError> {
    let status = resp.status();

    if status.is_success() {
        let text = resp.text().await?;
        let state: GameState = serde_json::from_str(&text)
            .map_err(|e| ClientError::Protocol(format!("JSON parse error: {e}")))?;
        state.validate()?;
        return Ok(state);
    }

    let text = resp.text().await.unwrap_or_default();
    let detail = rejection_detail(&text);

    if status.is_client_error() {
        tracing::debug!(%status, %detail, "Server rejected request");
        Err(ClientError::Rejected { detail })
    } else {
        Err(server_failure(status, &detail))
    }
}

fn server_failure(status: StatusCode, detail: &str) -> ClientError {
    ClientError::Transport(format!("HTTP {status}: {detail}"))
}

/// Extract `{"detail": "..."}` from an error body.
/// Non-string details (e.g. validation error lists) fall back to the generic reason.
pub fn rejection_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_REJECTION.to_string())
}
