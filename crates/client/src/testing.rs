//! In-memory game server double for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use xiangqi_core::{GameState, Move};

use crate::api::GameServer;
use crate::error::ClientError;

type Reply = Result<GameState, ClientError>;

/// Replays queued replies and records every move it receives.
#[derive(Default)]
pub struct ScriptedServer {
    new_games: Mutex<VecDeque<Reply>>,
    moves: Mutex<VecDeque<Reply>>,
    states: Mutex<VecDeque<Reply>>,
    received: Mutex<Vec<Move>>,
}

impl ScriptedServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_new_game(&self, reply: Reply) {
        self.new_games.lock().unwrap().push_back(reply);
    }

    pub fn push_move(&self, reply: Reply) {
        self.moves.lock().unwrap().push_back(reply);
    }

    pub fn push_state(&self, reply: Reply) {
        self.states.lock().unwrap().push_back(reply);
    }

    pub fn moves(&self) -> Vec<Move> {
        self.received.lock().unwrap().clone()
    }

    fn pop(queue: &Mutex<VecDeque<Reply>>) -> Reply {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".to_string())))
    }
}

impl GameServer for ScriptedServer {
    async fn new_game(&self) -> Result<GameState, ClientError> {
        Self::pop(&self.new_games)
    }

    async fn submit_move(&self, mv: Move) -> Result<GameState, ClientError> {
        self.received.lock().unwrap().push(mv);
        Self::pop(&self.moves)
    }

    async fn fetch_state(&self) -> Result<GameState, ClientError> {
        Self::pop(&self.states)
    }

    async fn health(&self) -> Result<(), ClientError> {
        Ok(())
    }
}
