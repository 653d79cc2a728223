//! Board interaction controller.
//!
//! Owns the live snapshot (through [`Session`]) and the selection, turns clicks
//! into at most one server round-trip, and reconciles the result. A submission
//! holds `&mut self` until it completes, so two moves can never be in flight
//! against the same snapshot.

use std::sync::Arc;

use tracing::{debug, info, warn};
use xiangqi_core::{visual_to_logical, GameState, Move, Side, VisualCell};

use crate::api::GameServer;
use crate::error::ClientError;
use crate::notice::Notice;
use crate::render::{render, BoardView};
use crate::selection::{ClickAction, Selection, SelectionMachine};
use crate::session::Session;

/// Result of one click cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Selected(usize),
    Cancelled,
    /// The server accepted the move and its snapshot is now installed.
    Moved,
    /// The server refused the move. State is untouched.
    Rejected(String),
    /// The round-trip failed. State is untouched.
    Failed,
    /// Refused locally because the game is over; nothing was sent.
    Refused,
}

impl ClickOutcome {
    /// Whether this click went to the server.
    pub fn submitted(&self) -> bool {
        matches!(self, ClickOutcome::Moved | ClickOutcome::Rejected(_) | ClickOutcome::Failed)
    }
}

pub struct Controller<S> {
    server: S,
    session: Session,
    selection: SelectionMachine,
    notices: Vec<Notice>,
}

impl<S: GameServer> Controller<S> {
    pub fn new(server: S, player: Side) -> Self {
        Self {
            server,
            session: Session::new(),
            selection: SelectionMachine::new(player),
            notices: Vec::new(),
        }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn player(&self) -> Side {
        self.selection.player()
    }

    /// The authoritative snapshot, if a game has been started.
    pub fn state(&self) -> Option<Arc<GameState>> {
        self.session.state().cloned()
    }

    pub fn selection(&self) -> Selection {
        self.selection.state()
    }

    pub fn view(&self) -> BoardView {
        render(self.session.state().map(Arc::as_ref), self.selection.state())
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Install a server snapshot wholesale and drop any selection made against the old one.
    pub fn apply_state(&mut self, state: GameState) {
        self.selection.reset();
        if let Some(outcome) = self.session.install(state) {
            self.notices.push(Notice::GameOver(outcome));
        }
    }

    /// Ask the server for a fresh board in the standard starting position.
    pub async fn start_new_game(&mut self) -> Result<Arc<GameState>, ClientError> {
        self.selection.reset();
        let result = self.server.new_game().await.and_then(|state| {
            if state.game_over || state.winner.is_some() || state.current_turn != Side::Red {
                return Err(ClientError::Protocol(
                    "new game did not start at the opening position".to_string(),
                ));
            }
            Ok(state)
        });

        match result {
            Ok(state) => {
                info!(pieces = state.pieces.len(), "New game started");
                self.apply_state(state);
                self.state()
                    .ok_or_else(|| ClientError::Protocol("no state after new game".to_string()))
            }
            Err(e) => {
                warn!("Failed to start new game: {e}");
                self.notices.push(Notice::ConnectionProblem {
                    action: "start a new game",
                });
                Err(e)
            }
        }
    }

    /// Re-read the server's current snapshot.
    pub async fn resync(&mut self) -> Result<(), ClientError> {
        match self.server.fetch_state().await {
            Ok(state) => {
                debug!("Resynchronised with server");
                self.apply_state(state);
                Ok(())
            }
            Err(ClientError::Rejected { detail }) => {
                self.notices.push(Notice::ServerRefused(detail.clone()));
                Err(ClientError::Rejected { detail })
            }
            Err(e) => {
                warn!("Failed to fetch game state: {e}");
                self.notices.push(Notice::ConnectionProblem {
                    action: "sync with the server",
                });
                Err(e)
            }
        }
    }

    /// Handle a click on a rendered grid cell.
    pub async fn click(&mut self, cell: VisualCell) -> ClickOutcome {
        let Some(pos) = visual_to_logical(cell) else {
            return ClickOutcome::Ignored;
        };
        debug!(row = cell.row, col = cell.col, %pos, "Click");

        let action = self
            .selection
            .click(self.session.state().map(Arc::as_ref), pos);

        match action {
            ClickAction::Ignored => ClickOutcome::Ignored,
            ClickAction::Selected(index) => ClickOutcome::Selected(index),
            ClickAction::Cancelled => ClickOutcome::Cancelled,
            ClickAction::Propose(mv) => match self.submit(mv).await {
                Ok(()) => ClickOutcome::Moved,
                Err(ClientError::Rejected { detail }) => ClickOutcome::Rejected(detail),
                Err(ClientError::GameOver) => ClickOutcome::Refused,
                Err(_) => ClickOutcome::Failed,
            },
        }
    }

    /// Send one move to the server and reconcile. The held snapshot changes only on success.
    pub async fn submit(&mut self, mv: Move) -> Result<(), ClientError> {
        self.selection.reset();

        if self.session.state().is_none() {
            return Err(ClientError::Protocol("no game in progress".to_string()));
        }
        if self.session.is_over() {
            debug!("Move refused locally: game is over");
            return Err(ClientError::GameOver);
        }

        match self.server.submit_move(mv).await {
            Ok(state) => {
                debug!(turn = %state.current_turn, "Move accepted");
                self.apply_state(state);
                Ok(())
            }
            Err(ClientError::Rejected { detail }) => {
                warn!(piece_id = mv.piece_id, %detail, "Move rejected");
                self.notices.push(Notice::MoveRejected(detail.clone()));
                Err(ClientError::Rejected { detail })
            }
            Err(e) => {
                warn!(piece_id = mv.piece_id, "Move submission failed: {e}");
                self.notices.push(Notice::ConnectionProblem { action: "make move" });
                Err(e)
            }
        }
    }
}
