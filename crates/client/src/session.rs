//! Holder of the single live game snapshot.

use std::sync::Arc;

use tracing::info;
use xiangqi_core::{GameState, Outcome};

/// Owns the authoritative `GameState`. Snapshots are swapped whole, never edited.
#[derive(Debug, Default)]
pub struct Session {
    state: Option<Arc<GameState>>,
    /// Whether the end of the current game has already been announced.
    announced: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&Arc<GameState>> {
        self.state.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.game_over)
    }

    /// Replace the held snapshot. Returns the outcome if this install ended the game
    /// and it has not been announced yet.
    pub fn install(&mut self, state: GameState) -> Option<Outcome> {
        let outcome = state.outcome();
        self.state = Some(Arc::new(state));

        match outcome {
            None => {
                self.announced = false;
                None
            }
            Some(_) if self.announced => None,
            Some(outcome) => {
                info!(%outcome, "Game over");
                self.announced = true;
                Some(outcome)
            }
        }
    }
}
