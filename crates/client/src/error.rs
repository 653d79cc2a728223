use xiangqi_core::StateError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server declined the move; `detail` is meant for the user.
    #[error("{detail}")]
    Rejected { detail: String },

    #[error("Request error: {0}")]
    Transport(String),

    /// The server answered with something that is not a usable game state.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Game is already over")]
    GameOver,
}

impl ClientError {
    /// True for rule-based refusals, as opposed to connection or protocol trouble.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. } | ClientError::GameOver)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Protocol(format!("Body decode error: {e}"))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<StateError> for ClientError {
    fn from(e: StateError) -> Self {
        ClientError::Protocol(format!("Invalid game state: {e}"))
    }
}
