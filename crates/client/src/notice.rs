use xiangqi_core::Outcome;

/// A message the user has to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The server refused a move; carries its reason.
    MoveRejected(String),
    /// The server refused a non-move request, e.g. a resync with no game running.
    ServerRefused(String),
    /// Network or protocol trouble while doing `action`.
    ConnectionProblem { action: &'static str },
    /// Raised once when a game ends.
    GameOver(Outcome),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::MoveRejected(reason) | Notice::ServerRefused(reason) => f.write_str(reason),
            Notice::ConnectionProblem { action } => {
                write!(f, "Failed to {action}. Please try again.")
            }
            Notice::GameOver(outcome) => write!(f, "Game Over! {outcome}"),
        }
    }
}
