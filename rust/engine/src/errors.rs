use thiserror::Error;

/// Why a move or flip was refused. Carried inside [`EngineError::IllegalMove`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("pile {pile} does not exist")]
    PileOutOfRange { pile: usize },
    #[error("source and target are the same pile")]
    SamePile,
    #[error("pile {pile} has no card at index {index}")]
    CardOutOfRange { pile: usize, index: usize },
    #[error("card {index} in pile {pile} is face down")]
    FaceDownCard { pile: usize, index: usize },
    #[error("cards from index {index} in pile {pile} do not form a movable run")]
    NotARun { pile: usize, index: usize },
    #[error("pile {target} does not accept the run")]
    RankMismatch { target: usize },
    #[error("top card of pile {pile} cannot be flipped")]
    NotFlippable { pile: usize },
}

/// Every failure the engine reports. All are recoverable: the command that
/// produced one left the game state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("Cannot deal: stock is empty or a column is empty")]
    EmptyStock,
    #[error("Nothing to undo")]
    HistoryEmpty,
    #[error("Invalid saved game: {0}")]
    InvalidRecord(String),
    #[error("Game already won")]
    AlreadyWon,
    #[error("Auto-complete needs an empty stock and every card face up")]
    SolverUnavailable,
    #[error("No special actions left")]
    NoSpecialActions,
}

/// Failure inside a [`crate::persist::GameStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved game could not be encoded or decoded: {0}")]
    Codec(#[from] serde_json::Error),
}
