//! Error types surfaced by the battle engine and the interactive session.

#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error("move index {0} is out of range (0-3)")]
    InvalidMove(usize),

    #[error("the match is already over")]
    MatchOver,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("You cannot select the same Pokemon for both players.")]
    DuplicateSelection { index: usize },

    #[error("input ended before the match finished")]
    InputClosed,

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
