//! Error types shared across the bot.

use thiserror::Error;

/// Errors raised by the tournament state machine and the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// A scope had fewer than two images when a tournament was requested.
    #[error("not enough candidates to start a tournament: found {found}, need at least 2")]
    InsufficientCandidates { found: usize },

    /// A pick arrived for a participant without a running tournament.
    #[error("no active tournament session")]
    NoActiveSession,

    /// `record_pick` or `winner` was called in the wrong state.
    #[error("operation not valid in the current session state")]
    InvalidSessionState,

    /// A pick button from an already decided pair was pressed.
    #[error("pick for round {got} arrived while round {expected} is open")]
    StaleChoice { expected: usize, got: usize },

    /// A pick button from a tournament that was replaced or has finished.
    #[error("pick for session {got} arrived while session {expected} is running")]
    StaleSession { expected: u64, got: u64 },
}

/// Errors raised by image storage and the stats file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unsupported image format '{0}', use .jpg, .jpeg or .png")]
    UnsupportedFormat(String),

    #[error("invalid file name '{0}'")]
    InvalidFileName(String),

    /// The participant's gallery already holds the configured maximum.
    #[error("gallery is full ({limit} photos)")]
    GalleryFull { limit: usize },

    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
