use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identity of a player (the Telegram user id).
pub type ParticipantId = u64;

/// Identity of one tournament run, unique within a registry.
pub type SessionId = u64;

/// Opaque handle of a displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name without the directory, used for gallery listings and callbacks.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|name| name.to_str())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Where the candidate images of a tournament come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A curated category folder, identified by its catalog key
    Category(String),
    /// The private upload gallery of a participant
    Gallery(ParticipantId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Category(key) => write!(f, "category:{key}"),
            Scope::Gallery(owner) => write!(f, "gallery:{owner}"),
        }
    }
}

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    ChampionWins,
    ChallengerWins,
}

/// The comparison currently waiting for a pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub champion: ImageRef,
    pub challenger: ImageRef,
    /// Session the comparison belongs to
    pub session: SessionId,
    /// 1-based number of this comparison (equals the session cursor)
    pub round: usize,
    pub total_rounds: usize,
}

impl Pair {
    pub fn tag(&self) -> RoundTag {
        RoundTag {
            session: self.session,
            round: self.round,
        }
    }
}

/// Which comparison a pick button was shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundTag {
    pub session: SessionId,
    pub round: usize,
}
