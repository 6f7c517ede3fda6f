//! Single-elimination photo tournaments.
//!
//! A tournament keeps one undefeated champion and walks a cursor through a
//! shuffled list of challengers. Every pick either keeps the champion or
//! crowns the challenger, then moves the cursor forward. `n` candidates need
//! exactly `n - 1` picks.

pub mod engine;
pub mod registry;
pub mod types;

pub use engine::{SessionState, Shuffler, ThreadRngShuffler, TournamentSession};
pub use registry::{ParticipantLocks, PickOutcome, SessionRegistry};
pub use types::{ImageRef, Pair, ParticipantId, Pick, RoundTag, Scope, SessionId};
