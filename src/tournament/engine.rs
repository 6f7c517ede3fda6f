use rand::seq::SliceRandom;

use crate::error::TournamentError;
use crate::tournament::types::{ImageRef, Pair, ParticipantId, Pick, Scope, SessionId};

/// Source of the random candidate order.
pub trait Shuffler: Send + Sync {
    fn shuffle(&self, images: &mut [ImageRef]);
}

/// Uniform shuffle backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngShuffler;

impl Shuffler for ThreadRngShuffler {
    fn shuffle(&self, images: &mut [ImageRef]) {
        images.shuffle(&mut rand::thread_rng());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingComparison,
    Completed,
}

/// One elimination run for one participant.
///
/// `order` is fixed at creation. `cursor` points at the next challenger and
/// stays within `1..=order.len()`; the session is completed exactly when
/// `cursor == order.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSession {
    id: SessionId,
    participant: ParticipantId,
    scope: Scope,
    order: Vec<ImageRef>,
    champion: usize,
    cursor: usize,
}

impl TournamentSession {
    /// Shuffles `candidates` and opens the first comparison.
    pub fn start<S: Shuffler + ?Sized>(
        participant: ParticipantId,
        scope: Scope,
        mut candidates: Vec<ImageRef>,
        shuffler: &S,
    ) -> Result<Self, TournamentError> {
        if candidates.len() < 2 {
            return Err(TournamentError::InsufficientCandidates {
                found: candidates.len(),
            });
        }

        shuffler.shuffle(&mut candidates);

        Ok(Self {
            id: 0,
            participant,
            scope,
            order: candidates,
            champion: 0,
            cursor: 1,
        })
    }

    /// Tags the session; the registry gives every run a fresh id.
    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn order(&self) -> &[ImageRef] {
        &self.order
    }

    pub fn champion(&self) -> &ImageRef {
        &self.order[self.champion]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> SessionState {
        if self.cursor >= self.order.len() {
            SessionState::Completed
        } else {
            SessionState::AwaitingComparison
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == SessionState::Completed
    }

    /// The open comparison, or `None` once the tournament is decided.
    pub fn current_pair(&self) -> Option<Pair> {
        let challenger = self.order.get(self.cursor)?;
        Some(Pair {
            champion: self.champion().clone(),
            challenger: challenger.clone(),
            session: self.id,
            round: self.cursor,
            total_rounds: self.order.len() - 1,
        })
    }

    /// Folds one pick into the standings. The only mutator of a session.
    pub fn record_pick(&mut self, pick: Pick) -> Result<(), TournamentError> {
        if self.is_completed() {
            return Err(TournamentError::InvalidSessionState);
        }

        if pick == Pick::ChallengerWins {
            self.champion = self.cursor;
        }
        self.cursor += 1;

        Ok(())
    }

    pub fn winner(&self) -> Result<&ImageRef, TournamentError> {
        if !self.is_completed() {
            return Err(TournamentError::InvalidSessionState);
        }
        Ok(self.champion())
    }
}
