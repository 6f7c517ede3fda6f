use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OwnedMutexGuard;
use tracing::debug;

use crate::error::TournamentError;
use crate::tournament::engine::{Shuffler, ThreadRngShuffler, TournamentSession};
use crate::tournament::types::{ImageRef, Pair, ParticipantId, Pick, RoundTag, Scope};

/// Result of folding one pick into a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// The tournament continues with this comparison.
    Next(Pair),
    /// The tournament is decided; the session has already been removed.
    Finished { scope: Scope, winner: ImageRef },
}

/// Active tournaments, at most one per participant.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<ParticipantId, TournamentSession>>,
    shuffler: Arc<dyn Shuffler>,
    next_id: AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_shuffler(Arc::new(ThreadRngShuffler))
    }

    pub fn with_shuffler(shuffler: Arc<dyn Shuffler>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            shuffler,
            // Random start so buttons sent before a restart never match a new run
            next_id: AtomicU64::new(u64::from(rand::random::<u32>())),
        }
    }

    // Critical sections never panic midway, so a poisoned map is still consistent.
    fn sessions(&self) -> MutexGuard<'_, HashMap<ParticipantId, TournamentSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a tournament, silently replacing any session the participant
    /// already had. Returns the first comparison.
    pub fn begin_session(
        &self,
        participant: ParticipantId,
        scope: Scope,
        candidates: Vec<ImageRef>,
    ) -> Result<Pair, TournamentError> {
        let session =
            TournamentSession::start(participant, scope, candidates, self.shuffler.as_ref())?
                .with_id(self.next_id.fetch_add(1, Ordering::Relaxed));
        let pair = session
            .current_pair()
            .ok_or(TournamentError::InvalidSessionState)?;

        if let Some(previous) = self.sessions().insert(participant, session) {
            debug!(
                "Abandoned session of {} in {} at round {}",
                participant,
                previous.scope(),
                previous.cursor()
            );
        }

        Ok(pair)
    }

    pub fn get_session(&self, participant: ParticipantId) -> Option<TournamentSession> {
        self.sessions().get(&participant).cloned()
    }

    /// Applies a pick to whatever comparison is open.
    pub fn apply_pick(
        &self,
        participant: ParticipantId,
        pick: Pick,
    ) -> Result<PickOutcome, TournamentError> {
        self.apply(participant, None, pick)
    }

    /// Applies a pick only if `tag` names the running session and the
    /// comparison currently open in it.
    pub fn apply_pick_for_round(
        &self,
        participant: ParticipantId,
        tag: RoundTag,
        pick: Pick,
    ) -> Result<PickOutcome, TournamentError> {
        self.apply(participant, Some(tag), pick)
    }

    fn apply(
        &self,
        participant: ParticipantId,
        tag: Option<RoundTag>,
        pick: Pick,
    ) -> Result<PickOutcome, TournamentError> {
        let mut sessions = self.sessions();
        let session = sessions
            .get_mut(&participant)
            .ok_or(TournamentError::NoActiveSession)?;

        if let Some(tag) = tag {
            if tag.session != session.id() {
                return Err(TournamentError::StaleSession {
                    expected: session.id(),
                    got: tag.session,
                });
            }
            if tag.round != session.cursor() {
                return Err(TournamentError::StaleChoice {
                    expected: session.cursor(),
                    got: tag.round,
                });
            }
        }

        session.record_pick(pick)?;

        if let Some(pair) = session.current_pair() {
            return Ok(PickOutcome::Next(pair));
        }

        let winner = session.winner()?.clone();
        let scope = session.scope().clone();
        sessions.remove(&participant);

        Ok(PickOutcome::Finished { scope, winner })
    }

    /// Drops the participant's session without completing it.
    pub fn abandon(&self, participant: ParticipantId) -> bool {
        self.sessions().remove(&participant).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.sessions().len()
    }
}

/// One async mutex per participant.
///
/// Handlers hold the guard while they apply an action and render its output,
/// so a double-tapped button is processed strictly after the first tap while
/// other participants are never blocked.
#[derive(Default)]
pub struct ParticipantLocks {
    locks: Mutex<HashMap<ParticipantId, Arc<tokio::sync::Mutex<()>>>>,
}

impl ParticipantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn locks(&self) -> MutexGuard<'_, HashMap<ParticipantId, Arc<tokio::sync::Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn acquire(&self, participant: ParticipantId) -> OwnedMutexGuard<()> {
        let lock = self.locks().entry(participant).or_default().clone();
        lock.lock_owned().await
    }

    /// Forgets locks nobody holds or waits on. Returns how many were removed.
    pub fn prune_idle(&self) -> usize {
        let mut locks = self.locks();
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        self.locks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
