//! Turns inbound player actions into presenter events.
//!
//! The service owns no transport: callers hold the participant's lock from
//! [`ParticipantLocks`](crate::tournament::ParticipantLocks), call one of the
//! actions below and render the returned events in order.

use std::sync::Arc;
use tracing::error;

use crate::config::Categories;
use crate::error::{StorageError, TournamentError};
use crate::storage::ImageSource;
use crate::tournament::{
    ImageRef, Pair, ParticipantId, Pick, PickOutcome, RoundTag, Scope, SessionRegistry,
};
use crate::utils::logging::log_game_event;

/// Why an action could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotEnoughPhotos,
    SessionExpired,
    StaleChoice,
    UnknownScope,
    Internal,
}

/// Something the presenter should show to the participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    ShowPair(Pair),
    ShowWinner { scope: Scope, image: ImageRef },
    PromptScopeChoice,
    Error { kind: ErrorKind, message: String },
}

impl PresenterEvent {
    fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        PresenterEvent::Error {
            kind,
            message: message.into(),
        }
    }
}

pub struct GameService {
    registry: Arc<SessionRegistry>,
    images: Arc<dyn ImageSource>,
    categories: Categories,
}

impl GameService {
    pub fn new(registry: Arc<SessionRegistry>, images: Arc<dyn ImageSource>, categories: Categories) -> Self {
        Self {
            registry,
            images,
            categories,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Starts a tournament over `scope`, replacing any running one.
    pub fn select_scope(&self, participant: ParticipantId, scope: Scope) -> Vec<PresenterEvent> {
        let candidates = match self.images.list_images(&scope) {
            Ok(candidates) => candidates,
            Err(StorageError::UnknownCategory(key)) => {
                return vec![
                    PresenterEvent::error(ErrorKind::UnknownScope, format!("Unknown category '{key}'.")),
                    PresenterEvent::PromptScopeChoice,
                ];
            }
            Err(e) => {
                error!("Failed to list images for {}: {}", scope, e);
                return vec![PresenterEvent::error(
                    ErrorKind::Internal,
                    "Could not load photos right now. Please try again later.",
                )];
            }
        };

        match self.registry.begin_session(participant, scope.clone(), candidates) {
            Ok(pair) => {
                log_game_event(
                    "started",
                    participant,
                    Some(&format!("{} with {} rounds", scope, pair.total_rounds)),
                );
                vec![PresenterEvent::ShowPair(pair)]
            }
            Err(TournamentError::InsufficientCandidates { found }) => {
                log_game_event("not_enough_photos", participant, Some(&format!("{scope} has {found}")));
                vec![PresenterEvent::error(
                    ErrorKind::NotEnoughPhotos,
                    self.not_enough_photos_message(&scope, found),
                )]
            }
            Err(e) => {
                error!("Failed to start tournament for {}: {}", participant, e);
                vec![PresenterEvent::error(ErrorKind::Internal, "Something went wrong. Please try again.")]
            }
        }
    }

    /// Applies a pick. `tag` is the comparison the button was shown for;
    /// `None` accepts the pick for whatever comparison is open.
    pub fn submit_pick(
        &self,
        participant: ParticipantId,
        tag: Option<RoundTag>,
        pick: Pick,
    ) -> Vec<PresenterEvent> {
        let outcome = match tag {
            Some(tag) => self.registry.apply_pick_for_round(participant, tag, pick),
            None => self.registry.apply_pick(participant, pick),
        };

        match outcome {
            Ok(PickOutcome::Next(pair)) => vec![PresenterEvent::ShowPair(pair)],
            Ok(PickOutcome::Finished { scope, winner }) => {
                log_game_event("finished", participant, Some(&format!("{scope} won by {winner}")));
                vec![
                    PresenterEvent::ShowWinner { scope, image: winner },
                    PresenterEvent::PromptScopeChoice,
                ]
            }
            Err(TournamentError::NoActiveSession) => vec![PresenterEvent::error(
                ErrorKind::SessionExpired,
                "This session has ended. Use /menu to start a new one.",
            )],
            Err(TournamentError::StaleChoice { .. }) => vec![PresenterEvent::error(
                ErrorKind::StaleChoice,
                "That pair was already decided. Pick from the latest photos.",
            )],
            Err(TournamentError::StaleSession { .. }) => vec![PresenterEvent::error(
                ErrorKind::StaleChoice,
                "Those buttons belong to an earlier tournament. Pick from the latest photos.",
            )],
            Err(e) => {
                error!("Failed to apply pick for {}: {}", participant, e);
                vec![PresenterEvent::error(ErrorKind::Internal, "Something went wrong. Please try again.")]
            }
        }
    }

    fn not_enough_photos_message(&self, scope: &Scope, found: usize) -> String {
        match scope {
            Scope::Category(key) => format!(
                "{} has only {} photo(s). At least 2 .jpg/.jpeg/.png files are needed, try another category.",
                self.categories.label(key),
                found
            ),
            Scope::Gallery(_) => format!(
                "Your gallery has {found} photo(s). Send me at least 2 photos to play with your own images."
            ),
        }
    }
}
