//! Action dispatcher: one confirmation-gated status mutation at a time.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use crate::api::participants::ParticipantGateway;
use crate::models::participant::ReviewAction;
use crate::models::posting::PostingRef;

/// What the user is asked to confirm: the action verb plus the participant
/// it targets.
#[derive(Debug, Clone)]
pub struct ConfirmationRequest {
    pub action: ReviewAction,
    pub participant_label: String,
}

/// The confirm step in front of every mutation. Production uses a terminal
/// prompt; tests script the answer.
pub trait ConfirmationGate: Send + Sync {
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// What became of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Confirmed and acknowledged by the server.
    Applied,
    /// Declined at the confirmation step; no network call was made.
    Cancelled,
    /// Confirmed but the server call failed. Logged only — there is no
    /// rollback because nothing was changed locally.
    Failed,
}

/// Issues accept/reject/set-pending calls, each gated by confirmation.
/// The dispatcher does not refetch; the board owning it does that on
/// `Applied` (fire-and-refetch, no optimistic update).
pub struct ActionDispatcher {
    gateway: Arc<dyn ParticipantGateway>,
    gate: Arc<dyn ConfirmationGate>,
}

impl ActionDispatcher {
    pub fn new(gateway: Arc<dyn ParticipantGateway>, gate: Arc<dyn ConfirmationGate>) -> Self {
        Self { gateway, gate }
    }

    pub async fn dispatch(
        &self,
        posting: &PostingRef,
        participant_id: Uuid,
        participant_label: String,
        action: ReviewAction,
    ) -> ActionOutcome {
        let request = ConfirmationRequest {
            action,
            participant_label,
        };

        if !self.gate.confirm(&request) {
            debug!(
                "declined: {} {} on {posting}",
                action.verb(),
                request.participant_label
            );
            return ActionOutcome::Cancelled;
        }

        match self
            .gateway
            .apply_action(posting, participant_id, action)
            .await
        {
            Ok(()) => ActionOutcome::Applied,
            Err(e) => {
                error!(
                    "failed to {} {} on {posting}: {e}",
                    action.verb(),
                    request.participant_label
                );
                ActionOutcome::Failed
            }
        }
    }
}
