//! Applicant/participant endpoints and the gateway trait the review
//! workflow runs against.
//!
//! The trait exists so the workflow can be exercised against an in-memory
//! server in tests; production code only ever sees the `ApiClient` impl.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::models::participant::{Participant, ReviewAction};
use crate::models::posting::PostingRef;

/// One entry of the AI-ranked shortlist. `match_score` is 0–100; the
/// server has been seen emitting the display label as either `name` or
/// `title`, so both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(alias = "name")]
    pub title: String,
    pub match_score: u32,
    #[serde(default)]
    pub justification: String,
}

/// Network boundary of the review workflow: the three listing queries, the
/// three status mutations, and the recommendation shortlist.
#[async_trait]
pub trait ParticipantGateway: Send + Sync {
    async fn list_all(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError>;
    async fn list_accepted(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError>;
    async fn list_rejected(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError>;
    async fn apply_action(
        &self,
        posting: &PostingRef,
        participant_id: Uuid,
        action: ReviewAction,
    ) -> Result<(), ApiError>;
    async fn recommendations(&self, posting: &PostingRef)
        -> Result<Vec<Recommendation>, ApiError>;
}

/// `/trainings/:id/participants`, `/jobs/:id/applicants`, ... optionally
/// narrowed by a status segment (`accepted`/`rejected`).
fn listing_path(posting: &PostingRef, status: Option<&str>) -> String {
    let base = format!(
        "/{}/{}/{}",
        posting.kind.collection_segment(),
        posting.id,
        posting.kind.people_segment()
    );
    match status {
        Some(status) => format!("{base}/{status}"),
        None => base,
    }
}

/// `/trainings/:id/participants/:participantId/accept` and friends.
fn action_path(posting: &PostingRef, participant_id: Uuid, action: ReviewAction) -> String {
    format!(
        "{}/{}/{}",
        listing_path(posting, None),
        participant_id,
        action.path_segment()
    )
}

fn recommendations_path(posting: &PostingRef) -> String {
    format!(
        "/{}/{}/recommendations",
        posting.kind.collection_segment(),
        posting.id
    )
}

#[async_trait]
impl ParticipantGateway for ApiClient {
    async fn list_all(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError> {
        self.get(&listing_path(posting, None)).await
    }

    async fn list_accepted(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError> {
        self.get(&listing_path(posting, Some("accepted"))).await
    }

    async fn list_rejected(&self, posting: &PostingRef) -> Result<Vec<Participant>, ApiError> {
        self.get(&listing_path(posting, Some("rejected"))).await
    }

    async fn apply_action(
        &self,
        posting: &PostingRef,
        participant_id: Uuid,
        action: ReviewAction,
    ) -> Result<(), ApiError> {
        self.put_unit(&action_path(posting, participant_id, action))
            .await
    }

    async fn recommendations(
        &self,
        posting: &PostingRef,
    ) -> Result<Vec<Recommendation>, ApiError> {
        self.get(&recommendations_path(posting)).await
    }
}
