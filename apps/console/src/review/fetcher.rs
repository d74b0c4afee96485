//! Listing fetcher: the three independent queries behind one snapshot.

use std::sync::Arc;

use tracing::error;

use crate::api::participants::ParticipantGateway;
use crate::api::ApiError;
use crate::models::participant::Participant;
use crate::models::posting::PostingRef;
use crate::review::partition::ListingSnapshot;

/// Fetches the `all`/`accepted`/`rejected` listings for one posting. The
/// three requests run concurrently and do not share fate: a failed query is
/// logged and contributes an empty list, the other two keep their results.
/// No retry, no pagination, no caching between cycles.
pub struct ListingFetcher {
    gateway: Arc<dyn ParticipantGateway>,
}

impl ListingFetcher {
    pub fn new(gateway: Arc<dyn ParticipantGateway>) -> Self {
        Self { gateway }
    }

    pub async fn fetch(&self, posting: &PostingRef) -> ListingSnapshot {
        let (all, accepted, rejected) = tokio::join!(
            self.gateway.list_all(posting),
            self.gateway.list_accepted(posting),
            self.gateway.list_rejected(posting),
        );

        ListingSnapshot {
            all: or_empty(all, "all", posting),
            accepted: or_empty(accepted, "accepted", posting),
            rejected: or_empty(rejected, "rejected", posting),
        }
    }
}

fn or_empty(
    result: Result<Vec<Participant>, ApiError>,
    listing: &str,
    posting: &PostingRef,
) -> Vec<Participant> {
    match result {
        Ok(list) => list,
        Err(e) => {
            error!("failed to fetch {listing} listing for {posting}: {e}");
            Vec::new()
        }
    }
}
