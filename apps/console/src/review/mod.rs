//! Applicant/participant review workflow.
//!
//! A `ReviewBoard` is the console's stand-in for the original review
//! screen: it owns the current listing snapshot for one posting, derives
//! the three display buckets from it, and funnels every status mutation
//! through the confirmation-gated dispatcher followed by a full re-fetch.

pub mod dispatcher;
pub mod fetcher;
pub mod partition;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;
use uuid::Uuid;

use crate::api::participants::ParticipantGateway;
use crate::models::participant::ReviewAction;
use crate::models::posting::PostingRef;
use self::dispatcher::{ActionDispatcher, ActionOutcome, ConfirmationGate};
use self::fetcher::ListingFetcher;
use self::partition::{partition, Buckets, ListingSnapshot};

/// Review board for one posting.
///
/// Snapshot writes are last-write-wins: two overlapping refreshes (e.g.
/// actions on two participants dispatched back-to-back) race arbitrarily
/// and whichever response set arrives last is the one displayed. A closed
/// board drops any snapshot that is still in flight, so nothing writes to
/// a board the user has left.
pub struct ReviewBoard {
    posting: PostingRef,
    fetcher: ListingFetcher,
    dispatcher: ActionDispatcher,
    snapshot: Mutex<ListingSnapshot>,
    closed: AtomicBool,
}

impl ReviewBoard {
    pub fn new(
        posting: PostingRef,
        gateway: Arc<dyn ParticipantGateway>,
        gate: Arc<dyn ConfirmationGate>,
    ) -> Self {
        Self {
            posting,
            fetcher: ListingFetcher::new(Arc::clone(&gateway)),
            dispatcher: ActionDispatcher::new(gateway, gate),
            snapshot: Mutex::new(ListingSnapshot::default()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn posting(&self) -> &PostingRef {
        &self.posting
    }

    /// Re-fetches all three listings and replaces the snapshot wholesale.
    pub async fn refresh(&self) {
        if self.is_closed() {
            return;
        }
        let snapshot = self.fetcher.fetch(&self.posting).await;
        self.install(snapshot);
    }

    /// Derives the display buckets from the current snapshot. Always
    /// recomputed; nothing here is cached across fetch cycles.
    pub fn buckets(&self) -> Buckets {
        partition(&self.snapshot.lock().expect("snapshot lock poisoned"))
    }

    /// Runs one confirmation-gated action and, if the server applied it,
    /// triggers the full three-listing re-fetch.
    pub async fn dispatch(&self, participant_id: Uuid, action: ReviewAction) -> ActionOutcome {
        let label = self.participant_label(participant_id);
        let outcome = self
            .dispatcher
            .dispatch(&self.posting, participant_id, label, action)
            .await;
        if outcome == ActionOutcome::Applied {
            self.refresh().await;
        }
        outcome
    }

    /// Marks the board as left. In-flight snapshots are dropped on arrival.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn install(&self, snapshot: ListingSnapshot) {
        if self.is_closed() {
            debug!("dropping snapshot for closed board {}", self.posting);
            return;
        }
        *self.snapshot.lock().expect("snapshot lock poisoned") = snapshot;
    }

    /// Name to show in the confirmation prompt; falls back to the raw id
    /// when the participant is not in the current snapshot.
    fn participant_label(&self, participant_id: Uuid) -> String {
        let snapshot = self.snapshot.lock().expect("snapshot lock poisoned");
        snapshot
            .all
            .iter()
            .chain(snapshot.accepted.iter())
            .chain(snapshot.rejected.iter())
            .find(|p| p.id == participant_id)
            .map(|p| p.display_name().to_string())
            .unwrap_or_else(|| participant_id.to_string())
    }
}
