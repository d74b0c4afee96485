//! Three-way bucket partition. Pending is never fetched: it is derived as
//! `all − (accepted ∪ rejected)` by id, recomputed from the source lists on
//! every call so a fetch cycle can never leave a stale pending bucket
//! behind.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::participant::Participant;

/// The three listings exactly as the server returned them, in server
/// order. `Default` is the all-empty snapshot a board starts from.
#[derive(Debug, Clone, Default)]
pub struct ListingSnapshot {
    pub all: Vec<Participant>,
    pub accepted: Vec<Participant>,
    pub rejected: Vec<Participant>,
}

/// The derived display partition.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub pending: Vec<Participant>,
    pub accepted: Vec<Participant>,
    pub rejected: Vec<Participant>,
}

/// Computes the display buckets from a snapshot.
///
/// The accepted and rejected buckets are the fetched lists verbatim. The
/// client trusts the server to keep the sets disjoint: an id the server
/// reports in both lists is rendered in both buckets, and an id present in
/// accepted/rejected but missing from `all` shows up only in its reviewed
/// bucket. Neither case is reconciled here.
pub fn partition(snapshot: &ListingSnapshot) -> Buckets {
    let reviewed: HashSet<Uuid> = snapshot
        .accepted
        .iter()
        .chain(snapshot.rejected.iter())
        .map(|p| p.id)
        .collect();

    let pending = snapshot
        .all
        .iter()
        .filter(|p| !reviewed.contains(&p.id))
        .cloned()
        .collect();

    Buckets {
        pending,
        accepted: snapshot.accepted.clone(),
        rejected: snapshot.rejected.clone(),
    }
}
