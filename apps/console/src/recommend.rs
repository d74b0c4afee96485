//! Recommendation side-channel: the AI-ranked shortlist.
//!
//! Completely independent of the review buckets — entries are persisted
//! verbatim into the local store on fetch and only ever leave it through an
//! explicit clear. Under the original key scheme the store key is fixed per
//! posting family, not per posting: fetching for one posting silently
//! overwrites what another posting saved. `scoped_keys` opts into
//! per-posting keys instead (see DESIGN.md).

use thiserror::Error;

use crate::api::participants::{ParticipantGateway, Recommendation};
use crate::api::ApiError;
use crate::models::posting::{PostingKind, PostingRef};
use crate::storage::{keys, LocalStore, StoreError};

#[derive(Debug, Error)]
pub enum RecommendError {
    /// `load_saved` found nothing under the cache key. Surfaced to the
    /// user as a notice, not logged as a failure.
    #[error("no saved recommendations")]
    NothingSaved,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// In-memory shortlist plus its persisted copy.
pub struct RecommendationPanel {
    store: LocalStore,
    scoped_keys: bool,
    entries: Vec<Recommendation>,
}

impl RecommendationPanel {
    pub fn new(store: LocalStore, scoped_keys: bool) -> Self {
        Self {
            store,
            scoped_keys,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Recommendation] {
        &self.entries
    }

    /// Calls the scoring endpoint, replaces the in-memory list and writes
    /// it to the store verbatim — no expiration stamp, no schema version.
    pub async fn fetch(
        &mut self,
        gateway: &dyn ParticipantGateway,
        posting: &PostingRef,
    ) -> Result<&[Recommendation], RecommendError> {
        let entries = gateway.recommendations(posting).await?;
        self.store.set(&self.cache_key(posting), &entries)?;
        self.entries = entries;
        Ok(&self.entries)
    }

    /// Reads the persisted shortlist back. Absence is `NothingSaved`,
    /// never an empty list.
    pub fn load_saved(&mut self, posting: &PostingRef) -> Result<&[Recommendation], RecommendError> {
        let saved: Option<Vec<Recommendation>> = self.store.get(&self.cache_key(posting))?;
        match saved {
            Some(entries) => {
                self.entries = entries;
                Ok(&self.entries)
            }
            None => Err(RecommendError::NothingSaved),
        }
    }

    /// Deletes the persisted shortlist and empties the in-memory list.
    pub fn clear_saved(&mut self, posting: &PostingRef) -> Result<(), RecommendError> {
        self.store.remove(&self.cache_key(posting))?;
        self.entries.clear();
        Ok(())
    }

    fn cache_key(&self, posting: &PostingRef) -> String {
        let base = match posting.kind {
            PostingKind::Course => keys::RECOMMENDED_COURSES,
            PostingKind::Job | PostingKind::Training => keys::RECOMMENDED_APPLICANTS,
        };
        if self.scoped_keys {
            format!("{base}:{}", posting.id)
        } else {
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::{Participant, ReviewAction};
    use async_trait::async_trait;
    use uuid::Uuid;

    /// Gateway that serves a fixed shortlist labeled with the posting id,
    /// so tests can tell whose results ended up in the cache.
    struct ScoringStub;

    #[async_trait]
    impl ParticipantGateway for ScoringStub {
        async fn list_all(&self, _: &PostingRef) -> Result<Vec<Participant>, ApiError> {
            Ok(vec![])
        }

        async fn list_accepted(&self, _: &PostingRef) -> Result<Vec<Participant>, ApiError> {
            Ok(vec![])
        }

        async fn list_rejected(&self, _: &PostingRef) -> Result<Vec<Participant>, ApiError> {
            Ok(vec![])
        }

        async fn apply_action(
            &self,
            _: &PostingRef,
            _: Uuid,
            _: ReviewAction,
        ) -> Result<(), ApiError> {
            Ok(())
        }

        async fn recommendations(
            &self,
            posting: &PostingRef,
        ) -> Result<Vec<Recommendation>, ApiError> {
            Ok(vec![Recommendation {
                title: format!("top pick for {}", posting.id),
                match_score: 92,
                justification: "strong keyword overlap".to_string(),
            }])
        }
    }

    fn panel(scoped: bool) -> (tempfile::TempDir, RecommendationPanel) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, RecommendationPanel::new(store, scoped))
    }

    fn posting(kind: PostingKind) -> PostingRef {
        PostingRef::new(kind, Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_fetch_persists_and_load_saved_round_trips() {
        let (_dir, mut panel) = panel(false);
        let t1 = posting(PostingKind::Training);

        panel.fetch(&ScoringStub, &t1).await.unwrap();
        let expected = panel.entries()[0].title.clone();

        panel.load_saved(&t1).unwrap();
        assert_eq!(panel.entries()[0].title, expected);
        assert_eq!(panel.entries()[0].match_score, 92);
    }

    #[tokio::test]
    async fn test_clear_then_load_reports_nothing_saved() {
        let (_dir, mut panel) = panel(false);
        let t1 = posting(PostingKind::Training);
        panel.fetch(&ScoringStub, &t1).await.unwrap();

        panel.clear_saved(&t1).unwrap();
        assert!(panel.entries().is_empty());

        let err = panel.load_saved(&t1).unwrap_err();
        assert!(matches!(err, RecommendError::NothingSaved));
    }

    #[tokio::test]
    async fn test_unscoped_key_leaks_across_postings() {
        // The original behavior: fetch for T1, navigate to T2, load — and
        // T1's shortlist comes back.
        let (_dir, mut panel) = panel(false);
        let t1 = posting(PostingKind::Training);
        let t2 = posting(PostingKind::Training);

        panel.fetch(&ScoringStub, &t1).await.unwrap();
        let t1_title = panel.entries()[0].title.clone();

        panel.load_saved(&t2).unwrap();
        assert_eq!(panel.entries()[0].title, t1_title);
    }

    #[tokio::test]
    async fn test_scoped_keys_isolate_postings() {
        let (_dir, mut panel) = panel(true);
        let t1 = posting(PostingKind::Training);
        let t2 = posting(PostingKind::Training);

        panel.fetch(&ScoringStub, &t1).await.unwrap();

        let err = panel.load_saved(&t2).unwrap_err();
        assert!(matches!(err, RecommendError::NothingSaved));

        // T1's own copy is still there.
        panel.load_saved(&t1).unwrap();
        assert_eq!(panel.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_course_and_job_shortlists_use_separate_keys() {
        let (_dir, mut panel) = panel(false);
        let job = posting(PostingKind::Job);
        let course = posting(PostingKind::Course);

        panel.fetch(&ScoringStub, &job).await.unwrap();

        // Courses persist under `recommendedCourses`; the job fetch must
        // not satisfy a course load.
        let err = panel.load_saved(&course).unwrap_err();
        assert!(matches!(err, RecommendError::NothingSaved));
    }

    #[tokio::test]
    async fn test_fetch_replaces_in_memory_list_wholesale() {
        let (_dir, mut panel) = panel(false);
        let t1 = posting(PostingKind::Training);
        let t2 = posting(PostingKind::Training);

        panel.fetch(&ScoringStub, &t1).await.unwrap();
        panel.fetch(&ScoringStub, &t2).await.unwrap();

        assert_eq!(panel.entries().len(), 1);
        assert!(panel.entries()[0].title.contains(&t2.id.to_string()));
    }
}
