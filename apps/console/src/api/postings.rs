//! Posting CRUD, shared across the three posting families. The family only
//! changes the collection segment (`/jobs`, `/course`, `/trainings`).

use crate::api::{ApiClient, ApiError};
use crate::models::posting::{Posting, PostingDraft, PostingKind, PostingRef};

fn collection_path(kind: PostingKind) -> String {
    format!("/{}", kind.collection_segment())
}

fn item_path(posting: &PostingRef) -> String {
    format!("/{}/{}", posting.kind.collection_segment(), posting.id)
}

impl ApiClient {
    pub async fn list_postings(&self, kind: PostingKind) -> Result<Vec<Posting>, ApiError> {
        self.get(&collection_path(kind)).await
    }

    pub async fn get_posting(&self, posting: &PostingRef) -> Result<Posting, ApiError> {
        self.get(&item_path(posting)).await
    }

    pub async fn create_posting(
        &self,
        kind: PostingKind,
        draft: &PostingDraft,
    ) -> Result<Posting, ApiError> {
        self.post(&collection_path(kind), draft).await
    }

    pub async fn update_posting(
        &self,
        posting: &PostingRef,
        draft: &PostingDraft,
    ) -> Result<Posting, ApiError> {
        self.put(&item_path(posting), draft).await
    }

    pub async fn delete_posting(&self, posting: &PostingRef) -> Result<(), ApiError> {
        self.delete(&item_path(posting)).await
    }
}
