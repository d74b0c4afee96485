#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three posting families the marketplace serves. The URL scheme is
/// uneven on purpose: the server mounts courses under the singular
/// `/course`, jobs under `/jobs` and trainings under `/trainings`, and job
/// applicants are `applicants` while the other two call them
/// `participants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PostingKind {
    Job,
    Course,
    Training,
}

impl PostingKind {
    /// First path segment for this posting family.
    pub fn collection_segment(&self) -> &'static str {
        match self {
            PostingKind::Job => "jobs",
            PostingKind::Course => "course",
            PostingKind::Training => "trainings",
        }
    }

    /// Path segment naming the people attached to a posting.
    pub fn people_segment(&self) -> &'static str {
        match self {
            PostingKind::Job => "applicants",
            PostingKind::Course | PostingKind::Training => "participants",
        }
    }

    /// Human label used in prompts and rendered tables.
    pub fn label(&self) -> &'static str {
        match self {
            PostingKind::Job => "job",
            PostingKind::Course => "course",
            PostingKind::Training => "training",
        }
    }
}

impl std::fmt::Display for PostingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one posting across the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingRef {
    pub kind: PostingKind,
    pub id: Uuid,
}

impl PostingRef {
    pub fn new(kind: PostingKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

impl std::fmt::Display for PostingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A job/course/training posting as the server returns it. The families
/// share one shape; family-specific attributes (salary, schedule, capacity)
/// ride in `details` untyped, the same way they are stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or replacing a posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
}
