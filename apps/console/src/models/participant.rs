#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

/// One applicant (jobs) or participant (courses, trainings) attached to a
/// posting. Identity is the opaque `id`; the embedded user record is for
/// display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Label used when naming the participant in a confirmation prompt.
    pub fn display_name(&self) -> &str {
        &self.user.name
    }
}

/// Review status of a participant. The client never reads this off a single
/// field: it is inferred by set membership across the three fetched
/// listings (see `review::partition`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Accepted => "accepted",
            ReviewStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// The three review mutations a posting owner can issue. The server owns
/// the state machine; the client will issue any action regardless of the
/// bucket a participant is currently displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Accept,
    Reject,
    SetPending,
}

impl ReviewAction {
    /// Final path segment of the PUT endpoint for this action.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ReviewAction::Accept => "accept",
            ReviewAction::Reject => "reject",
            ReviewAction::SetPending => "pending",
        }
    }

    /// Verb shown in the confirmation prompt.
    pub fn verb(&self) -> &'static str {
        match self {
            ReviewAction::Accept => "accept",
            ReviewAction::Reject => "reject",
            ReviewAction::SetPending => "move back to pending",
        }
    }

    /// Status the server assigns once the action lands. Every status is
    /// reachable from every other; there is no terminal state.
    pub fn target_status(&self) -> ReviewStatus {
        match self {
            ReviewAction::Accept => ReviewStatus::Accepted,
            ReviewAction::Reject => ReviewStatus::Rejected,
            ReviewAction::SetPending => ReviewStatus::Pending,
        }
    }
}

impl std::fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [ReviewStatus; 3] = [
        ReviewStatus::Pending,
        ReviewStatus::Accepted,
        ReviewStatus::Rejected,
    ];

    const ALL_ACTIONS: [ReviewAction; 3] = [
        ReviewAction::Accept,
        ReviewAction::Reject,
        ReviewAction::SetPending,
    ];

    #[test]
    fn test_every_status_reachable_from_every_other() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                if from == to {
                    continue;
                }
                assert!(
                    ALL_ACTIONS.iter().any(|a| a.target_status() == to),
                    "no action reaches {to} from {from}"
                );
            }
        }
    }

    #[test]
    fn test_action_path_segments() {
        assert_eq!(ReviewAction::Accept.path_segment(), "accept");
        assert_eq!(ReviewAction::Reject.path_segment(), "reject");
        assert_eq!(ReviewAction::SetPending.path_segment(), "pending");
    }

    #[test]
    fn test_status_deserializes_lowercase() {
        let s: ReviewStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(s, ReviewStatus::Accepted);
    }
}
