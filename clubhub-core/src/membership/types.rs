//! Club and join-request types.
//!
//! Clubs and requests are persisted as JSON arrays under the `clubs` and
//! `requests` keys, using the original client's camelCase field names.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a join request.
///
/// `Pending` is the only open state. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a leader decision.
    Pending,
    /// Requester became a member.
    Approved,
    /// Request was declined, by a leader or by capacity.
    Rejected,
}

impl RequestStatus {
    /// Returns the lowercase name used in stored records and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` for approved and rejected.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns whether a request in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capacity-bounded club with one leader.
///
/// `members` and `pending_requests` hold account ids, have set semantics
/// and never overlap. `member_count` always equals `members.len()` and never
/// exceeds `capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    /// Unique id.
    pub id: String,
    /// Display name (not unique).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Maximum number of members.
    pub capacity: NonZeroU32,
    /// Number of members.
    pub member_count: u32,
    /// Account id of the leader.
    pub leader_id: String,
    /// Member account ids.
    #[serde(default)]
    pub members: Vec<String>,
    /// Account ids with an open request.
    #[serde(default)]
    pub pending_requests: Vec<String>,
}

impl Club {
    /// Returns `true` once `member_count` has reached `capacity`.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.member_count >= self.capacity.get()
    }

    /// Returns the number of open member slots.
    #[must_use]
    pub const fn remaining_slots(&self) -> u32 {
        self.capacity.get().saturating_sub(self.member_count)
    }

    /// Returns `true` if `account_id` is a member.
    #[must_use]
    pub fn has_member(&self, account_id: &str) -> bool {
        self.members.iter().any(|id| id == account_id)
    }

    /// Returns `true` if `account_id` has an open request.
    #[must_use]
    pub fn has_pending(&self, account_id: &str) -> bool {
        self.pending_requests.iter().any(|id| id == account_id)
    }

    /// Checks the roster invariants: count matches, count within capacity,
    /// members and pending requests disjoint.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let count_matches = usize::try_from(self.member_count)
            .is_ok_and(|count| count == self.members.len());
        let disjoint = !self.members.iter().any(|id| self.has_pending(id));
        count_matches && self.member_count <= self.capacity.get() && disjoint
    }
}

/// A student's application to join a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique id.
    pub id: String,
    /// Requester account id.
    pub user_id: String,
    /// Target club id.
    pub club_id: String,
    /// Current status.
    pub status: RequestStatus,
    /// Creation time, Unix milliseconds.
    pub timestamp: i64,
}

impl Request {
    /// Returns `true` while the request awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Parameters for creating a club.
#[derive(Debug, Clone)]
pub struct NewClub {
    /// Club name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Maximum number of members.
    pub capacity: NonZeroU32,
    /// Account id of the leader.
    pub leader_id: String,
}

impl NewClub {
    /// Creates club parameters with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: NonZeroU32, leader_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            capacity,
            leader_id: leader_id.into(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Administrative edits to a club. `None` fields are left unchanged.
///
/// Roster fields (`members`, `memberCount`, `pendingRequests`) are not
/// patchable; they only change through request transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClubPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New capacity. Not checked against the current member count.
    pub capacity: Option<NonZeroU32>,
    /// New leader account id.
    pub leader_id: Option<String>,
}

impl ClubPatch {
    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: NonZeroU32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the leader.
    #[must_use]
    pub fn leader_id(mut self, leader_id: impl Into<String>) -> Self {
        self.leader_id = Some(leader_id.into());
        self
    }

    /// Shallow-merges the set fields into `club`.
    pub fn merge_into(self, club: &mut Club) {
        if let Some(name) = self.name {
            club.name = name;
        }
        if let Some(description) = self.description {
            club.description = description;
        }
        if let Some(capacity) = self.capacity {
            club.capacity = capacity;
        }
        if let Some(leader_id) = self.leader_id {
            club.leader_id = leader_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn sample_club() -> Club {
        Club {
            id: "club_1".to_string(),
            name: "Chess".to_string(),
            description: "Weekly games".to_string(),
            capacity: capacity(2),
            member_count: 1,
            leader_id: "leader_1".to_string(),
            members: vec!["student_1".to_string()],
            pending_requests: vec!["student_2".to_string()],
        }
    }

    #[test]
    fn request_status_as_str_matches_serialized_name() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            let encoded = serde_json::to_string(&status).unwrap();
            assert_eq!(encoded, format!("\"{}\"", status.as_str()));
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn only_pending_can_transition() {
        use RequestStatus::{Approved, Pending, Rejected};

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Rejected.can_transition_to(Pending));
        assert!(Approved.is_terminal() && Rejected.is_terminal());
        assert!(!Pending.is_terminal());
    }

    #[test]
    fn club_capacity_helpers() {
        let mut club = sample_club();
        assert!(!club.is_full());
        assert_eq!(club.remaining_slots(), 1);

        club.member_count = 2;
        club.members.push("student_3".to_string());
        assert!(club.is_full());
        assert_eq!(club.remaining_slots(), 0);
    }

    #[test]
    fn club_consistency_checks() {
        let club = sample_club();
        assert!(club.is_consistent());

        let mut miscounted = sample_club();
        miscounted.member_count = 2;
        assert!(!miscounted.is_consistent());

        let mut overlapping = sample_club();
        overlapping.pending_requests.push("student_1".to_string());
        assert!(!overlapping.is_consistent());
    }

    #[test]
    fn club_serializes_with_client_field_names() {
        let json = serde_json::to_value(sample_club()).unwrap();
        assert_eq!(json["memberCount"], 1);
        assert_eq!(json["leaderId"], "leader_1");
        assert_eq!(json["pendingRequests"][0], "student_2");
        assert_eq!(json["capacity"], 2);
    }

    #[test]
    fn club_with_zero_capacity_is_rejected() {
        let raw = r#"{"id":"c","name":"n","description":"d","capacity":0,
                      "memberCount":0,"leaderId":"l","members":[],"pendingRequests":[]}"#;
        assert!(serde_json::from_str::<Club>(raw).is_err());
    }

    #[test]
    fn request_parses_client_record() {
        let raw = r#"{"id":"req_1","userId":"s1","clubId":"c1","status":"pending","timestamp":1700000000000}"#;
        let request: Request = serde_json::from_str(raw).unwrap();
        assert!(request.is_pending());
        assert_eq!(request.club_id, "c1");
        assert_eq!(request.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn new_club_builder() {
        let new_club = NewClub::new("Robotics", capacity(10), "leader_1")
            .with_description("Build robots");
        assert_eq!(new_club.name, "Robotics");
        assert_eq!(new_club.description, "Build robots");
        assert_eq!(new_club.capacity.get(), 10);
    }

    #[test]
    fn club_patch_merges_only_set_fields() {
        let mut club = sample_club();
        ClubPatch::default()
            .name("Chess & Go")
            .capacity(capacity(30))
            .merge_into(&mut club);

        assert_eq!(club.name, "Chess & Go");
        assert_eq!(club.capacity.get(), 30);
        assert_eq!(club.description, "Weekly games");
        assert_eq!(club.leader_id, "leader_1");
        assert_eq!(club.members, vec!["student_1".to_string()]);
    }

    #[test]
    fn club_patch_parses_partial_json() {
        let patch: ClubPatch = serde_json::from_str(r#"{"description":"New"}"#).unwrap();
        assert_eq!(patch, ClubPatch::default().description("New"));
    }
}
