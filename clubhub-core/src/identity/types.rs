//! Account types and relation-list patches.
//!
//! Accounts are persisted with the field names of the original web client
//! (`clubsLeading`, `clubsMember`, `clubsRequested`, `password`), so an
//! existing `users` blob loads unchanged.

use serde::{Deserialize, Serialize};

/// Role of an account.
///
/// The role decides which operations the surrounding UI offers; the core
/// itself only uses it for projections such as eligible club leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses clubs and submits join requests.
    #[default]
    Student,
    /// Approves or rejects requests for the clubs they lead.
    Leader,
    /// Creates clubs and assigns leaders.
    Admin,
}

impl Role {
    /// Returns the lowercase name used in stored records and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Leader => "leader",
            Self::Admin => "admin",
        }
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

/// A registered account.
///
/// The three relation lists hold club ids. A club id is never in both
/// `member` and `requested`; `leading` is assigned by admins and is
/// independent of the other two.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Stable unique id.
    pub id: String,
    /// Login name, unique and case-sensitive.
    pub username: String,
    /// Credential secret (stored as entered).
    #[serde(rename = "password")]
    pub secret: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Clubs this account leads.
    #[serde(rename = "clubsLeading", default)]
    pub leading: Vec<String>,
    /// Clubs this account is a member of.
    #[serde(rename = "clubsMember", default)]
    pub member: Vec<String>,
    /// Clubs this account has an open request for.
    #[serde(rename = "clubsRequested", default)]
    pub requested: Vec<String>,
    /// Profile picture reference (data URL or path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Theme preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl Account {
    /// Creates a student account with empty relation lists.
    #[must_use]
    pub fn new_student(
        id: impl Into<String>,
        name: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            secret: secret.into(),
            name: name.into(),
            role: Role::Student,
            leading: Vec::new(),
            member: Vec::new(),
            requested: Vec::new(),
            profile_picture: None,
            theme: None,
        }
    }

    /// Returns the relation list for `relation`.
    #[must_use]
    pub fn relation(&self, relation: Relation) -> &[String] {
        match relation {
            Relation::Leading => &self.leading,
            Relation::Member => &self.member,
            Relation::Requested => &self.requested,
        }
    }

    fn relation_mut(&mut self, relation: Relation) -> &mut Vec<String> {
        match relation {
            Relation::Leading => &mut self.leading,
            Relation::Member => &mut self.member,
            Relation::Requested => &mut self.requested,
        }
    }

    /// Returns `true` if this account is a member of `club_id`.
    #[must_use]
    pub fn is_member_of(&self, club_id: &str) -> bool {
        self.member.iter().any(|id| id == club_id)
    }

    /// Returns `true` if this account has requested to join `club_id`.
    #[must_use]
    pub fn has_requested(&self, club_id: &str) -> bool {
        self.requested.iter().any(|id| id == club_id)
    }

    /// Returns `true` if this account leads `club_id`.
    #[must_use]
    pub fn is_leading(&self, club_id: &str) -> bool {
        self.leading.iter().any(|id| id == club_id)
    }

    /// Applies one relation edit. Adding is idempotent.
    pub fn apply_edit(&mut self, edit: &RelationEdit) {
        let list = self.relation_mut(edit.relation);
        match edit.op {
            EditOp::Add => {
                if !list.contains(&edit.club_id) {
                    list.push(edit.club_id.clone());
                }
            }
            EditOp::Remove => list.retain(|id| id != &edit.club_id),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("leading", &self.leading)
            .field("member", &self.member)
            .field("requested", &self.requested)
            .field("has_profile_picture", &self.profile_picture.is_some())
            .field("theme", &self.theme)
            .finish()
    }
}

/// One of an account's club relation lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `clubsLeading`.
    Leading,
    /// `clubsMember`.
    Member,
    /// `clubsRequested`.
    Requested,
}

/// Whether an edit inserts or removes a club id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Insert the club id if absent.
    Add,
    /// Remove every occurrence of the club id.
    Remove,
}

/// A single change to one relation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdit {
    /// Target list.
    pub relation: Relation,
    /// Club id being added or removed.
    pub club_id: String,
    /// Insert or remove.
    pub op: EditOp,
}

impl RelationEdit {
    /// Creates an insertion.
    #[must_use]
    pub fn add(relation: Relation, club_id: impl Into<String>) -> Self {
        Self {
            relation,
            club_id: club_id.into(),
            op: EditOp::Add,
        }
    }

    /// Creates a removal.
    #[must_use]
    pub fn remove(relation: Relation, club_id: impl Into<String>) -> Self {
        Self {
            relation,
            club_id: club_id.into(),
            op: EditOp::Remove,
        }
    }
}

/// Relation-list edits the membership engine asks the identity store to
/// apply to one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipPatch {
    /// Account to patch.
    pub account_id: String,
    /// Edits, applied in order.
    pub edits: Vec<RelationEdit>,
}

impl MembershipPatch {
    /// Creates an empty patch for `account_id`.
    #[must_use]
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            edits: Vec::new(),
        }
    }

    /// Appends an edit.
    #[must_use]
    pub fn with_edit(mut self, edit: RelationEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Applies every edit to `account`.
    pub fn apply_to(&self, account: &mut Account) {
        for edit in &self.edits {
            account.apply_edit(edit);
        }
    }
}
