//! Club registry and the join/approve/reject workflow.
//!
//! [`MembershipEngine`] is the only writer of the `clubs` and `requests`
//! keys. Each operation reads the current collections, computes the new
//! ones, and commits them together with the identity store's account
//! patches in a single [`WriteBatch`].

use std::sync::Arc;

use super::error::{JoinError, MembershipError, Result};
use super::transition;
use super::types::{Club, ClubPatch, NewClub, Request, RequestStatus};
use crate::identity::{IdentityStore, MembershipPatch, Relation, RelationEdit};
use crate::ids;
use crate::store::{read_collection, KeyValueStore, WriteBatch, CLUBS_KEY, REQUESTS_KEY};

/// Clubs, join requests and the transitions between them.
///
/// # Example
///
/// ```
/// use std::num::NonZeroU32;
/// use std::sync::Arc;
/// use clubhub_core::identity::IdentityStore;
/// use clubhub_core::membership::{MembershipEngine, NewClub, RequestStatus};
/// use clubhub_core::store::{KeyValueStore, MemoryStore};
///
/// let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
/// let identity = IdentityStore::new(store.clone());
/// let engine = MembershipEngine::new(store, identity.clone());
///
/// let leader = identity.register("Lee", "lee", "pw").unwrap();
/// let club = engine
///     .create_club(NewClub::new("Chess", NonZeroU32::new(10).unwrap(), &leader.id))
///     .unwrap();
///
/// identity.register("Alice", "alice", "pw").unwrap();
/// identity.authenticate("alice", "pw").unwrap();
/// let request = engine.submit_join_request(&club.id).unwrap();
///
/// let approved = engine.approve_request(&request.id).unwrap().unwrap();
/// assert_eq!(approved.status, RequestStatus::Approved);
/// ```
#[derive(Clone)]
pub struct MembershipEngine {
    store: Arc<dyn KeyValueStore>,
    identity: IdentityStore,
}

impl MembershipEngine {
    /// Creates an engine over the given store and identity service.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, identity: IdentityStore) -> Self {
        Self { store, identity }
    }

    // ==================== Join Requests ====================

    /// Submits a join request from the session account.
    ///
    /// Checks, in order: a session exists, the requester is not already a
    /// member, has no open request, the club exists, the club is not full.
    /// Capacity is compared with the current member count only, so a club
    /// may collect more pending requests than it has free slots; approval
    /// settles the difference.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`JoinError`], or a store error.
    pub fn submit_join_request(&self, club_id: &str) -> std::result::Result<Request, JoinError> {
        let Some(account) = self.identity.session_account()? else {
            return Err(JoinError::NotAuthenticated);
        };

        let mut clubs = self.load_clubs()?;
        let mut requests = self.load_requests()?;
        let club = clubs.iter_mut().find(|c| c.id == club_id);

        if account.is_member_of(club_id) || club.as_ref().is_some_and(|c| c.has_member(&account.id))
        {
            return Err(JoinError::AlreadyMember);
        }

        let open_request = requests
            .iter()
            .any(|r| r.is_pending() && r.user_id == account.id && r.club_id == club_id);
        if account.has_requested(club_id) || open_request {
            return Err(JoinError::AlreadyRequested);
        }

        let Some(club) = club else {
            return Err(JoinError::ClubNotFound);
        };

        if club.is_full() {
            tracing::debug!(club_id, account_id = %account.id, "join refused: club at capacity");
            return Err(JoinError::ClubAtCapacity);
        }

        let id = ids::generate(ids::REQUEST_PREFIX, |candidate| {
            requests.iter().any(|r| r.id == candidate)
        });
        let mut request = Request {
            id,
            user_id: account.id.clone(),
            club_id: club_id.to_string(),
            status: RequestStatus::Pending,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        let patch = transition::apply(Some(club), &mut request, RequestStatus::Pending)
            .map_err(|_| JoinError::AlreadyRequested)?;
        requests.push(request.clone());

        self.commit(&clubs, Some(requests.as_slice()), &[patch])?;

        tracing::info!(
            request_id = %request.id,
            club_id,
            account_id = %request.user_id,
            "join request submitted"
        );
        Ok(request)
    }

    /// Approves a pending request.
    ///
    /// If the club filled up since the request was made, the request is
    /// rejected instead. Missing or already-resolved requests, and requests
    /// whose club no longer exists, are ignored.
    ///
    /// # Returns
    ///
    /// The request in its new status, or `None` if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn approve_request(&self, request_id: &str) -> Result<Option<Request>> {
        self.resolve(request_id, RequestStatus::Approved)
    }

    /// Rejects a pending request.
    ///
    /// Missing or already-resolved requests are ignored. If the club has
    /// been removed, the request and the requester's lists are still
    /// updated.
    ///
    /// # Returns
    ///
    /// The rejected request, or `None` if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn reject_request(&self, request_id: &str) -> Result<Option<Request>> {
        self.resolve(request_id, RequestStatus::Rejected)
    }

    fn resolve(&self, request_id: &str, target: RequestStatus) -> Result<Option<Request>> {
        let mut requests = self.load_requests()?;
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == request_id && r.is_pending())
        else {
            tracing::debug!(request_id, target = %target, "ignoring missing or resolved request");
            return Ok(None);
        };

        let mut clubs = self.load_clubs()?;
        let club = clubs.iter_mut().find(|c| c.id == request.club_id);

        let target = match (target, club.as_deref()) {
            (RequestStatus::Approved, None) => {
                tracing::debug!(
                    request_id,
                    club_id = %request.club_id,
                    "ignoring approval for missing club"
                );
                return Ok(None);
            }
            (RequestStatus::Approved, Some(club)) if club.is_full() => {
                tracing::warn!(
                    request_id,
                    club_id = %club.id,
                    "club at capacity, rejecting instead of approving"
                );
                RequestStatus::Rejected
            }
            _ => target,
        };

        let patch = transition::apply(club, request, target)?;
        let resolved = request.clone();

        self.commit(&clubs, Some(requests.as_slice()), &[patch])?;

        tracing::info!(
            request_id,
            club_id = %resolved.club_id,
            account_id = %resolved.user_id,
            status = %resolved.status,
            "join request resolved"
        );
        Ok(Some(resolved))
    }

    // ==================== Club Administration ====================

    /// Creates a club led by `new_club.leader_id`.
    ///
    /// The club starts with no members and no pending requests, and its id
    /// is added to the leader's `leading` list. Names need not be unique.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::LeaderNotFound`] if the leader id names
    /// no account, or a store error.
    pub fn create_club(&self, new_club: NewClub) -> Result<Club> {
        if self.identity.find_account(&new_club.leader_id)?.is_none() {
            return Err(MembershipError::LeaderNotFound(new_club.leader_id));
        }

        let mut clubs = self.load_clubs()?;
        let id = ids::generate(ids::CLUB_PREFIX, |candidate| {
            clubs.iter().any(|c| c.id == candidate)
        });
        let club = Club {
            id,
            name: new_club.name,
            description: new_club.description,
            capacity: new_club.capacity,
            member_count: 0,
            leader_id: new_club.leader_id,
            members: Vec::new(),
            pending_requests: Vec::new(),
        };
        clubs.push(club.clone());

        let patch = MembershipPatch::new(club.leader_id.clone())
            .with_edit(RelationEdit::add(Relation::Leading, club.id.clone()));
        self.commit(&clubs, None, &[patch])?;

        tracing::info!(club_id = %club.id, leader_id = %club.leader_id, "club created");
        Ok(club)
    }

    /// Shallow-merges `patch` into an existing club.
    ///
    /// The new capacity is not checked against the member count and a new
    /// leader id does not touch anyone's `leading` list.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::ClubNotFound`] for an unknown id, or a
    /// store error.
    pub fn update_club(&self, club_id: &str, patch: ClubPatch) -> Result<Club> {
        let mut clubs = self.load_clubs()?;
        let club = clubs
            .iter_mut()
            .find(|c| c.id == club_id)
            .ok_or_else(|| MembershipError::ClubNotFound(club_id.to_string()))?;

        patch.merge_into(club);
        let updated = club.clone();

        self.commit(&clubs, None, &[])?;

        tracing::info!(club_id, "club updated");
        Ok(updated)
    }

    // ==================== Persistence ====================

    pub(super) fn load_clubs(&self) -> crate::store::Result<Vec<Club>> {
        read_collection(self.store.as_ref(), CLUBS_KEY)
    }

    pub(super) fn load_requests(&self) -> crate::store::Result<Vec<Request>> {
        read_collection(self.store.as_ref(), REQUESTS_KEY)
    }

    pub(super) const fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    fn commit(
        &self,
        clubs: &[Club],
        requests: Option<&[Request]>,
        patches: &[MembershipPatch],
    ) -> crate::store::Result<()> {
        let mut batch = WriteBatch::new();
        batch.put_json(CLUBS_KEY, clubs)?;
        if let Some(requests) = requests {
            batch.put_json(REQUESTS_KEY, requests)?;
        }
        self.identity.stage_patches(&mut batch, patches)?;
        self.store.apply(&batch)
    }
}

impl std::fmt::Debug for MembershipEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipEngine").finish_non_exhaustive()
    }
}
