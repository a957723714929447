//! Read-only projections over clubs, requests and accounts.
//!
//! Nothing here is cached; every call re-reads the store.

use super::engine::MembershipEngine;
use super::error::Result;
use super::types::{Club, Request};
use crate::identity::Account;

impl MembershipEngine {
    /// Returns every club.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn clubs(&self) -> Result<Vec<Club>> {
        Ok(self.load_clubs()?)
    }

    /// Returns every request, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn requests(&self) -> Result<Vec<Request>> {
        Ok(self.load_requests()?)
    }

    /// Looks up a club by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn club_by_id(&self, club_id: &str) -> Result<Option<Club>> {
        Ok(self.load_clubs()?.into_iter().find(|c| c.id == club_id))
    }

    /// Returns the pending requests for a club, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn requests_for_club(&self, club_id: &str) -> Result<Vec<Request>> {
        Ok(self
            .load_requests()?
            .into_iter()
            .filter(|r| r.club_id == club_id && r.is_pending())
            .collect())
    }

    /// Returns all requests made by an account, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn requests_for_user(&self, user_id: &str) -> Result<Vec<Request>> {
        Ok(self
            .load_requests()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    /// Returns the session account's requests, or nothing without a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn requests_for_current_user(&self) -> Result<Vec<Request>> {
        match self.identity().session_account()? {
            Some(account) => self.requests_for_user(&account.id),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves a club's members to their account records.
    ///
    /// Members are returned in the order they joined. Ids with no matching
    /// account are skipped and an unknown club yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn members_of_club(&self, club_id: &str) -> Result<Vec<Account>> {
        let Some(club) = self.club_by_id(club_id)? else {
            return Ok(Vec::new());
        };
        let accounts = self.identity().load_accounts()?;

        Ok(club
            .members
            .iter()
            .filter_map(|member_id| accounts.iter().find(|a| &a.id == member_id).cloned())
            .collect())
    }

    /// Returns the clubs whose leader is `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn clubs_led_by(&self, user_id: &str) -> Result<Vec<Club>> {
        Ok(self
            .load_clubs()?
            .into_iter()
            .filter(|c| c.leader_id == user_id)
            .collect())
    }

    /// Returns the clubs `user_id` is a member of.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn clubs_joined_by(&self, user_id: &str) -> Result<Vec<Club>> {
        Ok(self
            .load_clubs()?
            .into_iter()
            .filter(|c| c.has_member(user_id))
            .collect())
    }
}
