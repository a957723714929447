//! Error types for club and join-request operations.

use thiserror::Error;

use super::types::RequestStatus;
use crate::store::StoreError;

/// Why a join request could not be submitted.
///
/// Variants are listed in the order they are checked.
#[derive(Error, Debug)]
pub enum JoinError {
    /// No active session.
    #[error("You must be logged in to join a club")]
    NotAuthenticated,

    /// The requester is already a member of the club.
    #[error("You are already a member of this club")]
    AlreadyMember,

    /// The requester already has a pending request for the club.
    #[error("You already have a pending request to join this club")]
    AlreadyRequested,

    /// No club with the given id.
    #[error("Club not found")]
    ClubNotFound,

    /// The club has no free member slots.
    #[error("This club is at capacity")]
    ClubAtCapacity,

    /// Underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error type for club administration and request resolution.
#[derive(Error, Debug)]
pub enum MembershipError {
    /// No club with the given id.
    #[error("Club not found: {0}")]
    ClubNotFound(String),

    /// The leader id names no account.
    #[error("Leader account not found: {0}")]
    LeaderNotFound(String),

    /// A request was asked to leave a terminal status.
    #[error("Invalid request transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: RequestStatus,
        /// Requested status.
        to: RequestStatus,
    },

    /// Underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for membership operations.
pub type Result<T> = std::result::Result<T, MembershipError>;
