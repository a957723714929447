//! Clubs and the join-request workflow.
//!
//! # Architecture
//!
//! ```text
//! MembershipEngine (high-level API)
//!     ├── transition table (status changes + roster/account edits)
//!     ├── IdentityStore (account patches, session lookup)
//!     └── KeyValueStore (clubs, requests)
//! ```
//!
//! # Request lifecycle
//!
//! A request is created `pending` and moves once, to `approved` or
//! `rejected`. Approving into a full club rejects the request instead, so
//! when several pending requests compete for the last slot the first
//! approval wins.
//!
//! # Types
//!
//! - [`Club`]: a capacity-bounded group with one leader
//! - [`Request`]: a student's application to join a club
//! - [`NewClub`] / [`ClubPatch`]: club creation and edit parameters

mod engine;
mod error;
mod queries;
mod transition;
pub mod types;

pub use engine::MembershipEngine;
pub use error::{JoinError, MembershipError, Result};
pub use types::{Club, ClubPatch, NewClub, Request, RequestStatus};
