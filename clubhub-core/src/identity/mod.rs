//! Accounts, credentials and the current session.
//!
//! # Types
//!
//! - [`Account`]: a registered user with role and club relation lists
//! - [`Role`]: student, leader or admin
//! - [`MembershipPatch`]: relation-list edits requested by the membership engine

mod error;
mod store;
pub mod types;

pub use error::{IdentityError, Result};
pub use store::IdentityStore;
pub use types::{Account, EditOp, MembershipPatch, Relation, RelationEdit, Role, Theme};
