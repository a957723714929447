//! ClubHub Core Library
//!
//! Core functionality for ClubHub - student club membership management.
//! Students request to join clubs, leaders approve or reject requests and
//! admins create clubs and assign leaders. All state lives in a local
//! key-value store; there is no server.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod config;
pub mod identity;
mod ids;
pub mod membership;
pub mod seed;
pub mod store;

pub use api::ClubHub;
pub use config::ClubHubConfig;
