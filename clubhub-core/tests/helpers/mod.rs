//! Reusable test helpers for ClubHub integration tests.
//!
//! Every test builds its own [`ClubHub`], either in memory or on a unique
//! on-disk directory, so tests never share state.

#![allow(dead_code)]

use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use clubhub_core::identity::{Account, Role};
use clubhub_core::membership::{Club, NewClub};
use clubhub_core::ClubHub;

/// Atomic counter for unique test directory names.
static HELPER_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Creates a unique temporary directory for test isolation.
///
/// Each call produces a distinct path by combining the prefix, process ID,
/// and an atomic counter.
pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let id = HELPER_COUNTER.fetch_add(1, Ordering::SeqCst);
    env::temp_dir().join(format!(
        "clubhub_test_{}_{}_{}",
        prefix,
        std::process::id(),
        id
    ))
}

/// Removes a temporary test directory. Ignores errors silently.
pub fn cleanup_dir(dir: &PathBuf) {
    let _ = std::fs::remove_dir_all(dir);
}

/// Shorthand for a non-zero capacity in tests.
pub fn capacity(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

/// An empty in-memory instance.
pub fn empty_hub() -> ClubHub {
    ClubHub::in_memory(false).unwrap()
}

/// An in-memory instance loaded with the fixture data.
pub fn seeded_hub() -> ClubHub {
    ClubHub::in_memory(true).unwrap()
}

/// Registers a student whose username and password are both `username`.
pub fn register_student(hub: &ClubHub, username: &str) -> Account {
    hub.identity()
        .register(&format!("Student {username}"), username, username)
        .unwrap()
}

/// Registers a leader account and returns it.
///
/// Accounts register as students; the role is then raised through a
/// profile update the way an admin tool would.
pub fn register_leader(hub: &ClubHub, username: &str) -> Account {
    let mut account = register_student(hub, username);
    account.role = Role::Leader;
    hub.identity().update_profile(account).unwrap()
}

/// Logs in as `username`, whose password equals the username.
pub fn login(hub: &ClubHub, username: &str) -> Account {
    hub.identity().authenticate(username, username).unwrap()
}

/// Creates a club with the given capacity led by `leader`.
pub fn create_club(hub: &ClubHub, name: &str, cap: u32, leader: &Account) -> Club {
    hub.membership()
        .create_club(NewClub::new(name, capacity(cap), &leader.id))
        .unwrap()
}

/// Re-reads an account from the store.
pub fn reload_account(hub: &ClubHub, account_id: &str) -> Account {
    hub.identity().account_by_id(account_id).unwrap().unwrap()
}

/// Re-reads a club from the store.
pub fn reload_club(hub: &ClubHub, club_id: &str) -> Club {
    hub.membership().club_by_id(club_id).unwrap().unwrap()
}
