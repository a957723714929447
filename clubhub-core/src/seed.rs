//! First-run fixture data.
//!
//! A fresh store is populated with a small organization: one admin, two
//! leaders, three students, three clubs and a handful of requests. The
//! fixture is consistent: every relation list agrees with the club rosters
//! and the request statuses.

use std::num::NonZeroU32;

use crate::identity::{Account, Role};
use crate::membership::{Club, Request, RequestStatus};
use crate::store::{KeyValueStore, WriteBatch, CLUBS_KEY, REQUESTS_KEY, USERS_KEY};

const CHESS_CAPACITY: NonZeroU32 = match NonZeroU32::new(20) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

const ROBOTICS_CAPACITY: NonZeroU32 = match NonZeroU32::new(15) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

const DRAMA_CAPACITY: NonZeroU32 = match NonZeroU32::new(2) {
    Some(capacity) => capacity,
    None => panic!("capacity must be non-zero"),
};

/// 2024-01-15T12:00:00Z in Unix milliseconds.
const SEED_EPOCH_MS: i64 = 1_705_320_000_000;

/// Which collections a seeding pass wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// `users` was absent and got the fixture accounts.
    pub users: bool,
    /// `clubs` was absent and got the fixture clubs.
    pub clubs: bool,
    /// `requests` was absent and got the fixture requests.
    pub requests: bool,
}

impl SeedReport {
    /// Returns `true` if anything was written.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.users || self.clubs || self.requests
    }
}

/// Writes the fixture into each of `users`, `clubs` and `requests` that is
/// absent. Present keys are left alone, even if empty.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn seed_if_empty(store: &dyn KeyValueStore) -> crate::store::Result<SeedReport> {
    let report = SeedReport {
        users: !store.contains(USERS_KEY)?,
        clubs: !store.contains(CLUBS_KEY)?,
        requests: !store.contains(REQUESTS_KEY)?,
    };

    if !report.any() {
        tracing::debug!("store already populated, skipping seed");
        return Ok(report);
    }

    let mut batch = WriteBatch::new();
    if report.users {
        batch.put_json(USERS_KEY, &accounts())?;
    }
    if report.clubs {
        batch.put_json(CLUBS_KEY, &clubs())?;
    }
    if report.requests {
        batch.put_json(REQUESTS_KEY, &requests())?;
    }
    store.apply(&batch)?;

    tracing::info!(
        users = report.users,
        clubs = report.clubs,
        requests = report.requests,
        "seeded initial data"
    );
    Ok(report)
}

fn account(id: &str, username: &str, secret: &str, name: &str, role: Role) -> Account {
    Account {
        role,
        ..Account::new_student(id, name, username, secret)
    }
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Fixture accounts.
#[must_use]
pub fn accounts() -> Vec<Account> {
    vec![
        account("admin_1", "admin", "admin123", "Alex Morgan", Role::Admin),
        Account {
            leading: ids(&["club_1"]),
            ..account("leader_1", "chessleader", "leader123", "Morgan Lee", Role::Leader)
        },
        Account {
            leading: ids(&["club_2", "club_3"]),
            ..account("leader_2", "robotics", "leader123", "Sam Rivera", Role::Leader)
        },
        Account {
            member: ids(&["club_1"]),
            requested: ids(&["club_2"]),
            ..account("student_1", "student1", "student123", "Jamie Chen", Role::Student)
        },
        Account {
            requested: ids(&["club_1"]),
            ..account("student_2", "student2", "student123", "Taylor Brooks", Role::Student)
        },
        Account {
            member: ids(&["club_3"]),
            ..account("student_3", "student3", "student123", "Riley Patel", Role::Student)
        },
    ]
}

/// Fixture clubs.
#[must_use]
pub fn clubs() -> Vec<Club> {
    vec![
        Club {
            id: "club_1".to_string(),
            name: "Chess Club".to_string(),
            description: "Weekly casual games, puzzles and tournament prep.".to_string(),
            capacity: CHESS_CAPACITY,
            member_count: 1,
            leader_id: "leader_1".to_string(),
            members: ids(&["student_1"]),
            pending_requests: ids(&["student_2"]),
        },
        Club {
            id: "club_2".to_string(),
            name: "Robotics Team".to_string(),
            description: "Design, build and program robots for regional competitions."
                .to_string(),
            capacity: ROBOTICS_CAPACITY,
            member_count: 0,
            leader_id: "leader_2".to_string(),
            members: Vec::new(),
            pending_requests: ids(&["student_1"]),
        },
        Club {
            id: "club_3".to_string(),
            name: "Drama Society".to_string(),
            description: "Small ensemble staging one production per term.".to_string(),
            capacity: DRAMA_CAPACITY,
            member_count: 1,
            leader_id: "leader_2".to_string(),
            members: ids(&["student_3"]),
            pending_requests: Vec::new(),
        },
    ]
}

/// Fixture requests.
#[must_use]
pub fn requests() -> Vec<Request> {
    let request = |id: &str, user_id: &str, club_id: &str, status, offset_ms: i64| Request {
        id: id.to_string(),
        user_id: user_id.to_string(),
        club_id: club_id.to_string(),
        status,
        timestamp: SEED_EPOCH_MS + offset_ms,
    };

    vec![
        request("req_1", "student_1", "club_1", RequestStatus::Approved, 0),
        request("req_2", "student_3", "club_3", RequestStatus::Approved, 60_000),
        request("req_3", "student_2", "club_1", RequestStatus::Pending, 120_000),
        request("req_4", "student_1", "club_2", RequestStatus::Pending, 180_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{read_collection, MemoryStore};

    #[test]
    fn fixture_clubs_are_consistent() {
        for club in clubs() {
            assert!(club.is_consistent(), "{} is inconsistent", club.id);
        }
    }

    #[test]
    fn fixture_relations_match_rosters() {
        let accounts = accounts();
        let clubs = clubs();

        for club in &clubs {
            let leader = accounts.iter().find(|a| a.id == club.leader_id).unwrap();
            assert!(leader.is_leading(&club.id));
            for member in &club.members {
                let account = accounts.iter().find(|a| &a.id == member).unwrap();
                assert!(account.is_member_of(&club.id));
                assert!(!account.has_requested(&club.id));
            }
            for pending in &club.pending_requests {
                let account = accounts.iter().find(|a| &a.id == pending).unwrap();
                assert!(account.has_requested(&club.id));
            }
        }
    }

    #[test]
    fn fixture_pending_requests_match_rosters() {
        let clubs = clubs();
        for request in requests().iter().filter(|r| r.is_pending()) {
            let club = clubs.iter().find(|c| c.id == request.club_id).unwrap();
            assert!(club.has_pending(&request.user_id));
        }
    }

    #[test]
    fn fixture_covers_all_roles() {
        let accounts = accounts();
        for role in [Role::Student, Role::Leader, Role::Admin] {
            assert!(accounts.iter().any(|a| a.role == role));
        }
    }

    #[test]
    fn seed_populates_fresh_store() {
        let store = MemoryStore::new();

        let report = seed_if_empty(&store).unwrap();

        assert!(report.users && report.clubs && report.requests);
        let stored: Vec<Account> = read_collection(&store, USERS_KEY).unwrap();
        assert_eq!(stored, accounts());
    }

    #[test]
    fn seed_skips_present_keys() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, "[]").unwrap();

        let report = seed_if_empty(&store).unwrap();

        assert!(!report.users);
        assert!(report.clubs && report.requests);
        let stored: Vec<Account> = read_collection(&store, USERS_KEY).unwrap();
        assert!(stored.is_empty());

        let second = seed_if_empty(&store).unwrap();
        assert!(!second.any());
    }
}
