//! Record identifier generation.
//!
//! Ids look like `club_1718000000000_9f3a01bc`: a record-kind prefix, the
//! creation time in Unix milliseconds and a random 32-bit hex suffix.

/// Prefix for student accounts created by registration.
pub const STUDENT_PREFIX: &str = "student";

/// Prefix for clubs.
pub const CLUB_PREFIX: &str = "club";

/// Prefix for join requests.
pub const REQUEST_PREFIX: &str = "req";

/// Generates an id with the given prefix that `is_taken` rejects.
///
/// Re-rolls the random suffix until the candidate is free.
pub(crate) fn generate(prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    loop {
        let suffix: [u8; 4] = rand::random();
        let candidate = format!("{prefix}_{millis}_{}", hex::encode(suffix));
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}
