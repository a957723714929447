//! Key-value persistence port.
//!
//! Everything ClubHub knows lives under four keys in a single local store:
//!
//! | Key           | Contents                         |
//! |---------------|----------------------------------|
//! | `users`       | JSON array of accounts           |
//! | `clubs`       | JSON array of clubs              |
//! | `requests`    | JSON array of join requests      |
//! | `currentUser` | JSON account record, or absent   |
//!
//! Services receive the store as an `Arc<dyn KeyValueStore>` at
//! construction. Every mutating operation stages its writes into a
//! [`WriteBatch`] and commits them in one call, so all keys touched by an
//! operation change together or not at all.
//!
//! Two implementations are provided:
//! - [`SqliteStore`]: on-disk, one `kv` table, batches run in a transaction
//! - [`MemoryStore`]: in-process map for tests and ephemeral sessions

mod codec;
mod error;
mod kv;
mod memory;
mod sqlite;

pub use codec::{read_collection, read_record};
pub use error::{Result, StoreError};
pub use kv::{KeyValueStore, WriteBatch, WriteOp};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key holding the account collection.
pub const USERS_KEY: &str = "users";

/// Key holding the club collection.
pub const CLUBS_KEY: &str = "clubs";

/// Key holding the join-request collection.
pub const REQUESTS_KEY: &str = "requests";

/// Key holding the active session account.
pub const SESSION_KEY: &str = "currentUser";
