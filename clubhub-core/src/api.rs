//! Entry point wiring the store and both services together.

use std::sync::Arc;

use crate::config::ClubHubConfig;
use crate::identity::IdentityStore;
use crate::membership::MembershipEngine;
use crate::seed::{self, SeedReport};
use crate::store::{KeyValueStore, MemoryStore, Result, SqliteStore};

/// Core interface for ClubHub.
///
/// Owns one store handle and the two services built on it. Presentation
/// layers call [`identity`](Self::identity) for login and profiles and
/// [`membership`](Self::membership) for clubs and join requests.
///
/// # Examples
///
/// ```
/// use clubhub_core::ClubHub;
///
/// let hub = ClubHub::in_memory(true).unwrap();
/// let admin = hub.identity().authenticate("admin", "admin123").unwrap();
/// assert_eq!(admin.username, "admin");
/// assert_eq!(hub.membership().clubs().unwrap().len(), 3);
/// ```
#[derive(Clone)]
pub struct ClubHub {
    store: Arc<dyn KeyValueStore>,
    identity: IdentityStore,
    membership: MembershipEngine,
    seeded: SeedReport,
}

impl ClubHub {
    /// Opens an on-disk instance.
    ///
    /// Creates the data directory and database if needed, then seeds absent
    /// collections when the configuration asks for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created, or
    /// seeding fails.
    pub fn open(config: &ClubHubConfig) -> Result<Self> {
        std::fs::create_dir_all(config.data_dir())?;
        let store = SqliteStore::new(&config.database_path())?;
        tracing::info!(path = %config.database_path().display(), "opening clubhub store");
        Self::with_store(Arc::new(store), config.seed_on_first_run)
    }

    /// Creates an instance over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn in_memory(seed: bool) -> Result<Self> {
        Self::with_store(Arc::new(MemoryStore::new()), seed)
    }

    /// Creates an instance over any store.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn with_store(store: Arc<dyn KeyValueStore>, seed: bool) -> Result<Self> {
        let seeded = if seed {
            seed::seed_if_empty(store.as_ref())?
        } else {
            SeedReport::default()
        };

        let identity = IdentityStore::new(store.clone());
        let membership = MembershipEngine::new(store.clone(), identity.clone());

        Ok(Self {
            store,
            identity,
            membership,
            seeded,
        })
    }

    /// Returns the identity service.
    #[must_use]
    pub const fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    /// Returns the membership service.
    #[must_use]
    pub const fn membership(&self) -> &MembershipEngine {
        &self.membership
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Returns what seeding wrote when this instance was opened.
    #[must_use]
    pub const fn seed_report(&self) -> SeedReport {
        self.seeded
    }
}

impl std::fmt::Debug for ClubHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClubHub")
            .field("seeded", &self.seeded)
            .finish_non_exhaustive()
    }
}
