//! Configuration for opening a [`ClubHub`](crate::ClubHub).

use std::path::{Path, PathBuf};

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "clubhub.db";

/// Settings for an on-disk ClubHub instance.
///
/// # Example
///
/// ```
/// use clubhub_core::ClubHubConfig;
///
/// let config = ClubHubConfig::new("/var/lib/clubhub")
///     .with_database_file("school.db")
///     .with_seed(false);
/// assert!(config.database_path().ends_with("school.db"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubHubConfig {
    /// Directory holding the database. Created if missing.
    pub data_dir: PathBuf,
    /// Database file name inside `data_dir`.
    pub database_file: String,
    /// Populate absent collections with the fixture on open.
    pub seed_on_first_run: bool,
}

impl ClubHubConfig {
    /// Creates a configuration with the default file name and seeding on.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
            seed_on_first_run: true,
        }
    }

    /// Sets the database file name.
    #[must_use]
    pub fn with_database_file(mut self, file: impl Into<String>) -> Self {
        self.database_file = file.into();
        self
    }

    /// Turns first-run seeding on or off.
    #[must_use]
    pub const fn with_seed(mut self, seed: bool) -> Self {
        self.seed_on_first_run = seed;
        self
    }

    /// Returns the full path of the database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
