//! Account lifecycle and session management.
//!
//! [`IdentityStore`] is the only writer of the `users` and `currentUser`
//! keys. The membership engine never edits accounts directly; it hands
//! [`MembershipPatch`]es to [`IdentityStore::stage_patches`], which queues
//! the patched collection into the engine's write batch.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use super::error::{IdentityError, Result};
use super::types::{Account, MembershipPatch, Role};
use crate::ids;
use crate::store::{
    read_collection, read_record, KeyValueStore, WriteBatch, SESSION_KEY, USERS_KEY,
};

/// Registered accounts plus the current-session pointer.
///
/// Cloning is cheap and yields a handle to the same store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use clubhub_core::identity::IdentityStore;
/// use clubhub_core::store::MemoryStore;
///
/// let identity = IdentityStore::new(Arc::new(MemoryStore::new()));
/// identity.register("Alice", "alice", "secret").unwrap();
///
/// let account = identity.authenticate("alice", "secret").unwrap();
/// assert_eq!(identity.current_session().unwrap(), Some(account));
/// ```
#[derive(Clone)]
pub struct IdentityStore {
    store: Arc<dyn KeyValueStore>,
}

impl IdentityStore {
    /// Creates an identity store over the given persistence handle.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ==================== Accounts ====================

    /// Registers a new student account.
    ///
    /// The account starts with empty relation lists. Registration does not
    /// log the account in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::DuplicateUsername`] if `username` is taken
    /// (exact, case-sensitive match), or a store error.
    pub fn register(&self, name: &str, username: &str, secret: &str) -> Result<Account> {
        let mut accounts = self.load_accounts()?;

        if accounts.iter().any(|a| a.username == username) {
            tracing::debug!(username, "registration rejected: username taken");
            return Err(IdentityError::DuplicateUsername(username.to_string()));
        }

        let id = ids::generate(ids::STUDENT_PREFIX, |candidate| {
            accounts.iter().any(|a| a.id == candidate)
        });
        let account = Account::new_student(id, name, username, secret);
        accounts.push(account.clone());

        let mut batch = WriteBatch::new();
        batch.put_json(USERS_KEY, &accounts)?;
        self.store.apply(&batch)?;

        tracing::info!(account_id = %account.id, username, "registered student account");
        Ok(account)
    }

    /// Checks whether `username` is free for registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the account collection cannot be read.
    pub fn is_username_available(&self, username: &str) -> Result<bool> {
        Ok(!self.load_accounts()?.iter().any(|a| a.username == username))
    }

    /// Replaces the stored account with the same id.
    ///
    /// No merge: `account` must be the complete record. If it is the
    /// session account, the session is refreshed in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::AccountNotFound`] for an unknown id,
    /// [`IdentityError::DuplicateUsername`] if another account already uses
    /// the new username, or a store error.
    pub fn update_profile(&self, account: Account) -> Result<Account> {
        let mut accounts = self.load_accounts()?;

        if accounts
            .iter()
            .any(|a| a.id != account.id && a.username == account.username)
        {
            return Err(IdentityError::DuplicateUsername(account.username));
        }

        let slot = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(|| IdentityError::AccountNotFound(account.id.clone()))?;
        *slot = account.clone();

        let mut batch = WriteBatch::new();
        batch.put_json(USERS_KEY, &accounts)?;
        if self.session_id()?.as_deref() == Some(account.id.as_str()) {
            batch.put_json(SESSION_KEY, &account)?;
        }
        self.store.apply(&batch)?;

        tracing::info!(account_id = %account.id, "updated profile");
        Ok(account)
    }

    /// Lists accounts with the given role, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the account collection cannot be read.
    pub fn list_accounts_by_role(&self, role: Role) -> Result<Vec<Account>> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .filter(|a| a.role == role)
            .collect())
    }

    /// Looks up an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the account collection cannot be read.
    pub fn account_by_id(&self, account_id: &str) -> Result<Option<Account>> {
        Ok(self.find_account(account_id)?)
    }

    /// Returns every account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account collection cannot be read.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.load_accounts()?)
    }

    // ==================== Session ====================

    /// Logs in with an exact username and secret match.
    ///
    /// Every account is visited and secrets are compared with `subtle`.
    /// Both failure cases return the same error. This is not hardened
    /// against timing: username comparison and secrets of different
    /// lengths still short-circuit.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] on any mismatch, or a
    /// store error.
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<Account> {
        let accounts = self.load_accounts()?;

        let mut matched: Option<Account> = None;
        for account in accounts {
            let secret_ok: bool = account.secret.as_bytes().ct_eq(secret.as_bytes()).into();
            if account.username == username && secret_ok && matched.is_none() {
                matched = Some(account);
            }
        }

        let Some(account) = matched else {
            tracing::warn!("login failed");
            return Err(IdentityError::InvalidCredentials);
        };

        let mut batch = WriteBatch::new();
        batch.put_json(SESSION_KEY, &account)?;
        self.store.apply(&batch)?;

        tracing::info!(account_id = %account.id, role = account.role.as_str(), "session started");
        Ok(account)
    }

    /// Clears the session. Calling it with no session is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn end_session(&self) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete(SESSION_KEY);
        self.store.apply(&batch)?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Returns the session account, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be read.
    pub fn current_session(&self) -> Result<Option<Account>> {
        Ok(read_record(self.store.as_ref(), SESSION_KEY)?)
    }

    /// Returns `true` when an account is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be read.
    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.current_session()?.is_some())
    }

    // ==================== Engine support ====================

    /// Applies relation-list patches and queues the result into `batch`.
    ///
    /// The updated `users` collection is staged, plus a refreshed session
    /// record when the session account was patched. Patches for unknown
    /// accounts are skipped. Nothing is written until the caller commits
    /// `batch`.
    pub(crate) fn stage_patches(
        &self,
        batch: &mut WriteBatch,
        patches: &[MembershipPatch],
    ) -> crate::store::Result<()> {
        if patches.is_empty() {
            return Ok(());
        }

        let mut accounts = self.load_accounts()?;
        let session_id = self.session_id()?;
        let mut refreshed_session = None;

        for patch in patches {
            let Some(account) = accounts.iter_mut().find(|a| a.id == patch.account_id) else {
                tracing::debug!(account_id = %patch.account_id, "patch for unknown account skipped");
                continue;
            };
            patch.apply_to(account);
            if session_id.as_deref() == Some(account.id.as_str()) {
                refreshed_session = Some(account.clone());
            }
        }

        batch.put_json(USERS_KEY, &accounts)?;
        if let Some(session) = refreshed_session {
            batch.put_json(SESSION_KEY, &session)?;
        }
        Ok(())
    }

    /// Returns the stored record of the session account.
    ///
    /// The session copy can lag behind `users` if the account was edited
    /// elsewhere, so the `users` record wins when both exist.
    pub(crate) fn session_account(&self) -> crate::store::Result<Option<Account>> {
        let session: Option<Account> = read_record(self.store.as_ref(), SESSION_KEY)?;
        let Some(session) = session else {
            return Ok(None);
        };
        Ok(Some(self.find_account(&session.id)?.unwrap_or(session)))
    }

    pub(crate) fn find_account(&self, account_id: &str) -> crate::store::Result<Option<Account>> {
        Ok(self
            .load_accounts()?
            .into_iter()
            .find(|a| a.id == account_id))
    }

    pub(crate) fn load_accounts(&self) -> crate::store::Result<Vec<Account>> {
        read_collection(self.store.as_ref(), USERS_KEY)
    }

    fn session_id(&self) -> crate::store::Result<Option<String>> {
        let session: Option<Account> = read_record(self.store.as_ref(), SESSION_KEY)?;
        Ok(session.map(|a| a.id))
    }
}

impl std::fmt::Debug for IdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityStore").finish_non_exhaustive()
    }
}
