//! Register, authenticate and change-password use cases.

use tracing::{debug, instrument, warn};

use super::{
    account::Account,
    error::{CredentialError, StoreError},
    hasher, policy,
    store::UserStore,
};

/// Orchestrates policy, hashing and storage. Holds no state of its own
/// between calls; everything persistent lives in the store.
#[derive(Debug, Clone)]
pub struct CredentialService<S> {
    store: S,
}

impl<S: UserStore> CredentialService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Create a new account.
    ///
    /// The existence check is only a fast path: a concurrent registration
    /// that wins the race surfaces as [`StoreError::DuplicateUsername`] from
    /// the insert.
    ///
    /// # Errors
    /// `MissingField`, `WeakPassword`, `UsernameTaken`, or a store failure.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<Account, CredentialError> {
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::MissingField);
        }

        if !policy::is_valid(password) {
            return Err(CredentialError::WeakPassword);
        }

        if self.store.find_by_username(username).await?.is_some() {
            debug!("username already registered");
            return Err(CredentialError::UsernameTaken);
        }

        let account = self
            .store
            .insert(username, &hasher::digest(password))
            .await
            .inspect_err(|err| {
                if matches!(err, StoreError::DuplicateUsername(_)) {
                    warn!("username registered concurrently");
                }
            })?;

        debug!(account_id = account.id, "account created");

        Ok(account)
    }

    /// True iff an account with exactly `username` exists and its stored
    /// digest equals the digest of `password`.
    ///
    /// # Errors
    /// Returns an error only if the store fails.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, CredentialError> {
        let Some(account) = self.store.find_by_username(username).await? else {
            debug!("unknown username");
            return Ok(false);
        };

        Ok(account.password_digest == hasher::digest(password))
    }

    /// [`authenticate`](Self::authenticate) with the request-level checks:
    /// both fields present, and a mismatch reported as `InvalidCredentials`.
    ///
    /// # Errors
    /// `MissingField`, `InvalidCredentials`, or a store failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        if username.is_empty() || password.is_empty() {
            return Err(CredentialError::MissingField);
        }

        if self.authenticate(username, password).await? {
            Ok(())
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }

    /// Replace the password digest after re-authenticating with the
    /// current password.
    ///
    /// # Errors
    /// `MissingField`, `WeakPassword`, `InvalidCredentials`, or a store failure.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError> {
        if username.is_empty() || current_password.is_empty() || new_password.is_empty() {
            return Err(CredentialError::MissingField);
        }

        if !policy::is_valid(new_password) {
            return Err(CredentialError::WeakPassword);
        }

        if !self.authenticate(username, current_password).await? {
            return Err(CredentialError::InvalidCredentials);
        }

        self.store
            .update_password_digest(username, &hasher::digest(new_password))
            .await?;

        debug!("password updated");

        Ok(())
    }
}
