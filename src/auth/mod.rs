//! Credential Gate
//!
//! Username/password check for the login-gated calculator. Storage is an
//! external collaborator behind [`CredentialStore`]; this module only
//! digests passwords and maps store answers onto typed outcomes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::error::{CoreError, Result};

/// One-way SHA-256 digest of a password, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn of(plaintext: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup contract the credential store must satisfy.
pub trait CredentialStore: Send + Sync {
    /// True when `username` exists with exactly this digest.
    fn verify(&self, username: &str, digest: &PasswordDigest) -> bool;
    /// Store a new account. False when `username` is already taken.
    fn register(&self, username: &str, digest: &PasswordDigest) -> bool;
}

/// Process-local store, mainly for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, PasswordDigest>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read_accounts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Inserts are single calls, so a poisoned map is still consistent.
    fn read_accounts(&self) -> RwLockReadGuard<'_, HashMap<String, PasswordDigest>> {
        self.accounts.read().unwrap_or_else(|poisoned| {
            warn!("Credential store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_accounts(&self) -> RwLockWriteGuard<'_, HashMap<String, PasswordDigest>> {
        self.accounts.write().unwrap_or_else(|poisoned| {
            warn!("Credential store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn verify(&self, username: &str, digest: &PasswordDigest) -> bool {
        self.read_accounts().get(username) == Some(digest)
    }

    fn register(&self, username: &str, digest: &PasswordDigest) -> bool {
        let mut accounts = self.write_accounts();
        if accounts.contains_key(username) {
            return false;
        }
        accounts.insert(username.to_string(), digest.clone());
        true
    }
}

/// Digests plaintext passwords and talks to a [`CredentialStore`].
pub struct Authenticator<S: CredentialStore> {
    store: S,
}

impl<S: CredentialStore> Authenticator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        if self.store.register(username, &PasswordDigest::of(password)) {
            info!("Registered account '{}'", username);
            Ok(())
        } else {
            warn!("Registration rejected, account '{}' already exists", username);
            Err(CoreError::DuplicateAccount(username.to_string()))
        }
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        let ok = self.store.verify(username, &PasswordDigest::of(password));
        if !ok {
            warn!("Failed login for '{}'", username);
        }
        ok
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
