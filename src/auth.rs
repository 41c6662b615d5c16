//! Authentication collaborator for the web layer.
//!
//! The pipeline itself has no dependency on authentication; a front end that
//! wants a login gate injects an [`Authenticator`] and keeps the pipeline
//! core untouched.

use std::collections::HashMap;

use thiserror::Error;

/// Authentication failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// An authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: u64,
    pub username: String,
}

/// Credential check seam. Implementations decide where users live.
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AuthError>;
}

/// In-memory user store, seeded from `(username, password)` pairs.
///
/// Suitable for demos and tests; ids are assigned in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAuthenticator {
    users: HashMap<String, (u64, String)>,
}

impl MemoryAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, returning the store for chaining.
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        let id = self.users.len() as u64 + 1;
        self.users
            .insert(username.to_string(), (id, password.to_string()));
        self
    }
}

impl Authenticator for MemoryAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        match self.users.get(username) {
            Some((id, stored)) if stored == password => Ok(Principal {
                id: *id,
                username: username.to_string(),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
