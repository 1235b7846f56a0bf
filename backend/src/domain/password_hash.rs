//! bcrypt password hashing off the async executor.
//!
//! Hashing and verification run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`].

use std::fmt;

use zeroize::Zeroizing;

use super::auth::Password;

/// Cost range bcrypt accepts.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Failures raised while hashing or verifying a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    #[error("password hashing task failed: {message}")]
    Task { message: String },
}

/// Stored bcrypt hash in modular crypt format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash read back from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Hashes and verifies passwords with a fixed bcrypt cost.
///
/// # Examples
/// ```
/// use recipe_api::domain::{Password, PasswordHasher};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let hasher = PasswordHasher::with_cost(4);
/// let password = Password::new("testpass123").unwrap();
/// let hash = hasher.hash(&password).await.unwrap();
/// assert!(hasher.verify("testpass123", &hash).await.unwrap());
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    /// Use a specific bcrypt cost, clamped to the range bcrypt accepts.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a validated password.
    pub async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(secret.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::Task {
                message: err.to_string(),
            })?
            .map(PasswordHash)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })
    }

    /// Check `candidate` against a stored hash.
    ///
    /// A malformed stored hash is reported as an error rather than a mismatch.
    pub async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let secret = Zeroizing::new(candidate.to_owned());
        let stored = hash.0.clone();
        tokio::task::spawn_blocking(move || bcrypt::verify(secret.as_str(), &stored))
            .await
            .map_err(|err| PasswordHashError::Task {
                message: err.to_string(),
            })?
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })
    }
}
