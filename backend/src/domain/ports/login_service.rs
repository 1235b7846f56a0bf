//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to check credentials without knowing how
//! accounts are stored or how passwords are hashed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails, wrong passwords and inactive accounts all fail with
    /// the same unauthorised error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
