//! Driving port for creating accounts.

use async_trait::async_trait;

use crate::domain::{AccountRole, Email, Error, Password, User, UserName};

/// Input for [`UserAccountsCommand::register`].
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub email: Email,
    pub password: Password,
    pub name: UserName,
    pub role: AccountRole,
}

/// Domain use-case port for account registration.
#[async_trait]
pub trait UserAccountsCommand: Send + Sync {
    /// Create an account; a taken email yields a conflict error.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;
}
