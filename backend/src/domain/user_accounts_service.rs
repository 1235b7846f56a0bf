//! Account registration, login and profile lookups.
//!
//! One service backs three driving ports because they share the user
//! repository and the password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    LoginService, RegisterUserRequest, StoredUser, UserAccountsCommand, UserPersistenceError,
    UserProfileQuery, UserRepository,
};
use crate::domain::{
    Email, Error, LoginCredentials, PasswordHashError, PasswordHasher, User, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// User account service implementing the account driving ports.
#[derive(Clone)]
pub struct UserAccountsService<R> {
    users: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> UserAccountsService<R> {
    /// Create a service over `users` hashing with `hasher`.
    pub fn new(users: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }
}

impl<R> UserAccountsService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::conflict("email already registered")
            }
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }
}

#[async_trait]
impl<R> LoginService for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(account) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_persistence_error)?
        else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(Self::map_hash_error)?;
        if !verified || !account.user.is_active() {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user.id().clone())
    }
}

#[async_trait]
impl<R> UserAccountsCommand for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            email,
            password,
            name,
            role,
        } = request;
        let password_hash = self
            .hasher
            .hash(&password)
            .await
            .map_err(Self::map_hash_error)?;
        let user = User::new(UserId::random(), email, name, role);
        let account = StoredUser {
            user,
            password_hash,
        };
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(account.user)
    }
}

#[async_trait]
impl<R> UserProfileQuery for UserAccountsService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_persistence_error)?
            // The session outlived the account.
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
