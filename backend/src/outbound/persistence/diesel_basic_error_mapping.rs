//! Shared translation of pool and Diesel failures into port errors.
//!
//! Closed connections and checkout failures become `Connection` errors (the
//! service maps those to 503); everything else becomes a `Query` error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    IngredientRepositoryError, RecipeRepositoryError, TagRepositoryError, UserPersistenceError,
};

use super::pool::PoolError;

/// Port error enums that carry `Connection` and `Query` variants.
pub(crate) trait BasicRepositoryError: Sized {
    fn connection_failed(message: String) -> Self;
    fn query_failed(message: String) -> Self;
}

macro_rules! impl_basic_repository_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl BasicRepositoryError for $error {
                fn connection_failed(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failed(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_basic_repository_error!(
    UserPersistenceError,
    TagRepositoryError,
    IngredientRepositoryError,
    RecipeRepositoryError,
);

pub(crate) fn map_pool_error<E: BasicRepositoryError>(error: PoolError) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    E::connection_failed(message)
}

pub(crate) fn map_diesel_error<E: BasicRepositoryError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection_failed("database connection error".to_owned())
        }
        DieselError::NotFound => E::query_failed("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failed("database query error".to_owned()),
        _ => E::query_failed("database error".to_owned()),
    }
}

/// Whether `error` is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
