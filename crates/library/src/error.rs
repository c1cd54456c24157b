use std::time::Duration;

use impulso_core::error::CoreError;

/// Failures of the underlying store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The store holds data that violates an invariant the domain layer
    /// relies on, e.g. a resource whose category does not resolve.
    #[error("Data integrity violation: {0}")]
    Inconsistent(String),
}

/// Error type returned by every [`Library`](crate::Library) operation.
///
/// Wraps [`CoreError`] for domain failures and [`StoreError`] for storage
/// failures. "Nothing found" is never an error on the read side.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(StoreError::Database(err))
    }
}

/// Coarse classification of a [`LibraryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ReferentialIntegrity,
    NotFound,
    Validation,
    Store,
}

impl LibraryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(CoreError::ReferentialIntegrity { .. }) => ErrorKind::ReferentialIntegrity,
            Self::Core(CoreError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Core(CoreError::Validation(_)) => ErrorKind::Validation,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

/// Convenience alias for library return values.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        let err: LibraryError = CoreError::ReferentialIntegrity { category_id: 9 }.into();
        assert_eq!(err.kind(), ErrorKind::ReferentialIntegrity);
        assert_eq!(err.to_string(), "Category with id 9 does not exist");

        let err: LibraryError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Store);

        let err: LibraryError = StoreError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(err.kind(), ErrorKind::Store);
        assert_eq!(err.to_string(), "Store operation timed out after 5s");
    }
}
