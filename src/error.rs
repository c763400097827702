//! Hard errors raised by the book and user collections.

use thiserror::Error;

use crate::ids::{Isbn, UserId};

/// Lookup and uniqueness failures inside a collection.
///
/// These never cross the [`Library`](crate::Library) boundary: the facade
/// folds them into an [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No book carries the requested ISBN
    #[error("Book not found (isbn {0})")]
    BookNotFound(Isbn),

    /// No user carries the requested id
    #[error("User not found (id {0})")]
    UserNotFound(UserId),

    /// A book with this ISBN is already stored
    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(Isbn),

    /// Every user id has been handed out
    #[error("No user ids left to assign")]
    UserIdsExhausted,
}

impl CatalogError {
    /// Whether this error is a failed lookup rather than a key conflict
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BookNotFound(_) | Self::UserNotFound(_))
    }
}

/// Convenience alias for collection results.
pub type CatalogResult<T> = Result<T, CatalogError>;
