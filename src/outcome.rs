//! Result values returned across the [`Library`](crate::Library) boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::CatalogError,
    ids::{Isbn, UserId},
};

/// What happened to a facade call.
///
/// Hard collection errors and the expected negative outcomes of a loan are
/// both plain values here; callers branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The operation took effect
    Success(T),
    /// A referenced book or user does not exist
    NotFound(CatalogError),
    /// A unique key is already taken or none is left to assign
    Conflict(CatalogError),
    /// The book is checked out by someone
    Unavailable {
        /// Requested book
        isbn: Isbn,
        /// Its title, for display
        title: String,
    },
    /// The user is not holding the book they tried to return
    NotBorrowed {
        /// Returning user
        user_id: UserId,
        /// Book they tried to return
        isbn: Isbn,
    },
}

/// Variant tag of an [`Outcome`], for callers that only need to branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// See [`Outcome::Success`]
    Success,
    /// See [`Outcome::NotFound`]
    NotFound,
    /// See [`Outcome::Conflict`]
    Conflict,
    /// See [`Outcome::Unavailable`]
    Unavailable,
    /// See [`Outcome::NotBorrowed`]
    NotBorrowed,
}

impl<T> Outcome<T> {
    /// The variant tag
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::NotFound(_) => OutcomeKind::NotFound,
            Self::Conflict(_) => OutcomeKind::Conflict,
            Self::Unavailable { .. } => OutcomeKind::Unavailable,
            Self::NotBorrowed { .. } => OutcomeKind::NotBorrowed,
        }
    }

    /// Whether the operation took effect
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, discarding any failure
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the success value, leaving failures untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::NotFound(err) => Outcome::NotFound(err),
            Self::Conflict(err) => Outcome::Conflict(err),
            Self::Unavailable { isbn, title } => Outcome::Unavailable { isbn, title },
            Self::NotBorrowed { user_id, isbn } => Outcome::NotBorrowed { user_id, isbn },
        }
    }
}

impl<T: fmt::Display> Outcome<T> {
    /// Human-readable description of the outcome
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success(value) => value.to_string(),
            Self::NotFound(CatalogError::UserNotFound(_)) => "User not found".to_string(),
            Self::NotFound(_) => "Book not found".to_string(),
            Self::Conflict(CatalogError::UserIdsExhausted) => {
                "No user ids left to assign".to_string()
            }
            Self::Conflict(_) => "A book with this ISBN already exists".to_string(),
            Self::Unavailable { title, .. } => {
                format!("Book: {title} is not available at the moment")
            }
            Self::NotBorrowed { .. } => "User did not borrow this book".to_string(),
        }
    }
}

impl<T> From<CatalogError> for Outcome<T> {
    fn from(err: CatalogError) -> Self {
        if err.is_not_found() { Self::NotFound(err) } else { Self::Conflict(err) }
    }
}

impl<T> From<Result<T, CatalogError>> for Outcome<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => err.into(),
        }
    }
}

/// Which way a loan moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanAction {
    /// The book left the shelf
    Borrowed,
    /// The book came back
    Returned,
}

/// Confirmation of a successful borrow or return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanReceipt {
    /// Borrow or return
    pub action: LoanAction,
    /// Acting user
    pub user_id: UserId,
    /// Their name at the time of the loan
    pub user_name: String,
    /// Book involved
    pub isbn: Isbn,
    /// Its title at the time of the loan
    pub title: String,
}

impl fmt::Display for LoanReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            LoanAction::Borrowed => "borrowed",
            LoanAction::Returned => "returned",
        };
        write!(f, "User {} has successfully {verb} book {}", self.user_name, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Receipt for Harry and book "T" with the given direction
    fn receipt(action: LoanAction) -> LoanReceipt {
        LoanReceipt {
            action,
            user_id: UserId(1),
            user_name: "Harry".to_string(),
            isbn: Isbn(12345),
            title: "T".to_string(),
        }
    }

    #[test]
    fn errors_map_to_kinds() {
        let missing: Outcome<()> = CatalogError::BookNotFound(Isbn(1)).into();
        let taken: Outcome<()> = CatalogError::DuplicateIsbn(Isbn(1)).into();
        assert_eq!(missing.kind(), OutcomeKind::NotFound);
        assert_eq!(taken.kind(), OutcomeKind::Conflict);
    }

    #[test]
    fn messages_describe_each_outcome() {
        assert_eq!(
            Outcome::Success(receipt(LoanAction::Borrowed)).message(),
            "User Harry has successfully borrowed book T"
        );
        assert_eq!(
            Outcome::Success(receipt(LoanAction::Returned)).message(),
            "User Harry has successfully returned book T"
        );

        let unavailable: Outcome<LoanReceipt> =
            Outcome::Unavailable { isbn: Isbn(12345), title: "T".to_string() };
        assert_eq!(unavailable.message(), "Book: T is not available at the moment");

        let not_borrowed: Outcome<LoanReceipt> =
            Outcome::NotBorrowed { user_id: UserId(1), isbn: Isbn(12345) };
        assert_eq!(not_borrowed.message(), "User did not borrow this book");

        let no_user: Outcome<LoanReceipt> = CatalogError::UserNotFound(UserId(3)).into();
        assert_eq!(no_user.message(), "User not found");

        let no_ids: Outcome<LoanReceipt> = CatalogError::UserIdsExhausted.into();
        assert_eq!(no_ids.kind(), OutcomeKind::Conflict);
        assert_eq!(no_ids.message(), "No user ids left to assign");
    }

    #[test]
    fn map_preserves_failures() {
        let failed: Outcome<u32> = Outcome::NotBorrowed { user_id: UserId(1), isbn: Isbn(2) };
        assert_eq!(failed.map(|n| n + 1).kind(), OutcomeKind::NotBorrowed);
        assert_eq!(Outcome::Success(1).map(|n: u32| n + 1).success(), Some(2));
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&OutcomeKind::NotBorrowed).unwrap_or_default();
        assert_eq!(json, "\"not_borrowed\"");
    }
}
