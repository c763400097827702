//! User records and the collection that owns them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CatalogError, CatalogResult},
    ids::{Isbn, UserId},
};

/// A registered library user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Key assigned by the collection
    pub id: UserId,
    /// Display name, matched verbatim by searches
    pub name: String,
    /// ISBNs currently checked out, in borrow order
    pub borrowed_books: Vec<Isbn>,
}

impl User {
    /// Whether `isbn` is among the user's borrowed books
    #[must_use]
    pub fn has_borrowed(&self, isbn: Isbn) -> bool {
        self.borrowed_books.contains(&isbn)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.name, self.id)
    }
}

/// Caller-supplied fields for a new user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
}

impl NewUser {
    /// Build a new user description
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Search criteria for users; id wins over name when both are set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserQuery {
    /// Exact id
    pub id: Option<UserId>,
    /// Exact name
    pub name: Option<String>,
}

impl UserQuery {
    /// Query a user by id
    #[must_use]
    pub fn by_id(id: UserId) -> Self {
        Self { id: Some(id), ..Self::default() }
    }

    /// Query a user by name
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }
}

/// Insertion-ordered set of users with collection-assigned ids
#[derive(Debug, Clone)]
pub struct UserCollection {
    /// Stored records, unindexed
    users: Vec<User>,
    /// Id handed to the next created user; never moves backwards, `None`
    /// once every id has been issued
    next_id: Option<UserId>,
}

impl Default for UserCollection {
    fn default() -> Self {
        Self { users: Vec::new(), next_id: Some(UserId::FIRST) }
    }
}

impl UserCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-populated from `seed`, ids assigned in order
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserIdsExhausted` if the seed outruns the id space.
    pub fn with_seed(seed: impl IntoIterator<Item = NewUser>) -> CatalogResult<Self> {
        let mut collection = Self::new();
        for user in seed {
            collection.create(user)?;
        }
        Ok(collection)
    }

    /// Store a new user under a fresh id and return a copy of the record
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserIdsExhausted` once `u32::MAX` has been issued.
    pub fn create(&mut self, user: NewUser) -> CatalogResult<User> {
        let id = self.next_id.ok_or(CatalogError::UserIdsExhausted)?;
        self.next_id = id.next();

        let user = User { id, name: user.name, borrowed_books: Vec::new() };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Look a user up by exact id or name
    #[must_use]
    pub fn find(&self, query: &UserQuery) -> Option<&User> {
        if let Some(id) = query.id {
            return self.get(id);
        }

        query.name.as_ref().and_then(|name| self.users.iter().find(|u| &u.name == name))
    }

    /// Remove the user with `id` and return it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UserNotFound` if no user has this id.
    pub fn delete(&mut self, id: UserId) -> CatalogResult<User> {
        let pos =
            self.users.iter().position(|u| u.id == id).ok_or(CatalogError::UserNotFound(id))?;
        Ok(self.users.remove(pos))
    }

    /// The user with `id`, if stored
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Mutable access to the user with `id`, if stored
    pub fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// The user currently holding `isbn`, if any
    pub fn borrower_of_mut(&mut self, isbn: Isbn) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.has_borrowed(isbn))
    }

    /// All users in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Number of stored users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the collection holds no users
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collection holding Harry (id 1) and Hermione (id 2)
    fn seeded() -> UserCollection {
        UserCollection::with_seed([NewUser::new("Harry"), NewUser::new("Hermione")])
            .unwrap_or_default()
    }

    /// Id given to a freshly created user, if any
    fn create_id(users: &mut UserCollection, name: &str) -> Option<UserId> {
        users.create(NewUser::new(name)).ok().map(|u| u.id)
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut users = UserCollection::new();
        assert_eq!(create_id(&mut users, "Tobi"), Some(UserId(1)));
        assert_eq!(create_id(&mut users, "Ada"), Some(UserId(2)));
    }

    #[test]
    fn new_user_has_no_borrowed_books() {
        let mut users = UserCollection::new();
        let created = users.create(NewUser::new("Tobi")).map(|u| u.borrowed_books.is_empty());
        assert_eq!(created, Ok(true));
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut users = seeded();
        assert!(users.delete(UserId(2)).is_ok());
        assert_eq!(create_id(&mut users, "Ronald"), Some(UserId(3)));
    }

    #[test]
    fn last_id_is_issued_once_then_creation_fails() {
        let mut users = UserCollection { users: Vec::new(), next_id: Some(UserId(u32::MAX)) };
        assert_eq!(create_id(&mut users, "Last"), Some(UserId(u32::MAX)));
        assert_eq!(users.create(NewUser::new("Overflow")), Err(CatalogError::UserIdsExhausted));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn find_by_id_takes_priority_over_name() {
        let users = seeded();
        let query = UserQuery { id: Some(UserId(2)), name: Some("Harry".to_string()) };
        assert_eq!(users.find(&query).map(|u| u.name.as_str()), Some("Hermione"));
        assert_eq!(users.find(&UserQuery::by_name("Harry")).map(|u| u.id), Some(UserId(1)));
    }

    #[test]
    fn find_misses_return_none() {
        let users = seeded();
        assert!(users.find(&UserQuery::by_id(UserId(9))).is_none());
        assert!(users.find(&UserQuery::by_name("harry")).is_none());
        assert!(users.find(&UserQuery::default()).is_none());
    }

    #[test]
    fn delete_missing_user_fails() {
        let mut users = UserCollection::new();
        assert_eq!(users.delete(UserId(1)), Err(CatalogError::UserNotFound(UserId(1))));
    }
}
