//! Thread-safe handle over a single [`Library`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    ids::{Isbn, UserId},
    library::Library,
    outcome::{LoanReceipt, Outcome},
};

/// A [`Library`] behind one coarse lock.
///
/// Borrow and return read and write both collections, so every call takes
/// the lock for its whole duration; clones share the same library.
#[derive(Debug, Clone, Default)]
pub struct SharedLibrary {
    /// The guarded facade
    inner: Arc<Mutex<Library>>,
}

impl SharedLibrary {
    /// Wrap `library` for shared use
    #[must_use]
    pub fn new(library: Library) -> Self {
        Self { inner: Arc::new(Mutex::new(library)) }
    }

    /// Run `f` with exclusive access to the library
    pub fn with<R>(&self, f: impl FnOnce(&mut Library) -> R) -> R {
        let mut library = self.inner.lock();
        f(&mut library)
    }

    /// See [`Library::borrow_book`]
    pub fn borrow_book(&self, user_id: UserId, isbn: Isbn) -> Outcome<LoanReceipt> {
        self.with(|library| library.borrow_book(user_id, isbn))
    }

    /// See [`Library::return_book`]
    pub fn return_book(&self, user_id: UserId, isbn: Isbn) -> Outcome<LoanReceipt> {
        self.with(|library| library.return_book(user_id, isbn))
    }

    /// See [`Library::is_book_available`]
    pub fn is_book_available(&self, isbn: Isbn) -> Outcome<bool> {
        self.with(|library| library.is_book_available(isbn))
    }
}

impl From<Library> for SharedLibrary {
    fn from(library: Library) -> Self {
        Self::new(library)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{book::NewBook, user::NewUser};

    /// Shared library with `count` users (ids 1..=count) and book 12345
    fn shared_with_users(count: u32) -> SharedLibrary {
        let mut library = Library::new();
        for n in 0..count {
            assert!(library.add_user(NewUser::new(format!("user-{n}"))).is_success());
        }
        assert!(library.add_book(NewBook::new("T", "A", Isbn(12345))).is_success());
        library.into()
    }

    #[test]
    fn concurrent_borrows_have_one_winner() {
        let shared = shared_with_users(8);

        let handles: Vec<_> = (1..=8)
            .map(|id| {
                let shared = shared.clone();
                thread::spawn(move || shared.borrow_book(UserId(id), Isbn(12345)).is_success())
            })
            .collect();

        let winners =
            handles.into_iter().map(|h| h.join().unwrap_or(false)).filter(|won| *won).count();
        assert_eq!(winners, 1);
        assert_eq!(shared.is_book_available(Isbn(12345)), Outcome::Success(false));

        let holders = shared
            .with(|library| library.users().iter().filter(|u| u.has_borrowed(Isbn(12345))).count());
        assert_eq!(holders, 1);
    }

    #[test]
    fn clones_share_state() {
        let shared = shared_with_users(1);
        let other = shared.clone();

        assert!(shared.borrow_book(UserId(1), Isbn(12345)).is_success());
        assert_eq!(other.is_book_available(Isbn(12345)), Outcome::Success(false));
        assert!(other.return_book(UserId(1), Isbn(12345)).is_success());
        assert_eq!(shared.is_book_available(Isbn(12345)), Outcome::Success(true));
    }
}
