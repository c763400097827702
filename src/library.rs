use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    book::{Book, BookCollection, BookQuery, BookSearch, NewBook},
    config::{ConfigError, DEFAULT_HISTORY_LIMIT, LibraryConfig},
    error::CatalogError,
    events::{LoanEvent, LoanRecord},
    ids::{Isbn, UserId},
    observers::LoanObserver,
    outcome::{LoanAction, LoanReceipt, Outcome},
    user::{NewUser, User, UserCollection, UserQuery},
};

/// Point-in-time copy of every record, flat enough to serialize directly
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSnapshot {
    /// All books in insertion order
    pub books: Vec<Book>,
    /// All users in insertion order
    pub users: Vec<User>,
}

/// Facade over the book and user collections.
///
/// Every lookup-then-mutate sequence runs to completion inside one `&mut self`
/// call, so no caller can observe a book marked unavailable without a
/// borrower or the reverse. Collection errors stop here and come back as
/// [`Outcome`] values.
pub struct Library {
    /// Owned book records
    books: BookCollection,
    /// Owned user records
    users: UserCollection,
    /// Most recent loan changes, oldest first
    history: VecDeque<LoanRecord>,
    /// Maximum number of history entries to keep
    history_limit: usize,
    /// Registered loan observers
    observers: Vec<Box<dyn LoanObserver>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books)
            .field("users", &self.users)
            .field("history", &self.history)
            .field("history_limit", &self.history_limit)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create a library with no books and no users
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: BookCollection::new(),
            users: UserCollection::new(),
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            observers: Vec::new(),
        }
    }

    /// Create a library seeded from `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Seed` if the configured books repeat an ISBN or
    /// the configured users outrun the id space.
    pub fn with_config(config: LibraryConfig) -> Result<Self, ConfigError> {
        let books = BookCollection::with_seed(config.books)?;
        let users = UserCollection::with_seed(config.users)?;
        debug!(books = books.len(), users = users.len(), "library seeded");

        Ok(Self { books, users, history_limit: config.history_limit, ..Self::new() })
    }

    /// Register an observer to be notified of loan changes
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    /// Add a book to the catalog
    pub fn add_book(&mut self, book: NewBook) -> Outcome<Book> {
        let isbn = book.isbn;
        let result = self.books.create(book);
        match &result {
            Ok(_) => {
                debug!(isbn = isbn.0, "book added");
            }
            Err(err) => {
                warn!(isbn = isbn.0, %err, "book not added");
            }
        }
        result.into()
    }

    /// Remove a book from the catalog.
    ///
    /// A book removed while checked out is also dropped from its borrower's
    /// list, and the loan ends with a [`LoanEvent::Released`].
    pub fn remove_book(&mut self, isbn: Isbn) -> Outcome<Book> {
        let book = match self.books.delete(isbn) {
            Ok(book) => book,
            Err(err) => {
                warn!(isbn = isbn.0, %err, "book not removed");
                return err.into();
            }
        };

        if let Some(holder) = self.users.borrower_of_mut(isbn) {
            holder.borrowed_books.retain(|held| *held != isbn);
            let user_id = holder.id;
            debug!(isbn = isbn.0, user_id = user_id.0, "removed book dropped from borrower");
            self.record(LoanEvent::Released { user_id, isbn });
        }

        debug!(isbn = isbn.0, "book removed");
        Outcome::Success(book)
    }

    /// Search books by exact title, ISBN or author
    #[must_use]
    pub fn search_book(&self, query: &BookQuery) -> BookSearch<'_> {
        self.books.find(query)
    }

    /// Register a new user under the next free id
    pub fn add_user(&mut self, user: NewUser) -> Outcome<User> {
        match self.users.create(user) {
            Ok(user) => {
                debug!(user_id = user.id.0, "user added");
                Outcome::Success(user)
            }
            Err(err) => {
                warn!(%err, "user not added");
                err.into()
            }
        }
    }

    /// Remove a user from the catalog.
    ///
    /// Books the user still holds go back on the shelf.
    pub fn remove_user(&mut self, id: UserId) -> Outcome<User> {
        let user = match self.users.delete(id) {
            Ok(user) => user,
            Err(err) => {
                warn!(user_id = id.0, %err, "user not removed");
                return err.into();
            }
        };

        for &isbn in &user.borrowed_books {
            if let Some(book) = self.books.get_mut(isbn) {
                book.is_available = true;
            }
            self.record(LoanEvent::Released { user_id: id, isbn });
        }

        debug!(user_id = id.0, "user removed");
        Outcome::Success(user)
    }

    /// Search a user by exact id or name
    #[must_use]
    pub fn search_user(&self, query: &UserQuery) -> Option<&User> {
        self.users.find(query)
    }

    /// Check `isbn` out to `user_id`.
    ///
    /// An unavailable book yields [`Outcome::Unavailable`] and changes nothing.
    pub fn borrow_book(&mut self, user_id: UserId, isbn: Isbn) -> Outcome<LoanReceipt> {
        let (user, book) = match self.locate(user_id, isbn) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(user_id = user_id.0, isbn = isbn.0, %err, "borrow rejected");
                return err.into();
            }
        };

        if !book.is_available {
            warn!(user_id = user_id.0, isbn = isbn.0, "book is not available");
            return Outcome::Unavailable { isbn, title: book.title.clone() };
        }

        user.borrowed_books.push(isbn);
        book.is_available = false;

        let receipt = LoanReceipt {
            action: LoanAction::Borrowed,
            user_id,
            user_name: user.name.clone(),
            isbn,
            title: book.title.clone(),
        };
        self.record(LoanEvent::Borrowed { user_id, isbn });
        Outcome::Success(receipt)
    }

    /// Take `isbn` back from `user_id`.
    ///
    /// A book the user does not hold yields [`Outcome::NotBorrowed`] and
    /// changes nothing.
    pub fn return_book(&mut self, user_id: UserId, isbn: Isbn) -> Outcome<LoanReceipt> {
        let (user, book) = match self.locate(user_id, isbn) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(user_id = user_id.0, isbn = isbn.0, %err, "return rejected");
                return err.into();
            }
        };

        if !user.has_borrowed(isbn) {
            warn!(user_id = user_id.0, isbn = isbn.0, "user did not borrow this book");
            return Outcome::NotBorrowed { user_id, isbn };
        }

        user.borrowed_books.retain(|held| *held != isbn);
        book.is_available = true;

        let receipt = LoanReceipt {
            action: LoanAction::Returned,
            user_id,
            user_name: user.name.clone(),
            isbn,
            title: book.title.clone(),
        };
        self.record(LoanEvent::Returned { user_id, isbn });
        Outcome::Success(receipt)
    }

    /// Whether `isbn` can currently be borrowed
    pub fn is_book_available(&self, isbn: Isbn) -> Outcome<bool> {
        self.books
            .get(isbn)
            .map(|book| book.is_available)
            .ok_or(CatalogError::BookNotFound(isbn))
            .into()
    }

    /// The book collection
    #[must_use]
    pub fn books(&self) -> &BookCollection {
        &self.books
    }

    /// The user collection
    #[must_use]
    pub fn users(&self) -> &UserCollection {
        &self.users
    }

    /// Recorded loan changes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &LoanRecord> {
        self.history.iter()
    }

    /// Copy every record out for serialization
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            books: self.books.iter().cloned().collect(),
            users: self.users.iter().cloned().collect(),
        }
    }

    /// Resolve both sides of a loan, user first
    fn locate(
        &mut self,
        user_id: UserId,
        isbn: Isbn,
    ) -> Result<(&mut User, &mut Book), CatalogError> {
        let user = self.users.get_mut(user_id).ok_or(CatalogError::UserNotFound(user_id))?;
        let book = self.books.get_mut(isbn).ok_or(CatalogError::BookNotFound(isbn))?;
        Ok((user, book))
    }

    /// Append to the bounded history and notify observers
    fn record(&mut self, event: LoanEvent) {
        self.history.push_back(LoanRecord::now(event));
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        for observer in &self.observers {
            observer.on_loan_event(&event);
        }
    }
}
