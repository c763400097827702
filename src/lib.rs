//! In-memory library catalog tracking books, users and the loans between them.
//!
//! A [`Library`] owns one [`BookCollection`] and one [`UserCollection`] and
//! coordinates borrowing and returning so that a book is unavailable exactly
//! while one user holds it. [`SharedLibrary`] puts a library behind a single
//! lock for use across threads.

pub mod book;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod library;
pub mod observers;
pub mod outcome;
pub mod shared;
pub mod user;

pub use book::{Book, BookCollection, BookQuery, BookSearch, NewBook};
pub use config::{ConfigError, LibraryConfig};
pub use error::CatalogError;
pub use events::{LoanEvent, LoanRecord};
pub use ids::{Isbn, UserId};
pub use library::{CatalogSnapshot, Library};
pub use observers::{LoanLogger, LoanObserver};
pub use outcome::{LoanAction, LoanReceipt, Outcome, OutcomeKind};
pub use shared::SharedLibrary;
pub use user::{NewUser, User, UserCollection, UserQuery};
