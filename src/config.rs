//! Initial contents and tunables for a [`Library`](crate::Library).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    book::NewBook,
    error::CatalogError,
    ids::Isbn,
    user::NewUser,
};

/// Default number of loan records kept in memory
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Errors raised while loading or applying a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`LibraryConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The seed data violates a collection constraint
    #[error("invalid seed data: {0}")]
    Seed(#[from] CatalogError),
}

/// Seed records and limits a library starts with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryConfig {
    /// Books stored at start-up, in order
    pub books: Vec<NewBook>,
    /// Users registered at start-up; ids are assigned from 1 in order
    pub users: Vec<NewUser>,
    /// Maximum number of loan records kept, oldest dropped first
    pub history_limit: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { books: Vec::new(), users: Vec::new(), history_limit: DEFAULT_HISTORY_LIMIT }
    }
}

impl LibraryConfig {
    /// Parse a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// A small demonstration catalog of five books and five users
    #[must_use]
    pub fn sample() -> Self {
        let books = [
            ("Harry Potter and the Philosopher's stone", "J.K Rowling", 12345),
            ("To Kill a Mockingbird", "Harper Lee", 57369),
            ("Harry Potter and the Chamber of Secrets", "J.K Rowling", 12346),
            ("1984", "George Orwell", 28903),
            ("The Great Gatsby", "F. Scott Fitzgerald", 20943),
        ]
        .into_iter()
        .map(|(title, author, isbn)| NewBook::new(title, author, Isbn(isbn)))
        .collect();

        let users = ["Harry", "Hermione", "Ronald", "Nevile", "Draco"]
            .into_iter()
            .map(NewUser::new)
            .collect();

        Self { books, users, history_limit: DEFAULT_HISTORY_LIMIT }
    }
}
