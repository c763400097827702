//! Book records and the collection that owns them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CatalogError, CatalogResult},
    ids::Isbn,
};

/// A stored book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Exact title, matched verbatim by searches
    pub title: String,
    /// Exact author name, matched verbatim by searches
    pub author: String,
    /// Unique key
    pub isbn: Isbn,
    /// False while some user holds the book
    pub is_available: bool,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} (isbn {})", self.title, self.author, self.isbn)
    }
}

/// Caller-supplied fields for a new book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewBook {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Key the book will be stored under
    pub isbn: Isbn,
}

impl NewBook {
    /// Build a new book description
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: Isbn) -> Self {
        Self { title: title.into(), author: author.into(), isbn }
    }
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Self { title: new.title, author: new.author, isbn: new.isbn, is_available: true }
    }
}

/// Search criteria for books.
///
/// Only the first populated field is consulted, in the order title, isbn,
/// author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookQuery {
    /// Exact title
    pub title: Option<String>,
    /// Exact ISBN
    pub isbn: Option<Isbn>,
    /// Exact author, may match several books
    pub author: Option<String>,
}

impl BookQuery {
    /// Query a single book by title
    #[must_use]
    pub fn by_title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    /// Query a single book by ISBN
    #[must_use]
    pub fn by_isbn(isbn: Isbn) -> Self {
        Self { isbn: Some(isbn), ..Self::default() }
    }

    /// Query every book by an author
    #[must_use]
    pub fn by_author(author: impl Into<String>) -> Self {
        Self { author: Some(author.into()), ..Self::default() }
    }
}

/// Result of [`BookCollection::find`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSearch<'a> {
    /// Title or ISBN lookup, at most one match
    Single(Option<&'a Book>),
    /// Author lookup, possibly empty
    ByAuthor(Vec<&'a Book>),
    /// The query named no field
    NoCriteria,
}

impl BookSearch<'_> {
    /// Number of books matched
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(found) => usize::from(found.is_some()),
            Self::ByAuthor(books) => books.len(),
            Self::NoCriteria => 0,
        }
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned copies of the matched books, in collection order
    #[must_use]
    pub fn to_books(&self) -> Vec<Book> {
        match self {
            Self::Single(found) => found.iter().copied().cloned().collect(),
            Self::ByAuthor(books) => books.iter().copied().cloned().collect(),
            Self::NoCriteria => Vec::new(),
        }
    }
}

/// Insertion-ordered set of books keyed by ISBN
#[derive(Debug, Clone, Default)]
pub struct BookCollection {
    /// Stored records, unindexed
    books: Vec<Book>,
}

impl BookCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-populated from `seed`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateIsbn` if the seed repeats an ISBN.
    pub fn with_seed(seed: impl IntoIterator<Item = NewBook>) -> CatalogResult<Self> {
        let mut collection = Self::new();
        for book in seed {
            collection.create(book)?;
        }
        Ok(collection)
    }

    /// Store a new, available book and return a copy of the stored record
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateIsbn` if the ISBN is already stored.
    pub fn create(&mut self, book: NewBook) -> CatalogResult<Book> {
        if self.books.iter().any(|b| b.isbn == book.isbn) {
            return Err(CatalogError::DuplicateIsbn(book.isbn));
        }

        let book = Book::from(book);
        self.books.push(book.clone());
        Ok(book)
    }

    /// Look books up by exact title, ISBN or author
    #[must_use]
    pub fn find(&self, query: &BookQuery) -> BookSearch<'_> {
        if let Some(title) = &query.title {
            return BookSearch::Single(self.books.iter().find(|b| &b.title == title));
        }

        if let Some(isbn) = query.isbn {
            return BookSearch::Single(self.get(isbn));
        }

        if let Some(author) = &query.author {
            let matches = self.books.iter().filter(|b| &b.author == author).collect();
            return BookSearch::ByAuthor(matches);
        }

        BookSearch::NoCriteria
    }

    /// Remove the book with `isbn` and return it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BookNotFound` if no book has this ISBN.
    pub fn delete(&mut self, isbn: Isbn) -> CatalogResult<Book> {
        let pos = self
            .books
            .iter()
            .position(|b| b.isbn == isbn)
            .ok_or(CatalogError::BookNotFound(isbn))?;
        Ok(self.books.remove(pos))
    }

    /// The book with `isbn`, if stored
    #[must_use]
    pub fn get(&self, isbn: Isbn) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    /// Mutable access to the book with `isbn`, if stored
    pub fn get_mut(&mut self, isbn: Isbn) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.isbn == isbn)
    }

    /// All books in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// Number of stored books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the collection holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collection holding two Rowling titles and one Harper Lee title
    fn seeded() -> BookCollection {
        let seed = vec![
            NewBook::new("Harry Potter and the Philosopher's stone", "J.K Rowling", Isbn(12345)),
            NewBook::new("To Kill a Mockingbird", "Harper Lee", Isbn(57369)),
            NewBook::new("Harry Potter and the Chamber of Secrets", "J.K Rowling", Isbn(12346)),
        ];
        BookCollection::with_seed(seed).unwrap_or_default()
    }

    #[test]
    fn create_marks_book_available() {
        let mut books = BookCollection::new();
        let created = books.create(NewBook::new("T", "A", Isbn(1))).map(|b| b.is_available);
        assert_eq!(created, Ok(true));
        assert_eq!(books.len(), 1);
    }

    #[test]
    fn create_rejects_duplicate_isbn() {
        let mut books = seeded();
        let result = books.create(NewBook::new("Another", "Someone", Isbn(12345)));
        assert_eq!(result, Err(CatalogError::DuplicateIsbn(Isbn(12345))));
        assert_eq!(books.len(), 3);
    }

    #[test]
    fn seed_with_duplicates_is_rejected() {
        let seed = vec![NewBook::new("A", "X", Isbn(7)), NewBook::new("B", "Y", Isbn(7))];
        let result = BookCollection::with_seed(seed);
        assert!(matches!(result, Err(CatalogError::DuplicateIsbn(Isbn(7)))));
    }

    #[test]
    fn find_prefers_title_over_isbn() {
        let books = seeded();
        let query = BookQuery {
            title: Some("To Kill a Mockingbird".to_string()),
            isbn: Some(Isbn(12345)),
            author: None,
        };
        let found = books.find(&query).to_books();
        assert_eq!(found.len(), 1);
        assert!(found.iter().all(|b| b.isbn == Isbn(57369)));
    }

    #[test]
    fn find_by_author_returns_all_matches_in_order() {
        let books = seeded();
        let found = books.find(&BookQuery::by_author("J.K Rowling")).to_books();
        let isbns: Vec<Isbn> = found.iter().map(|b| b.isbn).collect();
        assert_eq!(isbns, vec![Isbn(12345), Isbn(12346)]);
    }

    #[test]
    fn find_is_exact_match_only() {
        let books = seeded();
        assert!(books.find(&BookQuery::by_title("to kill a mockingbird")).is_empty());
        assert!(books.find(&BookQuery::by_author("Rowling")).is_empty());
        assert_eq!(books.find(&BookQuery::by_isbn(Isbn(99999))), BookSearch::Single(None));
    }

    #[test]
    fn find_without_criteria_returns_nothing() {
        assert_eq!(seeded().find(&BookQuery::default()), BookSearch::NoCriteria);
    }

    #[test]
    fn delete_removes_and_returns_book() {
        let mut books = seeded();
        let removed = books.delete(Isbn(57369)).map(|b| b.title);
        assert_eq!(removed, Ok("To Kill a Mockingbird".to_string()));
        assert!(books.get(Isbn(57369)).is_none());
        assert_eq!(books.delete(Isbn(57369)), Err(CatalogError::BookNotFound(Isbn(57369))));
    }
}
