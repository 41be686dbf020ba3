//! In-memory ordered container of book records.
//!
//! The [`BookCollection`] knows nothing about the menu or the terminal. Records
//! are kept in front-to-back order, most recently inserted first. Identifiers
//! are not unique; operations keyed by id act on the first match from the
//! front.

use std::collections::{TryReserveError, VecDeque, vec_deque};

use thiserror::Error;
use tracing::instrument;

use crate::domain::{Book, BookId};

/// Errors that can occur when mutating a [`BookCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Storage for a new record could not be allocated.
    #[error("memory allocation failed")]
    AllocationFailure(#[from] TryReserveError),

    /// No record with the given id is held.
    #[error("book with ID {0} not found")]
    NotFound(BookId),
}

/// An ordered collection of book records.
#[derive(Debug, Default, Clone)]
pub struct BookCollection {
    books: VecDeque<Book>,
}

impl BookCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            books: VecDeque::new(),
        }
    }

    /// Creates an empty collection with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            books: VecDeque::with_capacity(capacity),
        }
    }

    /// Adds a new record at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::AllocationFailure`] if storage for the record
    /// cannot be reserved. The collection is unchanged in that case.
    #[instrument(level = "debug", skip(self, title, author))]
    pub fn insert(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.books.try_reserve(1)?;
        self.books.push_front(Book::new(id, title, author));
        tracing::debug!(len = self.books.len(), "inserted book");
        Ok(())
    }

    /// Removes the first record (front-to-back) whose id matches, returning
    /// it.
    ///
    /// The relative order of the remaining records is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no record has the given id.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_by_id(&mut self, id: BookId) -> Result<Book, CatalogError> {
        let removed = self
            .books
            .iter()
            .position(|book| book.id() == id)
            .and_then(|index| self.books.remove(index))
            .ok_or(CatalogError::NotFound(id))?;

        tracing::debug!(len = self.books.len(), "removed book");
        Ok(removed)
    }

    /// Returns all records in front-to-back order.
    pub fn list_all(&self) -> vec_deque::Iter<'_, Book> {
        self.books.iter()
    }

    /// Returns the first record whose title equals `title` exactly.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title() == title)
    }

    /// Returns the first record whose author equals `author` exactly.
    #[must_use]
    pub fn find_by_author(&self, author: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.author() == author)
    }

    /// Returns the number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns `true` if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for &'a BookCollection {
    type Item = &'a Book;
    type IntoIter = vec_deque::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.list_all()
    }
}
