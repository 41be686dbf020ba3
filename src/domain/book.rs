use std::{fmt, num::ParseIntError, str::FromStr};

/// Caller-supplied identifier of a book.
///
/// Identifiers are not required to be unique within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(i32);

impl BookId {
    /// Creates a new identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for BookId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    /// Parses an identifier, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single book record.
///
/// Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
}

impl Book {
    /// Creates a new book record.
    #[must_use]
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }

    /// Returns the record's identifier.
    #[must_use]
    pub const fn id(&self) -> BookId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}",
            self.id, self.title, self.author
        )
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("42", 42; "plain")]
    #[test_case("  7\n", 7; "surrounding whitespace")]
    #[test_case("-3", -3; "negative")]
    #[test_case("0", 0; "zero")]
    fn parses_book_id(input: &str, expected: i32) {
        let id: BookId = input.parse().unwrap();
        assert_eq!(id.get(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("abc"; "letters")]
    #[test_case("1.5"; "fraction")]
    #[test_case("99999999999"; "overflow")]
    fn rejects_invalid_book_id(input: &str) {
        assert!(input.parse::<BookId>().is_err());
    }

    #[test]
    fn displays_record_on_one_line() {
        let book = Book::new(BookId::new(1), "Dune", "Frank Herbert");
        assert_eq!(book.to_string(), "ID: 1, Title: Dune, Author: Frank Herbert");
    }

    #[test]
    fn accessors_return_fields() {
        let book = Book::new(5.into(), "Emma", "Jane Austen");
        assert_eq!(book.id(), BookId::new(5));
        assert_eq!(book.title(), "Emma");
        assert_eq!(book.author(), "Jane Austen");
    }
}
