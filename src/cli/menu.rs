use std::{fmt, io::Write, ops::ControlFlow};

use catalog::{BookCollection, BookId, CatalogError, Config};
use tracing::instrument;

use super::{
    prompt::{Choice, Prompter},
    terminal::Palette,
};

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Display,
    SearchByTitle,
    SearchByAuthor,
    Exit,
}

impl Action {
    /// Every entry, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Remove,
        Self::Display,
        Self::SearchByTitle,
        Self::SearchByAuthor,
        Self::Exit,
    ];

    /// The number a user types to select this entry.
    pub const fn number(self) -> u8 {
        match self {
            Self::Add => 1,
            Self::Remove => 2,
            Self::Display => 3,
            Self::SearchByTitle => 4,
            Self::SearchByAuthor => 5,
            Self::Exit => 6,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Self::Add => "Add a new book",
            Self::Remove => "Remove a book",
            Self::Display => "Display all books",
            Self::SearchByTitle => "Search for a book by title",
            Self::SearchByAuthor => "Search for a book by author",
            Self::Exit => "Exit",
        };
        write!(f, "{label}")
    }
}

/// Which text field a search matches against.
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Author,
}

/// An interactive session over a single [`BookCollection`].
///
/// The session owns the collection; it is released when the session is
/// dropped.
pub struct Menu<P, W> {
    books: BookCollection,
    prompter: P,
    out: W,
    palette: Palette,
    max_title_len: usize,
    max_author_len: usize,
}

impl<P: Prompter, W: Write> Menu<P, W> {
    pub const fn new(prompter: P, out: W, config: &Config, palette: Palette) -> Self {
        Self {
            books: BookCollection::new(),
            prompter,
            out,
            palette,
            max_title_len: config.max_title_len(),
            max_author_len: config.max_author_len(),
        }
    }

    #[cfg(test)]
    pub const fn books(&self) -> &BookCollection {
        &self.books
    }

    /// Runs the menu until the user exits or input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let flow = match self.prompter.choose(&Action::ALL)? {
                Some(Choice::Action(action)) => self.perform(action)?,
                Some(Choice::Invalid(input)) => {
                    tracing::debug!(input = %input, "invalid menu choice");
                    self.warn("Invalid choice! Please choose again.")?;
                    ControlFlow::Continue(())
                }
                None => {
                    tracing::debug!("input closed");
                    ControlFlow::Break(())
                }
            };

            if flow.is_break() {
                return self.exit();
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    fn perform(&mut self, action: Action) -> anyhow::Result<ControlFlow<()>> {
        match action {
            Action::Add => self.add(),
            Action::Remove => self.remove(),
            Action::Display => {
                self.display()?;
                Ok(ControlFlow::Continue(()))
            }
            Action::SearchByTitle => self.search(Field::Title),
            Action::SearchByAuthor => self.search(Field::Author),
            Action::Exit => Ok(ControlFlow::Break(())),
        }
    }

    fn add(&mut self) -> anyhow::Result<ControlFlow<()>> {
        let Some(raw_id) = self.prompter.input("Enter Book ID")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(id) = self.parse_id(&raw_id)? else {
            return Ok(ControlFlow::Continue(()));
        };
        let Some(title) = self.prompter.input("Enter Book Title")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(author) = self.prompter.input("Enter Author Name")? else {
            return Ok(ControlFlow::Break(()));
        };

        let title = truncate(title, self.max_title_len, "title");
        let author = truncate(author, self.max_author_len, "author");

        match self.books.insert(id, title, author) {
            Ok(()) => self.succeed("Book added successfully!")?,
            Err(e) => {
                tracing::error!("{e}");
                self.warn("Memory allocation failed!")?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn remove(&mut self) -> anyhow::Result<ControlFlow<()>> {
        let Some(raw_id) = self.prompter.input("Enter Book ID to remove")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(id) = self.parse_id(&raw_id)? else {
            return Ok(ControlFlow::Continue(()));
        };

        match self.books.remove_by_id(id) {
            Ok(_) => self.succeed(&format!("Book with ID {id} removed successfully!"))?,
            Err(CatalogError::NotFound(id)) => {
                self.warn(&format!("Book with ID {id} not found."))?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn display(&mut self) -> anyhow::Result<()> {
        if self.books.is_empty() {
            writeln!(self.out, "{}", self.palette.dim("No books in the library."))?;
            return Ok(());
        }
        for book in &self.books {
            writeln!(self.out, "{book}")?;
        }
        Ok(())
    }

    /// Looks up the first record whose title or author equals the query.
    ///
    /// The query is cut to the same character limit as stored fields before
    /// matching, so a query longer than the limit finds the record stored
    /// under its truncated prefix.
    fn search(&mut self, field: Field) -> anyhow::Result<ControlFlow<()>> {
        let label = match field {
            Field::Title => "Enter Book Title to search",
            Field::Author => "Enter Author Name to search",
        };
        let Some(query) = self.prompter.input(label)? else {
            return Ok(ControlFlow::Break(()));
        };

        let found = match field {
            Field::Title => self
                .books
                .find_by_title(&truncate(query, self.max_title_len, "title")),
            Field::Author => self
                .books
                .find_by_author(&truncate(query, self.max_author_len, "author")),
        };

        match found.map(|book| format!("Found Book: {book}")) {
            Some(message) => writeln!(self.out, "{}", self.palette.info(&message))?,
            None => self.warn("Book not found.")?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn exit(&mut self) -> anyhow::Result<()> {
        tracing::info!(released = self.books.len(), "closing catalog");
        writeln!(self.out, "Exiting the library management system.")?;
        self.out.flush()?;
        Ok(())
    }

    /// Parses a book id, reporting unparseable input to the user.
    fn parse_id(&mut self, raw: &str) -> anyhow::Result<Option<BookId>> {
        match raw.parse() {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                tracing::debug!(input = raw, "invalid book id: {e}");
                self.warn(&format!("Invalid book ID '{}'.", raw.trim()))?;
                Ok(None)
            }
        }
    }

    fn succeed(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", self.palette.success(message))
    }

    fn warn(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", self.palette.warning(message))
    }
}

/// Keeps at most `max` characters of `text`.
fn truncate(mut text: String, max: usize, field: &str) -> String {
    if let Some((end, _)) = text.char_indices().nth(max) {
        tracing::warn!(field, max, "input truncated");
        text.truncate(end);
    }
    text
}
