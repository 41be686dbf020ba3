//! Sources of menu selections and field input.
//!
//! The [`LinePrompter`] reads plain lines and suits piped or scripted input.
//! The [`TerminalPrompter`] drives interactive `dialoguer` widgets.

use std::io::{BufRead, Write};

use anyhow::Context;
use dialoguer::{
    Input, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};

use super::menu::Action;

/// The outcome of asking for a menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Action(Action),
    /// Input that names no menu entry.
    Invalid(String),
}

/// Asks the user for menu selections and field values.
pub trait Prompter {
    /// Asks for a menu selection among `actions`.
    ///
    /// Returns `None` once input is exhausted.
    fn choose(&mut self, actions: &[Action]) -> anyhow::Result<Option<Choice>>;

    /// Asks for one line of text, without its line terminator.
    ///
    /// Returns `None` once input is exhausted.
    fn input(&mut self, label: &str) -> anyhow::Result<Option<String>>;
}

/// Reads selections and values line by line.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Creates a prompter reading from `reader` and printing prompts to
    /// `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads one line without its terminator.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// stray byte in a field never ends the session.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut bytes)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        // Only the terminator is stripped; field values are compared exactly.
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        let line = String::from_utf8(bytes).unwrap_or_else(|e| {
            tracing::warn!("input is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        });
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn choose(&mut self, actions: &[Action]) -> anyhow::Result<Option<Choice>> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "========== Book Library Management System =========="
        )?;
        for action in actions {
            writeln!(self.writer, "{}. {action}", action.number())?;
        }
        writeln!(
            self.writer,
            "===================================================="
        )?;
        write!(self.writer, "Choose an option: ")?;
        self.writer.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(None);
        };

        let selected = line
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|number| actions.iter().find(|action| action.number() == number));

        Ok(Some(selected.map_or_else(
            || Choice::Invalid(line),
            |action| Choice::Action(*action),
        )))
    }

    fn input(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.writer, "{label}: ")?;
        self.writer.flush()?;
        self.read_line()
    }
}

/// Interactive prompts rendered with `dialoguer`.
pub struct TerminalPrompter {
    theme: Box<dyn Theme>,
}

impl TerminalPrompter {
    pub fn new(color: bool) -> Self {
        let theme: Box<dyn Theme> = if color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self { theme }
    }
}

impl std::fmt::Debug for TerminalPrompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPrompter").finish_non_exhaustive()
    }
}

impl Prompter for TerminalPrompter {
    fn choose(&mut self, actions: &[Action]) -> anyhow::Result<Option<Choice>> {
        let selection = Select::with_theme(self.theme.as_ref())
            .with_prompt("Choose an option")
            .items(actions)
            .default(0)
            .interact_opt()
            .context("failed to read menu selection")?;

        // Escape leaves the menu.
        let action = selection
            .and_then(|index| actions.get(index).copied())
            .unwrap_or(Action::Exit);
        Ok(Some(Choice::Action(action)))
    }

    fn input(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        let value = Input::<String>::with_theme(self.theme.as_ref())
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("failed to read '{label}'"))?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use test_case::test_case;

    use super::*;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test_case("1\n", Action::Add; "add")]
    #[test_case("  3 \n", Action::Display; "padded")]
    #[test_case("6\r\n", Action::Exit; "crlf")]
    #[test_case("5", Action::SearchByAuthor; "no terminator")]
    fn selects_action_by_number(input: &str, expected: Action) {
        let choice = prompter(input).choose(&Action::ALL).unwrap();
        assert_eq!(choice, Some(Choice::Action(expected)));
    }

    #[test_case("7\n", "7"; "out of range")]
    #[test_case("0\n", "0"; "zero")]
    #[test_case("add\n", "add"; "word")]
    #[test_case("\n", ""; "blank")]
    fn reports_invalid_selection(input: &str, raw: &str) {
        let choice = prompter(input).choose(&Action::ALL).unwrap();
        assert_eq!(choice, Some(Choice::Invalid(raw.to_string())));
    }

    #[test]
    fn closed_input_yields_none() {
        let mut prompter = prompter("");
        assert_eq!(prompter.choose(&Action::ALL).unwrap(), None);
        assert_eq!(prompter.input("Enter Book Title").unwrap(), None);
    }

    #[test]
    fn input_keeps_inner_and_leading_whitespace() {
        let mut prompter = prompter("  The  Hobbit \r\n");
        assert_eq!(
            prompter.input("Enter Book Title").unwrap().as_deref(),
            Some("  The  Hobbit ")
        );
    }

    #[test]
    fn replaces_invalid_utf8_in_input() {
        let mut prompter =
            LinePrompter::new(Cursor::new(b"\xffBad\n\xfe".to_vec()), Vec::new());

        assert_eq!(
            prompter.input("Enter Book Title").unwrap().as_deref(),
            Some("\u{fffd}Bad")
        );
        assert_eq!(
            prompter.input("Enter Author Name").unwrap().as_deref(),
            Some("\u{fffd}")
        );
        assert_eq!(prompter.input("Enter Author Name").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_selection_is_an_invalid_choice() {
        let mut prompter = LinePrompter::new(Cursor::new(b"\xff\n".to_vec()), Vec::new());
        assert_eq!(
            prompter.choose(&Action::ALL).unwrap(),
            Some(Choice::Invalid("\u{fffd}".to_string()))
        );
    }

    #[test]
    fn prints_banner_and_prompts() {
        let mut prompter = prompter("2\nTitle\n");
        prompter.choose(&Action::ALL).unwrap();
        prompter.input("Enter Book Title").unwrap();

        let printed = String::from_utf8(prompter.writer).unwrap();
        assert!(printed.contains("========== Book Library Management System =========="));
        assert!(printed.contains("1. Add a new book\n"));
        assert!(printed.contains("6. Exit\n"));
        assert!(printed.contains("Choose an option: "));
        assert!(printed.ends_with("Enter Book Title: "));
    }
}
