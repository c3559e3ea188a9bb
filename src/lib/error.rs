//! Error taxonomy and pretty-printing of diagnostics
//!
//! `Error` is what every fallible operation returns. `Diagnostic` and `Record`
//! are for presenting errors to the user: a diagnostic aggregates a label,
//! notes and hints, and a record collects the diagnostics of one batch.
//!
//! # Example
//!
//! ```txt
//! --> Error: Dashboard Summary
//!  |  division by zero while computing week-over-week growth
//!  |      ? hint: check that no week has zero attendance
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io;

use thiserror::Error;

use crate::lib::select::ALL_TOKEN;

/// Failure of a selection, derivation or rendering step
#[derive(Debug, Error)]
pub enum Error {
    /// malformed token or backwards range in a selection
    #[error("invalid token '{token}'")]
    Parse { token: String },
    /// syntactically valid selection with nothing inside `0..=max`
    #[error("no report between 0 and {max} was selected")]
    InvalidSelection { max: u8 },
    /// share or growth computed against a zero denominator
    #[error("division by zero while computing {what}")]
    DivisionByZero { what: &'static str },
    #[error("service week '{0}' is recorded twice")]
    DuplicateWeek(String),
    #[error("dataset contains no service week")]
    EmptyDataset,
    #[error("no report with identifier {0}")]
    UnknownReport(u8),
    #[error("failed to write report: {0}")]
    Render(#[from] io::Error),
}

/// Report for a single problem
///
/// All messages (`label` passed with `new`, arguments of `with_hint`
/// and `with_text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Diagnostic {
    /// determines the label (warning/error) and the color (yellow/red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of diagnostics, typically those of one batch of reports
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    fatal: usize,
    contents: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that an error
    pub fn nonfatal(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// Add an important note
    pub fn with_text<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn with_hint<S>(mut self, msg: S) -> Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    /// Consume the diagnostic and add it to `record`
    pub fn register(self, record: &mut Record) {
        record.register(self);
    }
}

impl Error {
    /// What the user can do about it, if anything
    pub fn hint(&self) -> Option<Cow<'static, str>> {
        match self {
            Error::Parse { .. } => Some(Cow::Borrowed("use a format like: 1,3,5 or 1-12 or 99")),
            Error::InvalidSelection { max } => Some(Cow::Owned(format!(
                "enter numbers between 0-{} or {}",
                max, ALL_TOKEN
            ))),
            Error::DivisionByZero { .. } => Some(Cow::Borrowed("check that the dataset has no empty week")),
            Error::Render(_) => Some(Cow::Borrowed("check that the output directory is writable")),
            _ => None,
        }
    }

    /// Wrap into a diagnostic labeled `label`
    pub fn diagnose<S>(&self, label: S) -> Diagnostic
    where
        S: ToString,
    {
        let diag = Diagnostic::new(label).with_text(self);
        match self.hint() {
            Some(hint) => diag.with_hint(hint),
            None => diag,
        }
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of fatal diagnostics
    pub fn count_errors(&self) -> usize {
        self.fatal
    }

    /// Number of nonfatal diagnostics
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.fatal
    }

    fn register(&mut self, diag: Diagnostic) {
        if diag.fatal {
            self.fatal += 1;
        }
        self.contents.push(diag);
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for diag in &self.contents {
            writeln!(f, "{}", diag)?;
        }
        let errors = self.count_errors();
        let warnings = self.count_warnings();
        let plural = |n: usize| if n > 1 { "s" } else { "" };
        if errors > 0 {
            writeln!(f, "{}Failed: {}{} report{}{}", RED, WHITE, errors, plural(errors), NONE)?;
        }
        if warnings > 0 {
            writeln!(f, "{}Skipped: {}{} report{}{}", YELLOW, WHITE, warnings, plural(warnings), NONE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record_counts() {
        let mut rec = Record::new();
        assert!(rec.is_empty());
        Diagnostic::new("Income Pie Chart")
            .with_text("disk full")
            .register(&mut rec);
        Diagnostic::new("Dashboard Summary")
            .nonfatal()
            .with_text("skipped")
            .register(&mut rec);
        assert_eq!(Record::new().to_string(), "");
        assert_eq!(rec.count_errors(), 1);
        assert_eq!(rec.count_warnings(), 1);
        let shown = rec.to_string();
        assert!(shown.contains("--> Error"));
        assert!(shown.contains("--> Warning"));
        assert!(shown.contains("Income Pie Chart"));
    }

    #[test]
    fn diagnose_adds_hint() {
        let err = Error::Parse { token: "x".to_string() };
        let shown = err.diagnose("Invalid input").to_string();
        assert!(shown.contains("invalid token 'x'"));
        assert!(shown.contains("? hint: use a format like"));
        let shown = Error::EmptyDataset.diagnose("Load").to_string();
        assert!(!shown.contains("hint"));
    }

    #[test]
    fn selection_hint_follows_catalog_size() {
        let hint = |max| Error::InvalidSelection { max }.hint().unwrap().into_owned();
        assert_eq!(hint(12), "enter numbers between 0-12 or 99");
        assert_eq!(hint(4), "enter numbers between 0-4 or 99");
    }
}
