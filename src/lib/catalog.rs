//! Fixed table of reports, keyed by identifier

use std::fmt;
use std::path::{Path, PathBuf};

use crate::lib::{error::Error, metrics::Frame};

/// Everything a report reads
pub struct Context<'d> {
    pub frame: &'d Frame,
    pub out_dir: &'d Path,
}

impl Context<'_> {
    /// Where the artifact with base name `stem` goes
    pub fn artifact(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{}.svg", stem))
    }
}

/// How a report signals its completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// an image was written
    Saved(PathBuf),
    /// text to show instead of an image
    Printed(String),
}

pub type Render = fn(&Context<'_>) -> Result<Outcome, Error>;

/// Menu heading a report is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Attendance,
    Financial,
    Combined,
    Correlation,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Section::Summary => "SUMMARY",
            Section::Attendance => "ATTENDANCE GRAPHS",
            Section::Financial => "FINANCIAL GRAPHS",
            Section::Combined => "COMBINED ANALYSIS",
            Section::Correlation => "CORRELATION GRAPHS",
        };
        write!(f, "{}", text)
    }
}

#[derive(Clone, Copy)]
pub struct Entry {
    pub id: u8,
    /// shown when the report starts
    pub name: &'static str,
    /// shown in the menu
    pub caption: &'static str,
    pub section: Section,
    pub render: Render,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// Immutable id-to-report table with identifiers `0..=max`
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Entries must be listed by increasing identifier, starting at 0, without gaps
    pub fn new(entries: Vec<Entry>) -> Self {
        debug_assert!(entries.iter().enumerate().all(|(i, e)| e.id as usize == i));
        Self { entries }
    }

    pub fn get(&self, id: u8) -> Option<&Entry> {
        self.entries.get(id as usize)
    }

    /// Largest valid identifier
    pub fn max(&self) -> u8 {
        self.entries.last().map(|e| e.id).unwrap_or(0)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn noop(_: &Context<'_>) -> Result<Outcome, Error> {
        Ok(Outcome::Printed(String::new()))
    }

    #[test]
    fn lookup() {
        let mk = |id, name| Entry {
            id,
            name,
            caption: name,
            section: Section::Summary,
            render: noop,
        };
        let cat = Catalog::new(vec![mk(0, "zero"), mk(1, "one"), mk(2, "two")]);
        assert_eq!(cat.max(), 2);
        assert_eq!(cat.entries().len(), 3);
        assert_eq!(cat.get(1).map(|e| e.name), Some("one"));
        assert!(cat.get(3).is_none());
    }

    #[test]
    fn artifact_path() {
        let frame = Frame::derive(&crate::lib::record::Dataset::builtin().unwrap());
        let ctx = Context {
            frame: &frame,
            out_dir: Path::new("out"),
        };
        assert_eq!(ctx.artifact("pie"), Path::new("out").join("pie.svg"));
    }
}
