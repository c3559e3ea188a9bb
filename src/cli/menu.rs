//! Interactive loop: menu, selection prompt, generation, pause

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::lib::{
    catalog::{Catalog, Context, Entry, Outcome},
    dispatch::{BatchReport, Dispatcher, FailurePolicy, Observer},
    error::Error,
    select::{Selection, Selector, ALL_TOKEN, QUIT_TOKEN},
};

const WIDTH: usize = 70;
const PROMPT: &str = "Enter your choice(s) (e.g., 1,3,5 or 1-12 or 99 for all): ";

/// Prints progress of a batch to `out`
///
/// `Observer` callbacks cannot fail, so the first failed write is logged
/// and later ones are dropped.
pub struct Console<'a, W: Write> {
    out: &'a mut W,
    catalog: &'a Catalog,
    broken: bool,
}

impl<'a, W: Write> Console<'a, W> {
    pub fn new(out: &'a mut W, catalog: &'a Catalog) -> Self {
        Self {
            out,
            catalog,
            broken: false,
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{}", args) {
            if !self.broken {
                log::warn!("progress output lost: {}", err);
                self.broken = true;
            }
        }
    }
}

impl<W: Write> Observer for Console<'_, W> {
    fn started(&mut self, entry: &Entry) {
        self.line(format_args!("\n> Generating: {}", entry.name));
    }

    fn finished(&mut self, _: &Entry, outcome: &Outcome) {
        match outcome {
            Outcome::Saved(path) => {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                self.line(format_args!("Saved: {}", name));
            }
            Outcome::Printed(text) => self.line(format_args!("{}", text)),
        }
    }

    fn failed(&mut self, entry: &Entry, err: &Error) {
        self.line(format_args!("Failed: {} ({})", entry.name, err));
    }

    fn completed(&mut self, report: &BatchReport) {
        if !report.is_success() {
            let record = report.diagnostics(self.catalog);
            self.line(format_args!("\n{}", record));
        }
        let rule = "=".repeat(WIDTH);
        self.line(format_args!("\n{}", rule));
        self.line(format_args!(
            "Generation complete! {} generated, {} failed, {} skipped",
            report.succeeded.len(),
            report.failed.len(),
            report.skipped.len()
        ));
        self.line(format_args!("{}", rule));
    }
}

/// One interactive session over `input` and `out`
pub struct Session<'a, R, W> {
    catalog: &'a Catalog,
    ctx: Context<'a>,
    policy: FailurePolicy,
    pause: bool,
    input: R,
    out: W,
}

impl<'a, R, W> Session<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(catalog: &'a Catalog, ctx: Context<'a>, policy: FailurePolicy, pause: bool, input: R, out: W) -> Self {
        Self {
            catalog,
            ctx,
            policy,
            pause,
            input,
            out,
        }
    }

    fn selector(&self) -> Selector {
        Selector::new(self.catalog.max())
    }

    /// Menu loop until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", "=".repeat(WIDTH))?;
        writeln!(self.out, "  Welcome to the Church Data Analysis Tool")?;
        writeln!(self.out, "  {}", chrono::Local::now().format("%A %d %B %Y"))?;
        writeln!(self.out, "{}", "=".repeat(WIDTH))?;
        while let Some(selection) = self.ask()? {
            self.generate(&selection)?;
            if self.pause {
                write!(self.out, "\nPress Enter to continue...")?;
                self.out.flush()?;
                if self.read_line()?.is_none() {
                    break;
                }
            }
        }
        writeln!(self.out, "\nThank you for using the Church Data Analysis Tool!")?;
        Ok(())
    }

    /// Generate one selection given as text, `None` if it asks to quit
    pub fn run_once(&mut self, line: &str) -> Result<Option<BatchReport>, Error> {
        let max = self.catalog.max();
        match self.selector().parse(line)?.into_selection(max) {
            Some(selection) => Ok(Some(self.generate(&selection)?)),
            None => Ok(None),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn generate(&mut self, selection: &Selection) -> io::Result<BatchReport> {
        writeln!(self.out, "\n{}", "=".repeat(WIDTH))?;
        writeln!(self.out, "Generating {} selected item(s)...", selection.len())?;
        writeln!(self.out, "{}", "=".repeat(WIDTH))?;
        let mut console = Console::new(&mut self.out, self.catalog);
        Ok(Dispatcher::new(self.catalog, self.policy).run(selection, &self.ctx, &mut console))
    }

    /// Show the menu and prompt until the input is a valid selection
    fn ask(&mut self) -> io::Result<Option<Selection>> {
        self.print_menu()?;
        let selector = self.selector();
        loop {
            write!(self.out, "\n{}", PROMPT)?;
            self.out.flush()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            match selector.parse(&line) {
                Ok(request) => return Ok(request.into_selection(selector.max())),
                Err(err) => {
                    let label = match err {
                        Error::InvalidSelection { .. } => "Invalid selection",
                        _ => "Invalid input",
                    };
                    write!(self.out, "{}", err.diagnose(label).nonfatal())?;
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let rule = "-".repeat(WIDTH);
        writeln!(self.out, "\n{}", "=".repeat(WIDTH))?;
        writeln!(self.out, "{:^width$}", "CHURCH DATA ANALYSIS - GRAPH GENERATOR", width = WIDTH)?;
        writeln!(self.out, "{}", "=".repeat(WIDTH))?;
        writeln!(self.out, "\nAvailable Graphs:")?;
        let mut section = None;
        for entry in self.catalog.entries() {
            if section != Some(entry.section) {
                writeln!(self.out, "{}", rule)?;
                if section.is_some() {
                    writeln!(self.out, "  {}:", entry.section)?;
                }
                section = Some(entry.section);
            }
            writeln!(self.out, " {:>2}. {}", entry.id, entry.caption)?;
        }
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, " {:>2}. Generate ALL Graphs", ALL_TOKEN)?;
        writeln!(self.out, " {:>2}. Quit", QUIT_TOKEN)?;
        writeln!(self.out, "{}", "=".repeat(WIDTH))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::{metrics::Frame, record::Dataset};
    use crate::report::{self, test::Scratch};
    use std::io::Cursor;
    use std::path::Path;

    macro_rules! session {
        ( $input:expr, $frame:expr, $cat:expr, $dir:expr ) => {
            Session::new(
                &$cat,
                Context { frame: &$frame, out_dir: $dir },
                FailurePolicy::Continue,
                true,
                Cursor::new($input.as_bytes().to_vec()),
                Vec::new(),
            )
        };
    }

    fn output<R: BufRead>(session: Session<'_, R, Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn reprompts_until_valid_then_quits() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let mut session = session!("abc\n13\n0\n\nq\n", frame, cat, Path::new("unused"));
        session.run().unwrap();
        let out = output(session);
        assert!(out.contains("Invalid input"));
        assert!(out.contains("invalid token 'ABC'"));
        assert!(out.contains("Invalid selection"));
        assert!(out.contains("Generating 1 selected item(s)..."));
        assert!(out.contains("> Generating: Data Summary"));
        assert!(out.contains("Rows: 10, Columns: 12"));
        assert!(out.contains("Generation complete! 1 generated, 0 failed, 0 skipped"));
        assert!(out.contains("Press Enter to continue..."));
        assert!(out.contains("Thank you"));
        // menu shown once per batch
        assert_eq!(out.matches("Available Graphs:").count(), 2);
    }

    #[test]
    fn end_of_input_quits() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let mut session = session!("", frame, cat, Path::new("unused"));
        session.run().unwrap();
        assert!(output(session).contains("Thank you"));
    }

    #[test]
    fn menu_lists_every_report() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let mut session = session!("q\n", frame, cat, Path::new("unused"));
        session.run().unwrap();
        let out = output(session);
        for entry in cat.entries() {
            assert!(out.contains(entry.caption), "missing {}", entry.caption);
        }
        assert!(out.contains("ATTENDANCE GRAPHS:"));
        assert!(out.contains(" 99. Generate ALL Graphs"));
        assert!(out.contains("  Q. Quit"));
    }

    #[test]
    fn single_batch() {
        let scratch = Scratch::new("menu");
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let mut session = session!("", frame, cat, &scratch.0);
        let report = session.run_once("3,1").unwrap().unwrap();
        assert_eq!(report.succeeded, vec![1, 3]);
        assert!(scratch.0.join("attendance_by_category.svg").exists());
        assert!(scratch.0.join("attendance_distribution_pie.svg").exists());
        let out = output(session);
        let first = out.find("Attendance by Category").unwrap();
        let second = out.find("Saturday Service Attendance Pie Chart").unwrap();
        assert!(first < second);
        assert!(out.contains("Saved: attendance_by_category.svg"));

        let mut session = session!("", frame, cat, &scratch.0);
        assert!(session.run_once("Q").unwrap().is_none());
        assert!(matches!(session.run_once("5-2"), Err(Error::Parse { .. })));
    }

    struct Closed(usize);

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            self.0 += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn console_survives_closed_output() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let ctx = Context {
            frame: &frame,
            out_dir: Path::new("unused"),
        };
        let mut out = Closed(0);
        let mut console = Console::new(&mut out, &cat);
        let report = Dispatcher::new(&cat, FailurePolicy::Continue).run(
            &Selection::new(vec![0]),
            &ctx,
            &mut console,
        );
        assert!(console.broken);
        assert_eq!(report.succeeded, vec![0]);
        assert!(out.0 > 1);
    }

    #[test]
    fn session_reports_closed_output() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let cat = report::catalog();
        let ctx = Context {
            frame: &frame,
            out_dir: Path::new("unused"),
        };
        let mut session = Session::new(
            &cat,
            ctx,
            FailurePolicy::Continue,
            false,
            Cursor::new(b"0\n".to_vec()),
            Closed(0),
        );
        assert!(session.run().is_err());
        assert!(matches!(session.run_once("0"), Err(Error::Render(_))));
    }
}
