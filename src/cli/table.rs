use std::fmt;

use crate::lib::{
    metrics::{self, Frame},
    record::Column,
};

/// Box-drawn text table with a label column
pub struct Table {
    title: Option<String>,
    columns: Vec<String>,
    lines: Vec<(String, Vec<String>)>,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self {
            title: None,
            columns: columns.into_iter().map(|c| c.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    pub fn with_title<S>(mut self, title: S) -> Self
    where
        S: ToString,
    {
        self.title = Some(title.to_string());
        self
    }

    pub fn push_line<S>(&mut self, label: S, cells: Vec<String>)
    where
        S: ToString,
    {
        self.lines.push((label.to_string(), cells));
    }

    /// One line per week, one column per numeric column
    pub fn records(frame: &Frame) -> Self {
        let mut table = Table::new(Column::all().map(Column::header)).with_title("Records");
        for (i, week) in frame.weeks().iter().enumerate() {
            let cells = Column::all()
                .map(|col| format!("{}", frame.column(col)[i]))
                .collect();
            table.push_line(week, cells);
        }
        table
    }

    /// count, mean, std, min, quartiles and max of every numeric column
    pub fn describe(frame: &Frame) -> Self {
        let stats = Column::all()
            .map(|col| metrics::describe(frame.column(col)))
            .collect::<Vec<_>>();
        let mut table = Table::new(Column::all().map(Column::header)).with_title("Statistical Summary");
        let row = |f: &dyn Fn(&metrics::Description) -> String| {
            stats
                .iter()
                .map(|d| d.as_ref().map(f).unwrap_or_else(|| "NaN".to_string()))
                .collect::<Vec<_>>()
        };
        table.push_line("count", row(&|d| format!("{}", d.count)));
        table.push_line("mean", row(&|d| format!("{:.2}", d.mean)));
        table.push_line(
            "std",
            row(&|d| d.std.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "NaN".to_string())),
        );
        table.push_line("min", row(&|d| format!("{:.2}", d.min)));
        table.push_line("25%", row(&|d| format!("{:.2}", d.q25)));
        table.push_line("50%", row(&|d| format!("{:.2}", d.q50)));
        table.push_line("75%", row(&|d| format!("{:.2}", d.q75)));
        table.push_line("max", row(&|d| format!("{:.2}", d.max)));
        table
    }

    fn to_formatter(&self) -> GridFmt {
        let cols = self
            .columns
            .iter()
            .map(|c| ColFmt::with_label(BoxFmt::from(c.clone())))
            .collect::<Vec<_>>();
        let mut grid = GridFmt::with_columns(cols);
        for (label, cells) in &self.lines {
            grid.push_line(
                BoxFmt::from(label.clone()),
                cells.iter().map(|c| BoxFmt::from(c.clone())).collect(),
            );
        }
        grid
    }
}

/// Integer with thousands separators: `1234567` -> `1,234,567`
pub fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl BoxFmt {
    fn from(text: String) -> Self {
        let width = text.chars().count();
        Self { text, width }
    }
}

impl ColFmt {
    fn with_label(label: BoxFmt) -> Self {
        Self {
            width: label.width,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(BoxFmt::from(String::new())),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            if let Some(col) = self.columns.get_mut(i) {
                col.push(b);
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "--- {} ---", title)?;
        }
        write!(f, "{}", self.to_formatter())
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;

        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx, false)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx, true)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, true)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize, right: bool) -> fmt::Result {
        match self.boxes.get(idx) {
            Some(b) => b.write(f, self.width, right),
            None => BoxFmt::from(String::new()).write(f, self.width, right),
        }
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";

impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::record::Dataset;

    #[test]
    fn thousands() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1234567), "1,234,567");
    }

    #[test]
    fn aligned_grid() {
        let mut table = Table::new(vec!["A", "LONGER"]).with_title("T");
        table.push_line("x", vec!["1".to_string(), "22".to_string()]);
        table.push_line("yy", vec!["333".to_string(), "4".to_string()]);
        let shown = table.to_string();
        let lines = shown.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "--- T ---");
        assert_eq!(lines[1], "┌────┬─────┬────────┐");
        assert_eq!(lines[2], "│    │   A │ LONGER │");
        assert_eq!(lines[4], "│ x  │   1 │     22 │");
        assert_eq!(lines[5], "│ yy │ 333 │      4 │");
        assert_eq!(lines[6], "└────┴─────┴────────┘");
        // every line has the same display width
        let widths = lines[1..].iter().map(|l| l.chars().count()).collect::<Vec<_>>();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn record_and_summary_tables() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let records = Table::records(&frame).to_string();
        assert!(records.contains("NO10"));
        assert!(records.contains("1886"));
        assert!(records.contains("TOTAL INCOME"));
        let stats = Table::describe(&frame).to_string();
        for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
            assert!(stats.contains(label), "missing {}", label);
        }
        // 10 weeks in every column
        assert!(stats.contains(" 10 "));
    }
}
