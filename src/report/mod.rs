//! The reports the tool can produce, and the catalog listing them

mod attendance;
mod combined;
mod correlation;
mod finance;
mod summary;

use std::fs;

use crate::cli::plot::{self, Figure};
use crate::lib::{
    catalog::{Catalog, Context, Entry, Outcome, Section},
    error::Error,
    record::Column,
};

/// Identifier 0 is the text summary, 1 to 12 are charts
pub fn catalog() -> Catalog {
    use Section::*;
    #[rustfmt::skip]
    let entries = vec![
        entry(0, "Data Summary", "Show Data Summary (Table & Statistics)", Summary, summary::data_summary),
        entry(1, "Attendance by Category", "Weekly Attendance by Category (Bar Chart)", Attendance, attendance::by_category),
        entry(2, "Total Attendance Trend", "Total Attendance Trend (Line Chart)", Attendance, attendance::trend),
        entry(3, "Saturday Service Attendance Pie Chart", "Saturday Service Attendance Distribution (Pie Chart)", Attendance, attendance::distribution),
        entry(4, "Tithe vs Offerings", "Tithe vs Offerings Comparison (Bar Chart)", Financial, finance::tithe_vs_offerings),
        entry(5, "Income Breakdown", "Income Breakdown (Stacked Area Chart)", Financial, finance::breakdown),
        entry(6, "Income Pie Chart", "Income Distribution (Pie Chart)", Financial, finance::distribution),
        entry(7, "Attendance vs Income", "Attendance vs Income Correlation (Dual Axis)", Combined, combined::attendance_vs_income),
        entry(8, "Dashboard Summary", "Complete Dashboard Summary (Multi-Panel)", Combined, combined::dashboard),
        entry(9, "Sunday Home Church vs All Funds", "Sunday Home Church vs All Funds", Correlation, correlation::home_church_vs_funds),
        entry(10, "Demographics vs Funds", "Demographics vs Funds (4 Subplots)", Correlation, correlation::groups_vs_funds),
        entry(11, "Funds vs Total Attendance", "Funds vs Total Attendance (4 Subplots)", Correlation, correlation::funds_vs_attendance),
        entry(12, "All Groups vs Each Fund (Correlation)", "All Groups vs Each Fund (Correlation Scatter)", Correlation, correlation::groups_scatter),
    ];
    Catalog::new(entries)
}

fn entry(
    id: u8,
    name: &'static str,
    caption: &'static str,
    section: Section,
    render: fn(&Context<'_>) -> Result<Outcome, Error>,
) -> Entry {
    Entry {
        id,
        name,
        caption,
        section,
        render,
    }
}

/// Write `figure` as `<out_dir>/<stem>.svg`
fn save(ctx: &Context<'_>, stem: &str, figure: Figure) -> Result<Outcome, Error> {
    fs::create_dir_all(ctx.out_dir)?;
    let path = ctx.artifact(stem);
    figure.save(&path)?;
    Ok(Outcome::Saved(path))
}

/// Color a column is drawn with in every chart
fn color(col: Column) -> &'static str {
    use Column::*;
    match col {
        Men | Offerings => plot::BLUE,
        Women | Emergency => plot::RED,
        Youth => plot::GREEN,
        Children | Planned => plot::ORANGE,
        HomeChurch | TotalAttendance => plot::PURPLE,
        Tithe | TotalIncome => plot::DARK_GREEN,
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::lib::{metrics::Frame, record::Dataset};
    use std::path::PathBuf;

    /// Scratch output directory, removed on drop
    pub struct Scratch(pub PathBuf);

    impl Scratch {
        pub fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("tally-{}-{}", name, std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            Self(dir)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn catalog_is_complete() {
        let cat = catalog();
        assert_eq!(cat.max(), 12);
        assert_eq!(cat.entries().len(), 13);
        for (i, e) in cat.entries().iter().enumerate() {
            assert_eq!(e.id as usize, i);
        }
        assert_eq!(cat.get(8).map(|e| e.name), Some("Dashboard Summary"));
    }

    #[test]
    fn every_report_renders() {
        let scratch = Scratch::new("all");
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let ctx = Context {
            frame: &frame,
            out_dir: &scratch.0,
        };
        let cat = catalog();
        let mut saved = Vec::new();
        for e in cat.entries() {
            match (e.render)(&ctx) {
                Ok(Outcome::Saved(path)) => {
                    assert!(path.starts_with(&scratch.0));
                    let contents = fs::read_to_string(&path).unwrap();
                    assert!(contents.contains("<svg"), "{} is not an svg", path.display());
                    saved.push(path.file_name().unwrap().to_string_lossy().into_owned());
                }
                Ok(Outcome::Printed(text)) => {
                    assert_eq!(e.id, 0);
                    assert!(text.contains("Rows: 10, Columns: 12"));
                }
                Err(err) => panic!("report {} failed: {}", e.id, err),
            }
        }
        assert_eq!(saved.len(), 12);
        assert!(saved.contains(&"attendance_by_category.svg".to_string()));
        assert!(saved.contains(&"groups_vs_funds_correlation.svg".to_string()));
        saved.sort();
        saved.dedup();
        assert_eq!(saved.len(), 12);
    }
}
