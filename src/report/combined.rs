use std::fmt;

use super::{color, save};
use crate::cli::{
    plot::{Chart, Figure, HBarChart, Mark, Note, Panel, Series, DARK_GREEN, RED},
    table::grouped,
};
use crate::lib::{
    catalog::{Context, Outcome},
    error::Error,
    metrics::{self, Extremum, Frame},
    record::Column,
};

const X_LABEL: &str = "Saturday Service";

/// Total attendance on the left axis, total income on the right
pub fn attendance_vs_income(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let chart = Chart::categorical("Attendance vs Income Correlation", frame.weeks())
        .labels(X_LABEL, "Total Attendance")
        .secondary_label("Total Income (Thousands)")
        .with(Series::new(
            Column::TotalAttendance,
            color(Column::TotalAttendance),
            Mark::Line,
            frame.column(Column::TotalAttendance),
        ))
        .with(
            Series::new(
                "Total Income (K)",
                color(Column::TotalIncome),
                Mark::Line,
                &frame.thousands(Column::TotalIncome),
            )
            .secondary(),
        );
    save(ctx, "attendance_vs_income", Figure::single(chart))
}

/// Averages, growth and headline figures on one page
pub fn dashboard(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;

    let mut attendance = HBarChart::new("Average Attendance by Category", "Average Attendance");
    for col in Column::GROUPS.iter().copied().chain(Some(Column::HomeChurch)) {
        let avg = metrics::mean(frame.column(col))?;
        attendance = attendance.bar(col.short(), color(col), avg, format!("{:.0}", avg));
    }

    let mut income = HBarChart::new("Average Income by Source", "Average Amount (Thousands)");
    for col in Column::FUNDS {
        let avg = metrics::mean(&frame.thousands(col))?;
        income = income.bar(col.short(), color(col), avg, format!("{:.1}K", avg));
    }

    let growth_rates = frame.attendance_growth()?;
    let signs = growth_rates
        .iter()
        .map(|&g| if g >= 0.0 { DARK_GREEN } else { RED })
        .collect();
    let growth = Chart::categorical("Week-over-Week Attendance Growth", frame.weeks())
        .labels(X_LABEL, "Growth Rate (%)")
        .with(Series::new("", DARK_GREEN, Mark::Bars, &growth_rates).colored(signs))
        .without_legend();

    let panels = vec![
        Panel::from(attendance),
        Panel::from(income),
        Panel::from(growth),
        Panel::from(Note::new(&Statistics::of(frame)?.to_string())),
    ];
    let figure = Figure::grid(panels).with_title("Church Dashboard Summary");
    save(ctx, "dashboard_summary", figure)
}

/// Headline attendance, financial and demographic figures
pub struct Statistics {
    total_attendance: f64,
    mean_attendance: f64,
    highest: Extremum,
    lowest: Extremum,
    total_income: f64,
    mean_income: f64,
    richest: Extremum,
    tithe: f64,
    offerings: f64,
    /// group, attendance over all weeks, share in percent
    groups: Vec<(Column, f64, f64)>,
}

impl Statistics {
    pub fn of(frame: &Frame) -> Result<Self, Error> {
        let attendance = frame.column(Column::TotalAttendance);
        let income = frame.column(Column::TotalIncome);
        let shares = frame.group_shares()?;
        let groups = [Column::Women, Column::Men, Column::Youth, Column::Children]
            .iter()
            .map(|&col| {
                let pct = shares
                    .iter()
                    .find(|(c, _)| *c == col)
                    .map(|(_, p)| *p)
                    .unwrap_or(0.0);
                (col, metrics::sum(frame.column(col)), pct)
            })
            .collect();
        Ok(Self {
            total_attendance: metrics::sum(attendance),
            mean_attendance: metrics::mean(attendance)?,
            highest: metrics::max(attendance).ok_or(Error::EmptyDataset)?,
            lowest: metrics::min(attendance).ok_or(Error::EmptyDataset)?,
            total_income: metrics::sum(income),
            mean_income: metrics::mean(income)?,
            richest: metrics::max(income).ok_or(Error::EmptyDataset)?,
            tithe: metrics::sum(frame.column(Column::Tithe)),
            offerings: metrics::sum(frame.column(Column::Offerings)),
            groups,
        })
    }
}

fn int(v: f64) -> String {
    grouped(v.round() as u64)
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CHURCH STATISTICS SUMMARY")?;
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(f)?;
        writeln!(f, "ATTENDANCE METRICS:")?;
        writeln!(f, "- Total Attendance (All Weeks): {}", int(self.total_attendance))?;
        writeln!(f, "- Average Weekly Attendance: {}", int(self.mean_attendance))?;
        writeln!(f, "- Highest Attendance: {} (Week {})", int(self.highest.value), self.highest.week)?;
        writeln!(f, "- Lowest Attendance: {} (Week {})", int(self.lowest.value), self.lowest.week)?;
        writeln!(f)?;
        writeln!(f, "FINANCIAL METRICS:")?;
        writeln!(f, "- Total Income (All Weeks): {}", int(self.total_income))?;
        writeln!(f, "- Average Weekly Income: {}", int(self.mean_income))?;
        writeln!(f, "- Highest Income Week: {} (Week {})", int(self.richest.value), self.richest.week)?;
        writeln!(f, "- Total Tithe Collected: {}", int(self.tithe))?;
        writeln!(f, "- Total Offerings Collected: {}", int(self.offerings))?;
        writeln!(f)?;
        writeln!(f, "DEMOGRAPHICS:")?;
        for (col, total, pct) in &self.groups {
            writeln!(f, "- {}: {} ({:.1}%)", col.name(), int(*total), pct)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::record::{test::week, Dataset};
    use crate::report::test::Scratch;

    #[test]
    fn headline_figures() {
        let frame = Frame::derive(&Dataset::builtin().unwrap());
        let text = Statistics::of(&frame).unwrap().to_string();
        // 1886 + 2013 + 2145 + 2099 + 2093 + 2108 + 2396 + 2016 + 2154 + 2371
        assert!(text.contains("Total Attendance (All Weeks): 21,281"));
        assert!(text.contains("Highest Attendance: 2,396 (Week 7)"));
        assert!(text.contains("Lowest Attendance: 1,886 (Week 1)"));
        assert!(text.contains("Highest Income Week: 692,485 (Week 5)"));
        assert!(text.contains("DEMOGRAPHICS:"));
        // 8558 of 21281
        assert!(text.contains("- Women: 8,558 (40.2%)"));
        assert!(text.find("- Women").unwrap() < text.find("- Men").unwrap());
        assert!(text.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn zero_attendance_fails_dashboard_only() {
        let scratch = Scratch::new("dashboard");
        let data = Dataset::new(vec![
            week("A", [0, 0, 0, 0], [10, 10, 0, 0]),
            week("B", [1, 1, 1, 1], [10, 10, 0, 0]),
        ])
        .unwrap();
        let frame = Frame::derive(&data);
        let ctx = Context {
            frame: &frame,
            out_dir: &scratch.0,
        };
        assert!(matches!(dashboard(&ctx), Err(Error::DivisionByZero { .. })));
        assert!(attendance_vs_income(&ctx).is_ok());
    }
}
