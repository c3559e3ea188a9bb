use super::{color, save};
use crate::cli::plot::{Chart, Figure, Mark, Pie, Series, RED};
use crate::lib::{
    catalog::{Context, Outcome},
    error::Error,
    metrics,
    record::Column,
};

const X_LABEL: &str = "Saturday Service";

pub fn by_category(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let chart = Column::GROUPS.iter().fold(
        Chart::categorical("Weekly Church Attendance by Category", frame.weeks())
            .labels(X_LABEL, "Number of Attendees"),
        |chart, &col| chart.with(Series::new(col, color(col), Mark::Bars, frame.column(col))),
    );
    save(ctx, "attendance_by_category", Figure::single(chart))
}

/// Total attendance with its least-squares trend line
pub fn trend(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let totals = frame.column(Column::TotalAttendance);
    let line = metrics::trend(totals).ok_or(Error::EmptyDataset)?;
    let fitted = (0..totals.len()).map(|i| line.at(i as f64)).collect::<Vec<_>>();
    let chart = Chart::categorical("Total Weekly Attendance Trend", frame.weeks())
        .labels(X_LABEL, "Total Attendance")
        .with(Series::new(
            Column::TotalAttendance,
            color(Column::TotalAttendance),
            Mark::Filled,
            totals,
        ))
        .with(Series::new("Trend Line", RED, Mark::Dashed, &fitted));
    save(ctx, "total_attendance_trend", Figure::single(chart))
}

/// Share of each category over all weeks
pub fn distribution(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let parts = Column::GROUPS
        .iter()
        .map(|&col| (col.name(), color(col), metrics::sum(frame.column(col))))
        .collect::<Vec<_>>();
    let pie = Pie::new("Saturday Service Attendance Distribution", &parts)?;
    save(ctx, "attendance_distribution_pie", Figure::single(pie))
}
