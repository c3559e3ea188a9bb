use super::{color, save};
use crate::cli::plot::{Chart, Figure, Mark, Panel, Series};
use crate::lib::{
    catalog::{Context, Outcome},
    error::Error,
    metrics::Frame,
    record::Column,
};

const X_LABEL: &str = "Saturday Service";
const FUNDS_LABEL: &str = "Fund Amounts (Thousands)";

/// The four funds in thousands, on the secondary axis
fn with_funds(chart: Chart, frame: &Frame, mark: Mark) -> Chart {
    Column::FUNDS.iter().fold(chart, |chart, &col| {
        chart.with(
            Series::new(
                format!("{} (K)", col.short()),
                color(col),
                mark,
                &frame.thousands(col),
            )
            .secondary(),
        )
    })
}

pub fn home_church_vs_funds(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let chart = Chart::categorical("Sunday Home Church Attendance vs All Funds", frame.weeks())
        .labels(X_LABEL, "Sunday Home Church Attendance")
        .secondary_label(FUNDS_LABEL)
        .with(Series::new(
            "Sunday Home Church",
            color(Column::HomeChurch),
            Mark::Line,
            frame.column(Column::HomeChurch),
        ));
    let chart = with_funds(chart, frame, Mark::Line);
    save(ctx, "sunday_home_vs_funds", Figure::single(chart))
}

/// One panel per attendance category, each against every fund
pub fn groups_vs_funds(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let panels = Column::GROUPS
        .iter()
        .enumerate()
        .map(|(i, &col)| {
            let chart = Chart::categorical(format!("{} vs All Funds", col), frame.weeks())
                .labels(X_LABEL, format!("{} Attendance", col))
                .secondary_label(FUNDS_LABEL)
                .with(Series::new(col, color(col), Mark::Line, frame.column(col)));
            let chart = with_funds(chart, frame, Mark::Dashed);
            // the legend is the same on every panel
            let chart = if i == 0 { chart } else { chart.without_legend() };
            Panel::from(chart)
        })
        .collect();
    let figure = Figure::grid(panels).with_title("Demographic Groups vs Fund Collections");
    save(ctx, "demographics_vs_funds", figure)
}

/// One panel per fund, as bars, against total attendance
pub fn funds_vs_attendance(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let panels = Column::FUNDS
        .iter()
        .map(|&col| {
            let chart = Chart::categorical(format!("{} vs Total Attendance", col), frame.weeks())
                .labels(X_LABEL, format!("{} (Thousands)", col))
                .secondary_label("Total Attendance")
                .with(Series::new(col, color(col), Mark::Bars, &frame.thousands(col)))
                .with(
                    Series::new(
                        Column::TotalAttendance,
                        color(Column::TotalAttendance),
                        Mark::Line,
                        frame.column(Column::TotalAttendance),
                    )
                    .secondary(),
                );
            Panel::from(chart)
        })
        .collect();
    let figure = Figure::grid(panels).with_title("Fund Collections vs Total Attendance");
    save(ctx, "funds_vs_attendance", figure)
}

/// One scatter panel per fund: weekly count of every group against the amount
pub fn groups_scatter(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let panels = Column::FUNDS
        .iter()
        .map(|&fund| {
            let amounts = frame.thousands(fund);
            let chart = Column::GROUPS.iter().fold(
                Chart::continuous(format!("All Groups vs {}", fund))
                    .labels("Attendance Count", format!("{} (Thousands)", fund)),
                |chart, &group| {
                    chart.with(Series::scatter(group, color(group), frame.column(group), &amounts))
                },
            );
            Panel::from(chart)
        })
        .collect();
    let figure =
        Figure::grid(panels).with_title("Demographic Groups vs Individual Funds (Correlation)");
    save(ctx, "groups_vs_funds_correlation", figure)
}
