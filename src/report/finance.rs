use super::{color, save};
use crate::cli::plot::{Chart, Figure, Mark, Pie, Series};
use crate::lib::{
    catalog::{Context, Outcome},
    error::Error,
    metrics,
    record::Column,
};

const X_LABEL: &str = "Saturday Service";
const Y_LABEL: &str = "Amount (in Thousands)";

/// Side by side weekly bars, tithe bars annotated with their value
pub fn tithe_vs_offerings(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let tithe = frame.thousands(Column::Tithe);
    let notes = tithe.iter().map(|v| format!("{:.0}K", v)).collect();
    let chart = Chart::categorical("Weekly Tithe vs Offerings Comparison", frame.weeks())
        .labels(X_LABEL, Y_LABEL)
        .with(Series::new("Tithe", color(Column::Tithe), Mark::Bars, &tithe).annotated(notes))
        .with(Series::new(
            "Offerings",
            color(Column::Offerings),
            Mark::Bars,
            &frame.thousands(Column::Offerings),
        ));
    save(ctx, "tithe_vs_offerings", Figure::single(chart))
}

/// The four funds stacked week by week
pub fn breakdown(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let chart = Column::FUNDS.iter().fold(
        Chart::categorical("Total Weekly Income Breakdown", frame.weeks()).labels(X_LABEL, Y_LABEL),
        |chart, &col| chart.with(Series::new(col, color(col), Mark::Stacked, &frame.thousands(col))),
    );
    save(ctx, "income_breakdown", Figure::single(chart))
}

pub fn distribution(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    let parts = Column::FUNDS
        .iter()
        .map(|&col| (col.name(), color(col), metrics::sum(frame.column(col))))
        .collect::<Vec<_>>();
    let pie = Pie::new("Total Income Distribution", &parts)?;
    save(ctx, "income_distribution_pie", Figure::single(pie))
}
