use crate::cli::table::Table;
use crate::lib::{
    catalog::{Context, Outcome},
    error::Error,
    record::Column,
};

/// Shape of the data, every record, then descriptive statistics
pub fn data_summary(ctx: &Context<'_>) -> Result<Outcome, Error> {
    let frame = ctx.frame;
    // the week label counts as a column
    let text = format!(
        "Rows: {}, Columns: {}\n\n{}\n{}",
        frame.len(),
        Column::COUNT + 1,
        Table::records(frame),
        Table::describe(frame),
    );
    Ok(Outcome::Printed(text))
}
