//! Derived columns and summary statistics
//!
//! A `Frame` is computed once from a `Dataset`: it keeps the week labels and
//! every `Column` as a series of numbers. The free functions below work on any
//! ordered series.

use crate::lib::{
    error::Error,
    record::{Column, Dataset},
};

/// Dataset with its derived columns, indexed by `Column`
#[derive(Debug, Clone)]
pub struct Frame {
    weeks: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Frame {
    pub fn derive(data: &Dataset) -> Self {
        let columns = Column::all()
            .map(|col| data.records().iter().map(|r| r.get(col) as f64).collect())
            .collect();
        let frame = Self {
            weeks: data.weeks(),
            columns,
        };
        log::debug!("derived {} columns over {} weeks", Column::COUNT, frame.len());
        frame
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[String] {
        &self.weeks
    }

    pub fn column(&self, col: Column) -> &[f64] {
        &self.columns[col as usize]
    }

    /// Column divided by 1000, for plotting amounts
    pub fn thousands(&self, col: Column) -> Vec<f64> {
        self.column(col).iter().map(|v| v / 1000.0).collect()
    }

    /// Week-over-week growth of total attendance
    pub fn attendance_growth(&self) -> Result<Vec<f64>, Error> {
        growth_rates(self.column(Column::TotalAttendance))
    }

    /// Share of each attendance category in the overall attendance
    pub fn group_shares(&self) -> Result<Vec<(Column, f64)>, Error> {
        let total = sum(self.column(Column::TotalAttendance));
        Column::GROUPS
            .iter()
            .map(|&col| Ok((col, share(sum(self.column(col)), total)?)))
            .collect()
    }
}

/// Extreme value and its 1-based week position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub week: usize,
}

/// Least-squares line `y = slope * x + intercept` over `x = 0, 1, ...`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Descriptive statistics of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Description {
    pub count: usize,
    pub mean: f64,
    /// sample deviation, absent with fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Result<f64, Error> {
    if values.is_empty() {
        return Err(Error::DivisionByZero { what: "a mean" });
    }
    Ok(sum(values) / values.len() as f64)
}

// first position wins on ties
fn extremum<F>(values: &[f64], better: F) -> Option<Extremum>
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<Extremum> = None;
    for (i, &value) in values.iter().enumerate() {
        match best {
            Some(b) if !better(value, b.value) => {}
            _ => best = Some(Extremum { value, week: i + 1 }),
        }
    }
    best
}

pub fn max(values: &[f64]) -> Option<Extremum> {
    extremum(values, |a, b| a > b)
}

pub fn min(values: &[f64]) -> Option<Extremum> {
    extremum(values, |a, b| a < b)
}

/// Percentage of `part` in `total`
pub fn share(part: f64, total: f64) -> Result<f64, Error> {
    if total > 0.0 {
        Ok(part / total * 100.0)
    } else {
        Err(Error::DivisionByZero { what: "a percentage share" })
    }
}

/// Percent change from the previous value, 0 for the first one
pub fn growth_rates(values: &[f64]) -> Result<Vec<f64>, Error> {
    let mut rates = Vec::with_capacity(values.len());
    for (i, &cur) in values.iter().enumerate() {
        if i == 0 {
            rates.push(0.0);
            continue;
        }
        let prev = values[i - 1];
        if prev == 0.0 {
            return Err(Error::DivisionByZero {
                what: "week-over-week growth",
            });
        }
        rates.push((cur - prev) / prev * 100.0);
    }
    Ok(rates)
}

pub fn trend(values: &[f64]) -> Option<Trend> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let xbar = (n - 1) as f64 / 2.0;
    let ybar = sum(values) / n as f64;
    let (num, den) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, &y)| {
            let dx = i as f64 - xbar;
            (num + dx * (y - ybar), den + dx * dx)
        });
    let slope = if den > 0.0 { num / den } else { 0.0 };
    Some(Trend {
        slope,
        intercept: ybar - slope * xbar,
    })
}

// linear interpolation between closest ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn describe(values: &[f64]) -> Option<Description> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = sum(values) / count as f64;
    let std = if count > 1 {
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (count - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(Description {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}
