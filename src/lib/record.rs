//! Weekly observations and the fixed dataset they form
//!
//! Each service week carries five attendance counts and four fund amounts.
//! `Column` enumerates the numeric columns, raw and derived, in display order.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::collections::HashSet;
use std::fmt;

use crate::lib::error::Error;

/// One dated observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRecord {
    pub week: String,
    pub men: u32,
    pub women: u32,
    pub youth: u32,
    pub children: u32,
    /// alternate channel, never part of the attendance total
    pub home_church: u32,
    pub tithe: u64,
    pub offerings: u64,
    /// zero when not collected that week
    pub emergency: u64,
    /// zero when not collected that week
    pub planned: u64,
}

impl WeeklyRecord {
    /// In-person attendance: men, women, youth and children
    pub fn total_attendance(&self) -> u64 {
        [self.men, self.women, self.youth, self.children]
            .iter()
            .map(|&n| n as u64)
            .sum()
    }

    /// Sum of all four funds
    pub fn total_income(&self) -> u64 {
        self.tithe + self.offerings + self.emergency + self.planned
    }

    /// Value of a column for this week, derived columns included
    pub fn get(&self, col: Column) -> u64 {
        use Column::*;
        match col {
            Men => self.men as u64,
            Women => self.women as u64,
            Youth => self.youth as u64,
            Children => self.children as u64,
            HomeChurch => self.home_church as u64,
            Tithe => self.tithe,
            Offerings => self.offerings,
            Emergency => self.emergency,
            Planned => self.planned,
            TotalAttendance => self.total_attendance(),
            TotalIncome => self.total_income(),
        }
    }
}

/// Numeric columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum Column {
    Men = 0,
    Women,
    Youth,
    Children,
    HomeChurch,
    Tithe,
    Offerings,
    Emergency,
    Planned,
    TotalAttendance,
    TotalIncome,
}

impl Column {
    pub const COUNT: usize = 11;

    /// The four in-person attendance categories
    pub const GROUPS: [Column; 4] = [Column::Men, Column::Women, Column::Youth, Column::Children];

    /// The four funds
    pub const FUNDS: [Column; 4] = [
        Column::Tithe,
        Column::Offerings,
        Column::Emergency,
        Column::Planned,
    ];

    pub fn all() -> impl Iterator<Item = Column> {
        (0..Self::COUNT).filter_map(Column::from_usize)
    }

    /// Header used in tables
    pub fn header(self) -> &'static str {
        use Column::*;
        match self {
            Men => "MEN",
            Women => "WOMEN",
            Youth => "YOUTH",
            Children => "CHILDREN",
            HomeChurch => "HOME CHURCH",
            Tithe => "TITHE",
            Offerings => "OFFERINGS",
            Emergency => "EMERGENCY",
            Planned => "PLANNED",
            TotalAttendance => "TOTAL ATT.",
            TotalIncome => "TOTAL INCOME",
        }
    }

    /// Human-readable name used in charts
    pub fn name(self) -> &'static str {
        use Column::*;
        match self {
            Men => "Men",
            Women => "Women",
            Youth => "Youth",
            Children => "Children",
            HomeChurch => "Home Church",
            Tithe => "Tithe",
            Offerings => "Offerings",
            Emergency => "Emergency Collection",
            Planned => "Planned Collection",
            TotalAttendance => "Total Attendance",
            TotalIncome => "Total Income",
        }
    }

    /// Short name used where space is tight
    pub fn short(self) -> &'static str {
        match self {
            Column::Emergency => "Emergency",
            Column::Planned => "Planned",
            Column::HomeChurch => "Home Church",
            other => other.name(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Chronologically ordered records with unique week labels
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<WeeklyRecord>,
}

impl Dataset {
    /// Validate and wrap records, keeping insertion order
    pub fn new(records: Vec<WeeklyRecord>) -> Result<Self, Error> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let mut seen = HashSet::new();
        for rec in &records {
            if !seen.insert(rec.week.as_str()) {
                return Err(Error::DuplicateWeek(rec.week.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The ten Saturday services the tool reports on
    pub fn builtin() -> Result<Self, Error> {
        #[rustfmt::skip]
        const ROWS: [(&str, [u32; 5], [u64; 4]); 10] = [
            ("NO1",  [504, 812, 356, 214, 456], [120145,  89457,     0,      0]),
            ("NO2",  [602, 784, 368, 259, 358], [148748, 101254,     0,      0]),
            ("NO3",  [569, 895, 394, 287, 412], [ 84852,  74128, 48521,      0]),
            ("NO4",  [452, 916, 422, 309, 425], [132245, 121145,     0,      0]),
            ("NO5",  [498, 856, 415, 324, 387], [145350,  91487,     0, 455648]),
            ("NO6",  [520, 845, 485, 258, 348], [220145, 110846,     0,      0]),
            ("NO7",  [624, 988, 510, 274, 397], [156846, 105497,     0,      0]),
            ("NO8",  [587, 742, 386, 301, 458], [ 94578,  81249, 68947,      0]),
            ("NO9",  [594, 819, 446, 295, 374], [124698,  99458,     0, 358947]),
            ("NO10", [635, 901, 487, 348, 410], [ 88749,  81249, 78948,      0]),
        ];
        let records = ROWS
            .iter()
            .map(|&(week, [men, women, youth, children, home_church], [tithe, offerings, emergency, planned])| {
                WeeklyRecord {
                    week: week.to_string(),
                    men,
                    women,
                    youth,
                    children,
                    home_church,
                    tithe,
                    offerings,
                    emergency,
                    planned,
                }
            })
            .collect();
        Self::new(records)
    }

    pub fn records(&self) -> &[WeeklyRecord] {
        &self.records
    }

    pub fn weeks(&self) -> Vec<String> {
        self.records.iter().map(|r| r.week.clone()).collect()
    }
}
