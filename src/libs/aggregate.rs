//! Aggregation levels used to bucket days into reporting periods.
//!
//! Each [`TimeAggregate`] variant is backed by an [`AggregateOps`] entry that
//! knows how to round a date down to its bucket (`floor`), step to the next or
//! previous bucket, and render/decompose the bucket key.
//!
//! `decrement` always lands on the floor of the previous bucket, so it is not
//! an exact inverse of `increment` for dates inside a bucket.

use crate::libs::error::{Result, TimesheetError};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

pub const DAYS_IN_WEEK: u64 = 7;
pub const MONTHS_IN_YEAR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum TimeAggregate {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

/// Bucket key layout: a `strftime` pattern plus the names of its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub pattern: &'static str,
    pub components: &'static [&'static str],
    pub separator: Option<char>,
}

impl DateFormat {
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern).to_string()
    }

    /// Splits a bucket key into its parts with leading zeros stripped.
    pub fn decompose(&self, key: &str) -> Vec<String> {
        let parts: Vec<&str> = match self.separator {
            Some(sep) => key.split(sep).collect(),
            None => vec![key],
        };
        parts.into_iter().map(strip_leading_zeros).collect()
    }
}

fn strip_leading_zeros(part: &str) -> String {
    let stripped = part.trim_start_matches('0');
    if stripped.is_empty() && !part.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// The operations that make up one aggregation level.
pub struct AggregateOps {
    pub name: &'static str,
    pub floor: fn(NaiveDate) -> NaiveDate,
    pub increment: fn(NaiveDate) -> Option<NaiveDate>,
    pub decrement: fn(NaiveDate) -> Option<NaiveDate>,
    pub format: DateFormat,
}

// Week keys use %W: Monday-based week of year, week 00 before the first Monday.
static OPS: [AggregateOps; 4] = [
    AggregateOps {
        name: "day",
        floor: floor_day,
        increment: increment_day,
        decrement: decrement_day,
        format: DateFormat {
            pattern: "%Y-%m-%d",
            components: &["year", "month", "day"],
            separator: Some('-'),
        },
    },
    AggregateOps {
        name: "week",
        floor: floor_week,
        increment: increment_week,
        decrement: decrement_week,
        format: DateFormat {
            pattern: "%Y-%W",
            components: &["year", "week"],
            separator: Some('-'),
        },
    },
    AggregateOps {
        name: "month",
        floor: floor_month,
        increment: increment_month,
        decrement: decrement_month,
        format: DateFormat {
            pattern: "%Y-%-m",
            components: &["year", "month"],
            separator: Some('-'),
        },
    },
    AggregateOps {
        name: "year",
        floor: floor_year,
        increment: increment_year,
        decrement: decrement_year,
        format: DateFormat {
            pattern: "%Y",
            components: &["year"],
            separator: None,
        },
    },
];

impl TimeAggregate {
    pub const ALL: [TimeAggregate; 4] = [TimeAggregate::Day, TimeAggregate::Week, TimeAggregate::Month, TimeAggregate::Year];

    pub fn ops(self) -> &'static AggregateOps {
        let index = match self {
            TimeAggregate::Day => 0,
            TimeAggregate::Week => 1,
            TimeAggregate::Month => 2,
            TimeAggregate::Year => 3,
        };
        &OPS[index]
    }

    pub fn name(self) -> &'static str {
        self.ops().name
    }

    pub fn floor(self, date: NaiveDate) -> NaiveDate {
        (self.ops().floor)(date)
    }

    /// Floor of the following bucket; `None` past the last representable date.
    pub fn increment(self, date: NaiveDate) -> Option<NaiveDate> {
        (self.ops().increment)(date)
    }

    /// Floor of the preceding bucket; `None` before the first representable date.
    pub fn decrement(self, date: NaiveDate) -> Option<NaiveDate> {
        (self.ops().decrement)(date)
    }

    pub fn string_format(self) -> &'static DateFormat {
        &self.ops().format
    }

    /// Key of the bucket containing `date`.
    pub fn key(self, date: NaiveDate) -> String {
        self.string_format().format(self.floor(date))
    }
}

impl fmt::Display for TimeAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeAggregate {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TimeAggregate::ALL
            .into_iter()
            .find(|aggregate| aggregate.name() == wanted)
            .ok_or_else(|| {
                TimesheetError::Configuration(format!(
                    "Unknown aggregate {:?}; expected one of day, week, month, year",
                    s
                ))
            })
    }
}

fn floor_day(date: NaiveDate) -> NaiveDate {
    date
}

fn increment_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

fn decrement_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

fn floor_week(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

fn increment_week(date: NaiveDate) -> Option<NaiveDate> {
    floor_week(date).checked_add_days(Days::new(DAYS_IN_WEEK))
}

fn decrement_week(date: NaiveDate) -> Option<NaiveDate> {
    floor_week(date).checked_sub_days(Days::new(DAYS_IN_WEEK))
}

fn floor_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn increment_month(date: NaiveDate) -> Option<NaiveDate> {
    let month = date.month() % MONTHS_IN_YEAR + 1;
    let year = date.year() + (date.month() / MONTHS_IN_YEAR) as i32;
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn decrement_month(date: NaiveDate) -> Option<NaiveDate> {
    let month = (date.month() + MONTHS_IN_YEAR - 2) % MONTHS_IN_YEAR + 1;
    let year = date.year() - i32::from(date.month() == 1);
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn floor_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

fn increment_year(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
}

fn decrement_year(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year() - 1, 1, 1)
}
