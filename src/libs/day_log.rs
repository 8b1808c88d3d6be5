//! Clock timestamps recorded for a single calendar date.
//!
//! A [`DayLog`] holds a strictly ascending list of [`DiffTime`] values. Pairs
//! of consecutive timestamps are read as clock-in/clock-out intervals, and
//! [`DayLog::sum_time_intervals`] turns them into worked hours.
//!
//! The ordering invariant is checked whenever timestamps enter the log:
//! at construction, when new timestamps are appended, and when two logs of
//! the same date are merged.

use crate::libs::diff_time::DiffTime;
use crate::libs::error::{Result, TimesheetError};
use crate::libs::messages::Message;
use crate::msg_warning;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::fmt;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const HOURS_PER_DAY: f64 = 24.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const MICROSECONDS_PER_HOUR: f64 = 3.6e9;

#[derive(Debug, Clone)]
pub struct DayLog {
    date: NaiveDate,
    timestamps: Vec<DiffTime>,
    creation_time: NaiveDateTime,
}

impl DayLog {
    /// Creates a log for `date`, rejecting timestamps that are not strictly ascending.
    pub fn new(date: NaiveDate, timestamps: Vec<DiffTime>) -> Result<Self> {
        validate_ascending(&timestamps)?;
        Ok(Self {
            date,
            timestamps,
            creation_time: Local::now().naive_local(),
        })
    }

    /// An empty log for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            timestamps: Vec::new(),
            creation_time: Local::now().naive_local(),
        }
    }

    /// Creates a log from an optional ISO date string (`None` means today).
    pub fn parse(date: Option<&str>, timestamps: Vec<DiffTime>) -> Result<Self> {
        let date = match date {
            Some(raw) => parse_iso_date(raw)?,
            None => Local::now().date_naive(),
        };
        Self::new(date, timestamps)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn timestamps(&self) -> &[DiffTime] {
        &self.timestamps
    }

    pub fn creation_time(&self) -> NaiveDateTime {
        self.creation_time
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// True when the last clock-in has no matching clock-out.
    pub fn has_open_interval(&self) -> bool {
        self.timestamps.len() % 2 != 0
    }

    /// Identical timestamp sequences; creation time is not compared.
    pub fn equals(&self, other: &DayLog) -> bool {
        self.timestamps == other.timestamps
    }

    /// Independent copy with the same date and timestamps and a fresh creation time.
    pub fn copy(&self) -> DayLog {
        DayLog {
            date: self.date,
            timestamps: self.timestamps.clone(),
            creation_time: Local::now().naive_local(),
        }
    }

    /// Appends timestamps that all come after the latest recorded one.
    ///
    /// `None` appends the current time. `Some(&[])` leaves the log unchanged.
    pub fn concat_timestamps(&mut self, timestamps: Option<&[DiffTime]>) -> Result<&mut Self> {
        let incoming = match timestamps {
            Some(list) => list.to_vec(),
            None => vec![DiffTime::now()],
        };
        validate_ascending(&incoming)?;

        if let (Some(first), Some(last)) = (incoming.first(), self.timestamps.last()) {
            if first <= last {
                return Err(TimesheetError::validation(format!(
                    "Earliest new timestamp {} is identical to or earlier than latest recorded timestamp {}",
                    first, last
                )));
            }
        }

        self.timestamps.extend(incoming);
        Ok(self)
    }

    /// Combines two logs of the same date into a new one.
    ///
    /// The non-empty runs must not overlap; they are joined in chronological
    /// order regardless of which side comes first.
    pub fn merge(&self, other: &DayLog) -> Result<DayLog> {
        if self.date != other.date {
            return Err(TimesheetError::validation(format!(
                "Cannot add DayLog objects when dates {} and {} disagree",
                self.date, other.date
            )));
        }

        let combined = match (self.bounds(), other.bounds()) {
            (None, _) | (_, None) => [self.timestamps.as_slice(), other.timestamps.as_slice()].concat(),
            (Some((_, own_last)), Some((other_first, _))) if own_last < other_first => {
                [self.timestamps.as_slice(), other.timestamps.as_slice()].concat()
            }
            (Some((own_first, _)), Some((_, other_last))) if other_last < own_first => {
                [other.timestamps.as_slice(), self.timestamps.as_slice()].concat()
            }
            _ => {
                return Err(TimesheetError::validation(format!(
                    "Cannot combine DayLog instances for {} whose timestamp ranges interleave: left {}, right {}",
                    self.date,
                    join_times(&self.timestamps),
                    join_times(&other.timestamps)
                )))
            }
        };

        DayLog::new(self.date, combined)
    }

    /// Total hours covered by (1st, 2nd), (3rd, 4th), ... timestamp pairs.
    ///
    /// An unpaired final timestamp is left out of the total and reported as a warning.
    pub fn sum_time_intervals(&self) -> f64 {
        if self.has_open_interval() {
            tracing::warn!(date = %self.date, count = self.timestamps.len(), "odd number of timestamps");
            msg_warning!(Message::OddTimestampCount(self.date.to_string()));
        }

        let total = self
            .timestamps
            .chunks_exact(2)
            .fold(Duration::zero(), |acc, pair| acc + (pair[1] - pair[0]));

        Self::convert_to_hours(total)
    }

    /// Converts a duration to fractional hours.
    pub fn convert_to_hours(delta: Duration) -> f64 {
        let days = delta.num_days();
        let rest = delta - Duration::days(days);
        let seconds = rest.num_seconds();
        let micros = (rest - Duration::seconds(seconds)).num_microseconds().unwrap_or(0);

        days as f64 * HOURS_PER_DAY + seconds as f64 / SECONDS_PER_HOUR + micros as f64 / MICROSECONDS_PER_HOUR
    }

    fn bounds(&self) -> Option<(DiffTime, DiffTime)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }
}

impl PartialEq for DayLog {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for DayLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "A day log object for {}, created {}",
            self.date.format("%Y-%m-%d"),
            self.creation_time.format("%Y-%m-%d %H:%M:%S")
        )?;
        for timestamp in &self.timestamps {
            writeln!(f, "{}", timestamp)?;
        }
        Ok(())
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// Only the zero-padded form is accepted: `2022-6-27` and `+2022-06-27` are rejected.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .ok()
        .filter(|date| date.format(ISO_DATE_FORMAT).to_string() == trimmed)
        .ok_or_else(|| TimesheetError::validation(format!("{:?} is not an ISO-formatted date", raw)))
}

fn validate_ascending(timestamps: &[DiffTime]) -> Result<()> {
    if timestamps.windows(2).all(|w| w[1] > w[0]) {
        Ok(())
    } else {
        Err(TimesheetError::validation(format!(
            "Timestamps not all in chronological order: {}",
            join_times(timestamps)
        )))
    }
}

fn join_times(timestamps: &[DiffTime]) -> String {
    let parts: Vec<String> = timestamps.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
