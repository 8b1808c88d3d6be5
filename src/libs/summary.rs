//! Hour totals per reporting period.
//!
//! [`sum_day_logs`] is the aggregation engine behind every summary: it buckets
//! each day of a record with a [`TimeAggregate`], sums the worked hours per
//! bucket and fills the buckets between the first and last observed one with
//! explicit zeros. Buckets are ordered by their floor date, not by the text of
//! their key, so unpadded month keys such as `2022-9` and `2022-10` keep
//! calendar order.

use crate::libs::aggregate::TimeAggregate;
use crate::libs::day_log::DayLog;
use crate::libs::error::{Result, TimesheetError};
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }
}

impl DateRange {
    /// Missing bounds fall back to the first/last representable date.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.unwrap_or(NaiveDate::MIN),
            end: end.unwrap_or(NaiveDate::MAX),
        }
    }

    /// The single bucket of `aggregate` that contains `date`.
    pub fn bucket_of(date: NaiveDate, aggregate: TimeAggregate) -> Self {
        let start = aggregate.floor(date);
        Self {
            start,
            end: aggregate.increment(start).unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    aggregate: TimeAggregate,
    buckets: BTreeMap<NaiveDate, f64>,
}

impl Summary {
    pub fn aggregate(&self) -> TimeAggregate {
        self.aggregate
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// `(bucket key, hours)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        let format = self.aggregate.string_format();
        self.buckets.iter().map(move |(floor, hours)| (format.format(*floor), *hours))
    }

    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Hours recorded for a bucket key.
    pub fn get(&self, key: &str) -> Result<f64> {
        self.iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, hours)| hours)
            .ok_or_else(|| TimesheetError::not_found(format!("No bucket {:?} in {} summary", key, self.aggregate)))
    }

    pub fn total(&self) -> f64 {
        self.buckets.values().sum()
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (key, hours) in self.iter() {
            map.serialize_entry(&key, &hours)?;
        }
        map.end()
    }
}

/// Sums the hours of every day log whose bucket lies in `range`.
///
/// Every bucket from the earliest to the latest included one is present in
/// the result, with 0.0 for buckets that had no recorded days.
pub fn sum_day_logs<'a, I>(record: I, range: DateRange, aggregate: TimeAggregate) -> Summary
where
    I: IntoIterator<Item = (&'a NaiveDate, &'a DayLog)>,
{
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for (date, day_log) in record {
        let bucket = aggregate.floor(*date);
        if !range.contains(bucket) {
            continue;
        }
        *buckets.entry(bucket).or_insert(0.0) += day_log.sum_time_intervals();
    }

    if let (Some(&min_bucket), Some(&max_bucket)) = (buckets.keys().next(), buckets.keys().next_back()) {
        let mut current = Some(min_bucket);
        while let Some(bucket) = current.filter(|b| *b < max_bucket) {
            buckets.entry(bucket).or_insert(0.0);
            current = aggregate.increment(bucket);
        }
    }

    tracing::debug!(%aggregate, buckets = buckets.len(), "summarized day logs");
    Summary { aggregate, buckets }
}
