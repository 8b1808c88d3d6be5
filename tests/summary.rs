#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use timesheet::libs::aggregate::TimeAggregate;
    use timesheet::libs::day_log::DayLog;
    use timesheet::libs::diff_time::DiffTime;
    use timesheet::libs::summary::{sum_day_logs, DateRange};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(date: NaiveDate, raw: &[&str]) -> DayLog {
        DayLog::new(date, raw.iter().map(|t| t.parse::<DiffTime>().unwrap()).collect()).unwrap()
    }

    fn reference_record() -> BTreeMap<NaiveDate, DayLog> {
        let odd_hours: Vec<String> = (1..=23).step_by(2).map(|h| format!("{h:02}:00")).collect();
        let odd_hours: Vec<&str> = odd_hours.iter().map(String::as_str).collect();

        [
            log(ymd(2022, 6, 27), &["02:00", "03:00", "07:30", "08:00"]),
            log(ymd(2022, 6, 29), &["00:10", "01:00"]),
            log(ymd(2022, 6, 30), &[]),
            log(ymd(2022, 7, 3), &odd_hours),
        ]
        .into_iter()
        .map(|day| (day.date(), day))
        .collect()
    }

    fn assert_buckets(actual: Vec<(String, f64)>, expected: &[(&str, f64)]) {
        assert_eq!(actual.len(), expected.len(), "buckets: {actual:?}");
        for ((key, hours), (want_key, want_hours)) in actual.iter().zip(expected) {
            assert_eq!(key, want_key);
            assert!((hours - want_hours).abs() < 1e-9, "{key}: expected {want_hours}, got {hours}");
        }
    }

    #[test]
    fn test_day_summary_fills_gaps() {
        let summary = sum_day_logs(&reference_record(), DateRange::default(), TimeAggregate::Day);
        assert_buckets(
            summary.iter().collect(),
            &[
                ("2022-06-27", 1.5),
                ("2022-06-28", 0.0),
                ("2022-06-29", 5.0 / 6.0),
                ("2022-06-30", 0.0),
                ("2022-07-01", 0.0),
                ("2022-07-02", 0.0),
                ("2022-07-03", 12.0),
            ],
        );
    }

    #[test]
    fn test_week_month_year_summaries() {
        let record = reference_record();
        let total = 1.5 + 5.0 / 6.0 + 12.0;

        let week = sum_day_logs(&record, DateRange::default(), TimeAggregate::Week);
        assert_buckets(week.iter().collect(), &[("2022-26", total)]);

        let month = sum_day_logs(&record, DateRange::default(), TimeAggregate::Month);
        assert_buckets(month.iter().collect(), &[("2022-6", 1.5 + 5.0 / 6.0), ("2022-7", 12.0)]);

        let year = sum_day_logs(&record, DateRange::default(), TimeAggregate::Year);
        assert_buckets(year.iter().collect(), &[("2022", total)]);
        assert!((year.total() - total).abs() < 1e-9);
    }

    #[test]
    fn test_range_excludes_end_bucket() {
        let range = DateRange::new(Some(ymd(2022, 6, 29)), Some(ymd(2022, 7, 3)));
        let summary = sum_day_logs(&reference_record(), range, TimeAggregate::Day);
        assert_buckets(summary.iter().collect(), &[("2022-06-29", 5.0 / 6.0), ("2022-06-30", 0.0)]);
    }

    #[test]
    fn test_range_filters_on_bucket_floor() {
        // 2022-07-03 floors to the week starting 2022-06-27, which is before the range start.
        let range = DateRange::new(Some(ymd(2022, 6, 28)), None);
        let summary = sum_day_logs(&reference_record(), range, TimeAggregate::Week);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_month_buckets_keep_calendar_order() {
        let record: BTreeMap<NaiveDate, DayLog> = [
            log(ymd(2022, 9, 5), &["09:00", "10:00"]),
            log(ymd(2022, 11, 7), &["09:00", "11:00"]),
        ]
        .into_iter()
        .map(|day| (day.date(), day))
        .collect();

        let summary = sum_day_logs(&record, DateRange::default(), TimeAggregate::Month);
        assert_eq!(summary.keys(), vec!["2022-9", "2022-10", "2022-11"]);
        assert_eq!(summary.get("2022-10").unwrap(), 0.0);
    }

    #[test]
    fn test_month_buckets_across_year_boundary() {
        let record: BTreeMap<NaiveDate, DayLog> = [
            log(ymd(2021, 11, 15), &["09:00", "10:00"]),
            log(ymd(2022, 2, 1), &["09:00", "12:00"]),
        ]
        .into_iter()
        .map(|day| (day.date(), day))
        .collect();

        let summary = sum_day_logs(&record, DateRange::default(), TimeAggregate::Month);
        assert_buckets(
            summary.iter().collect(),
            &[("2021-11", 1.0), ("2021-12", 0.0), ("2022-1", 0.0), ("2022-2", 3.0)],
        );
    }

    #[test]
    fn test_missing_bucket_is_not_found() {
        let summary = sum_day_logs(&reference_record(), DateRange::default(), TimeAggregate::Month);
        assert!(summary.get("2022-8").unwrap_err().is_not_found());
    }

    #[test]
    fn test_summary_serializes_in_bucket_order() {
        let summary = sum_day_logs(&reference_record(), DateRange::default(), TimeAggregate::Month);
        let json = serde_json::to_string(&summary).unwrap();
        let june = json.find("2022-6").unwrap();
        let july = json.find("2022-7").unwrap();
        assert!(june < july);
    }
}
