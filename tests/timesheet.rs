#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timesheet::libs::aggregate::TimeAggregate;
    use timesheet::libs::day_log::DayLog;
    use timesheet::libs::diff_time::DiffTime;
    use timesheet::libs::summary::DateRange;
    use timesheet::libs::timesheet::Timesheet;

    struct SheetContext {
        temp_dir: TempDir,
        store: PathBuf,
    }

    impl TestContext for SheetContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = temp_dir.path().join("timesheets");
            SheetContext { temp_dir, store }
        }
    }

    impl SheetContext {
        fn sheet(&self, name: &str, days: Vec<DayLog>) -> Timesheet {
            Timesheet::from_days(days, self.store.clone(), Some(name.to_string())).unwrap()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn times(raw: &[&str]) -> Vec<DiffTime> {
        raw.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn log(date: NaiveDate, raw: &[&str]) -> DayLog {
        DayLog::new(date, times(raw)).unwrap()
    }

    fn reference_days() -> Vec<DayLog> {
        vec![
            log(ymd(2022, 6, 27), &["02:00", "03:00", "07:30", "08:00"]),
            log(ymd(2022, 6, 29), &["00:10", "01:00"]),
        ]
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_new_without_record_holds_today(ctx: &mut SheetContext) {
        let sheet = Timesheet::new(None, ctx.store.clone(), None).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.storage_name(), "timesheet1");
        let (_, day) = sheet.record().iter().next().unwrap();
        assert!(day.is_empty());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_key_must_match_day_log_date(ctx: &mut SheetContext) {
        let mut record = BTreeMap::new();
        record.insert(ymd(2022, 6, 28), log(ymd(2022, 6, 27), &["01:00"]));
        let err = Timesheet::new(Some(record), ctx.store.clone(), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_iso_record_rejects_bad_keys(ctx: &mut SheetContext) {
        let mut record = BTreeMap::new();
        record.insert("June 27".to_string(), log(ymd(2022, 6, 27), &["01:00"]));
        let err = Timesheet::from_iso_record(record, ctx.store.clone(), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_iso_record_rejects_two_spellings_of_one_date(ctx: &mut SheetContext) {
        let mut record = BTreeMap::new();
        record.insert("2022-06-27".to_string(), log(ymd(2022, 6, 27), &["01:00", "02:00"]));
        record.insert(" 2022-06-27".to_string(), log(ymd(2022, 6, 27), &["05:00", "06:00"]));
        let err = Timesheet::from_iso_record(record, ctx.store.clone(), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_from_json_rejects_unpadded_duplicate_date(ctx: &mut SheetContext) {
        let path = ctx.temp_dir.path().join("dupe.json");
        std::fs::write(
            &path,
            r#"{"2022-06-27": ["01:00:00", "02:00:00"], "2022-6-27": ["05:00:00", "06:00:00"]}"#,
        )
        .unwrap();
        let err = Timesheet::from_json(&path, ctx.store.clone(), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_merge_prepends_earlier_timestamps(ctx: &mut SheetContext) {
        let left = ctx.sheet("left", reference_days());
        let right = ctx.sheet("right", vec![log(ymd(2022, 6, 27), &["01:00"])]);

        let merged = left.merge(&right).unwrap();

        assert_eq!(merged.storage_name(), "left");
        assert_eq!(
            merged.get(ymd(2022, 6, 27)).unwrap().timestamps(),
            times(&["01:00", "02:00", "03:00", "07:30", "08:00"]).as_slice()
        );
        assert!(merged.get(ymd(2022, 6, 29)).unwrap().equals(left.get(ymd(2022, 6, 29)).unwrap()));
        // inputs are untouched
        assert_eq!(left.get(ymd(2022, 6, 27)).unwrap().len(), 4);
        assert_eq!(right.get(ymd(2022, 6, 27)).unwrap().len(), 1);
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_merge_copies_disjoint_days(ctx: &mut SheetContext) {
        let left = ctx.sheet("left", reference_days());
        let right = ctx.sheet("right", vec![log(ymd(2022, 7, 3), &["09:00", "10:00"])]);

        let merged = left.merge(&right).unwrap();
        let dates: Vec<NaiveDate> = merged.dates().collect();
        assert_eq!(dates, vec![ymd(2022, 6, 27), ymd(2022, 6, 29), ymd(2022, 7, 3)]);
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_merge_is_symmetric_in_content(ctx: &mut SheetContext) {
        let left = ctx.sheet("left", reference_days());
        let right = ctx.sheet("right", vec![log(ymd(2022, 6, 29), &["03:00", "04:00"])]);

        let forward = left.merge(&right).unwrap();
        let backward = right.merge(&left).unwrap();
        assert!(forward.equals(&backward));
        assert_eq!(backward.storage_name(), "right");
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_merge_rejects_interleaving(ctx: &mut SheetContext) {
        let left = ctx.sheet("left", reference_days());
        let right = ctx.sheet("right", vec![log(ymd(2022, 6, 27), &["02:30", "04:00"])]);
        assert!(left.merge(&right).unwrap_err().is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_self_merge_fails(ctx: &mut SheetContext) {
        let sheet = ctx.sheet("solo", reference_days());
        assert!(sheet.merge(&sheet).unwrap_err().is_validation());

        let empty = ctx.sheet("empty", Vec::new());
        assert!(empty.merge(&empty).unwrap_err().is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_equals_compares_content_only(ctx: &mut SheetContext) {
        let a = ctx.sheet("a", reference_days());
        let b = ctx.sheet("b", reference_days());
        let c = ctx.sheet("c", vec![log(ymd(2022, 6, 27), &["02:00", "03:00"])]);

        assert!(a.equals(&b));
        assert!(!a.equals(&c));
        assert!(a.copy(Some("copy".to_string())).unwrap().equals(&a));
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_json_dump_and_reload(ctx: &mut SheetContext) {
        let sheet = ctx.sheet("dump", reference_days());
        let path = ctx.temp_dir.path().join("dump.json");

        let written = sheet.write_json(Some(path.as_path())).unwrap();
        assert_eq!(written, path);

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["2022-06-29"], serde_json::json!(["00:10:00", "01:00:00"]));

        let reloaded = Timesheet::from_json(&path, ctx.store.clone(), Some("reloaded".to_string())).unwrap();
        assert!(reloaded.equals(&sheet));
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_json_default_paths_are_numbered(ctx: &mut SheetContext) {
        let sheet = ctx.sheet("work", reference_days());

        let first = sheet.write_json(None).unwrap();
        let second = sheet.write_json(None).unwrap();

        assert_eq!(first, ctx.temp_dir.path().join("work1.json"));
        assert_eq!(second, ctx.temp_dir.path().join("work2.json"));
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_from_json_rejects_unordered_times(ctx: &mut SheetContext) {
        let path = ctx.temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"2022-06-27": ["03:00:00", "02:00:00"]}"#).unwrap();
        let err = Timesheet::from_json(&path, ctx.store.clone(), None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_summarize(ctx: &mut SheetContext) {
        let sheet = ctx.sheet("sum", reference_days());
        let summary = sheet.summarize(DateRange::default(), TimeAggregate::Day);

        assert_eq!(summary.keys(), vec!["2022-06-27", "2022-06-28", "2022-06-29"]);
        assert!((summary.get("2022-06-27").unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(summary.get("2022-06-28").unwrap(), 0.0);
    }

    #[test_context(SheetContext)]
    #[test]
    fn test_summary_files(ctx: &mut SheetContext) {
        let sheet = ctx.sheet("files", reference_days());
        let json_path = ctx.temp_dir.path().join("out/summary.json");
        let csv_path = ctx.temp_dir.path().join("out/summary.csv");

        sheet.write_json_summary(&json_path, DateRange::default(), TimeAggregate::Month).unwrap();
        sheet.write_csv_summary(&csv_path, DateRange::default(), TimeAggregate::Month).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert!((value["2022-6"].as_f64().unwrap() - (1.5 + 5.0 / 6.0)).abs() < 1e-9);

        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,year,month,hours"));
        assert!(lines.next().unwrap().starts_with("2022-6,2022,6,2.33"));
    }
}
