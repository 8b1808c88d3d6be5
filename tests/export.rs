#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use timesheet::libs::aggregate::TimeAggregate;
    use timesheet::libs::day_log::DayLog;
    use timesheet::libs::diff_time::DiffTime;
    use timesheet::libs::export::{write_csv, Exporter, OutputType};
    use timesheet::libs::summary::{sum_day_logs, DateRange, Summary};

    struct ExportTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    fn summary(aggregate: TimeAggregate) -> Summary {
        let days = [
            ("2022-06-27", vec!["02:00", "03:00", "07:30", "08:00"]),
            ("2022-06-29", vec!["00:10", "01:00"]),
        ];
        let record: BTreeMap<NaiveDate, DayLog> = days
            .iter()
            .map(|(date, raw)| {
                let date: NaiveDate = date.parse().unwrap();
                let times = raw.iter().map(|t| t.parse::<DiffTime>().unwrap()).collect();
                (date, DayLog::new(date, times).unwrap())
            })
            .collect();
        sum_day_logs(&record, DateRange::default(), aggregate)
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("summary.csv");
        Exporter::new(OutputType::Csv, Some(output_path.clone()))
            .export(&summary(TimeAggregate::Day))
            .unwrap();

        let mut reader = csv::Reader::from_path(&output_path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, vec!["date", "year", "month", "day", "hours"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2022-06-27");
        assert_eq!(&rows[0][2], "6");
        assert_eq!(&rows[0][4], "1.5");
        assert_eq!(&rows[1][0], "2022-06-28");
        assert_eq!(&rows[1][4], "0");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("nested/summary.json");
        Exporter::new(OutputType::Json, Some(output_path.clone()))
            .export(&summary(TimeAggregate::Week))
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!((value["2022-26"].as_f64().unwrap() - (1.5 + 5.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_year_csv_has_single_component() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &summary(TimeAggregate::Year)).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("date,year,hours"));
        assert!(lines.next().unwrap().starts_with("2022,2022,"));
    }
}
