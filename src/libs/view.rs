use super::day_log::DayLog;
use super::timesheet::Timesheet;
use prettytable::{row, Table};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    /// Prints stored timesheets as a table.
    pub fn timesheets(timesheets: &[Timesheet]) {
        let mut table = Table::new();

        table.add_row(row!["NAME", "DAYS", "HOURS", "CREATED", "LAST SAVE"]);
        for timesheet in timesheets {
            let hours: f64 = timesheet.record().values().map(DayLog::sum_time_intervals).sum();
            let created = timesheet.creation_time().format(DATETIME_FORMAT).to_string();
            let last_save = match timesheet.last_save() {
                Some(saved) => saved.format(DATETIME_FORMAT).to_string(),
                None => "-".to_string(),
            };

            table.add_row(row![
                timesheet.storage_name(),
                timesheet.len(),
                format!("{:.2}", hours),
                created,
                last_save
            ]);
        }
        table.printstd();
    }
}
