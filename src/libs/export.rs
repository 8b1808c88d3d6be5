//! Writing summaries as JSON or CSV.
//!
//! JSON output is an object of bucket key to hours, in bucket order:
//!
//! ```text
//! { "2022-6": 2.333333, "2022-7": 12.0 }
//! ```
//!
//! CSV output has one row per bucket. The first column is the key, followed
//! by the key's parts and the hours:
//!
//! ```text
//! date,year,month,hours
//! 2022-6,2022,6,2.3333333333333335
//! ```

use crate::libs::data_storage::ensure_parent_dir;
use crate::libs::error::{IoContext, Result, TimesheetError};
use crate::libs::summary::Summary;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputType {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputType {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputType::Json),
            "csv" => Ok(OutputType::Csv),
            _ => Err(TimesheetError::Configuration(format!(
                "Unknown output type {:?}; expected json or csv",
                s
            ))),
        }
    }
}

/// Writes a [`Summary`] to a file, or to stdout when no path is given.
pub struct Exporter {
    format: OutputType,
    output_path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(format: OutputType, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn export(&self, summary: &Summary) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                ensure_parent_dir(path)?;
                let file = File::create(path).at_path(path)?;
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer, summary)?;
                writer.flush().at_path(path)?;
                tracing::debug!(path = %path.display(), format = ?self.format, "exported summary");
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.write_to(&mut handle, summary)?;
                handle.flush().at_path(Path::new("<stdout>"))?;
            }
        }
        Ok(())
    }

    fn write_to<W: Write>(&self, writer: &mut W, summary: &Summary) -> Result<()> {
        match self.format {
            OutputType::Json => write_json(writer, summary),
            OutputType::Csv => write_csv(writer, summary),
        }
    }
}

pub fn write_json<W: Write>(writer: &mut W, summary: &Summary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writeln!(writer).at_path(Path::new("<json output>"))?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: &mut W, summary: &Summary) -> Result<()> {
    let format = summary.aggregate().string_format();
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["date"];
    header.extend_from_slice(format.components);
    header.push("hours");
    wtr.write_record(&header)?;

    for (key, hours) in summary.iter() {
        let mut row = vec![key.clone()];
        row.extend(format.decompose(&key));
        row.push(hours.to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush().at_path(Path::new("<csv output>"))?;
    Ok(())
}
