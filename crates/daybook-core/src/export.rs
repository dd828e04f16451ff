//! Month export to JSON and CSV text.
//!
//! Exporters only build strings; writing the file is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date_key::MonthKey;
use crate::error::Result;
use crate::store::MonthSlice;

pub const CSV_HEADER: &str = "Date,Name,Start Time,End Time,Description,Category";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// `events-YYYY-MM.<ext>`
    pub fn file_name(&self, month: MonthKey) -> String {
        format!("events-{month}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {other} (expected json or csv)")),
        }
    }
}

/// Rendered export, ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

/// Pretty-printed (2-space) JSON object of day → events.
pub fn to_json(slice: &MonthSlice) -> Result<String> {
    Ok(serde_json::to_string_pretty(slice)?)
}

/// CSV with a fixed header and one row per event.
///
/// Fields are written verbatim; embedded commas are not quoted.
pub fn to_csv(slice: &MonthSlice) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for (date, events) in slice.days() {
        for e in events {
            out.push_str(&format!(
                "{date},{},{},{},{},{}\n",
                e.name(),
                e.start_time(),
                e.end_time(),
                e.description(),
                e.category()
            ));
        }
    }
    out
}

pub fn export(slice: &MonthSlice, format: ExportFormat) -> Result<Export> {
    let contents = match format {
        ExportFormat::Json => to_json(slice)?,
        ExportFormat::Csv => to_csv(slice),
    };
    Ok(Export {
        file_name: format.file_name(slice.month()),
        contents,
    })
}
