use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};

/// Simple logger implementation
///
/// Writes to stderr so that report text on stdout can be piped.
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// One day of raw weather data as read from the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// ISO-8601 date or date-time, kept exactly as it appeared in the file
    pub date: String,
    pub min_temp_f: i64,
    pub max_temp_f: i64,
}

impl WeatherRecord {
    pub fn new(date: impl Into<String>, min_temp_f: i64, max_temp_f: i64) -> Self {
        Self {
            date: date.into(),
            min_temp_f,
            max_temp_f,
        }
    }
}

/// A record with a human-readable date and temperatures in Celsius (1dp).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedRecord {
    pub date: String,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
}

/// Extremes and averages across a whole dataset.
///
/// `lowest_date` and `highest_date` belong to the last record holding the
/// respective extreme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub days: usize,
    pub lowest: f64,
    pub lowest_date: String,
    pub highest: f64,
    pub highest_date: String,
    pub average_low: f64,
    pub average_high: f64,
}

/// Which sections of the report to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    Overview,
    Daily,
    All,
}

/// Output encoding for a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Configuration for report rendering
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub report: ReportKind,
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report: ReportKind::All,
            format: OutputFormat::Text,
        }
    }
}
