use crate::error::{ReportError, Result};
use crate::structs::WeatherRecord;
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::{fs::File, io::Read, path::Path};

/// Reads weather records from a CSV file.
///
/// The first non-empty line is a header and is discarded; the csv reader skips
/// empty lines, including any before the header. Each following non-blank
/// line must hold `date,min_temp_f,max_temp_f`, with both temperatures as
/// base-10 integers. Records keep the order of the file.
///
/// # Arguments
/// * `csv_file` - Path to the CSV file
///
/// # Returns
/// Returns the records in file order; an empty `Vec` when the file only has a header.
///
/// # Errors
/// Returns `ReportError::Io` if the file cannot be opened and
/// `ReportError::Parse` if a row is short or a temperature is not an integer.
pub fn load_data_from_csv(csv_file: &Path) -> Result<Vec<WeatherRecord>> {
    debug!("Reading CSV file: {}", csv_file.display());
    let file = File::open(csv_file)?;
    let records = load_data_from_reader(file)?;
    debug!(
        "Loaded {} records from {}",
        records.len(),
        csv_file.display()
    );
    Ok(records)
}

/// Reads weather records from any CSV source.
///
/// Same rules as [`load_data_from_csv`]. A line made only of separators,
/// such as `,,`, is not blank and fails as a `ReportError::Parse`.
pub fn load_data_from_reader<R: Read>(reader: R) -> Result<Vec<WeatherRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut data = Vec::new();
    let mut skipped = 0;
    for row in reader.records() {
        let row = row?;
        if is_blank(&row) {
            skipped += 1;
            continue;
        }
        data.push(parse_row(&row)?);
    }

    if skipped > 0 {
        debug!("Skipped {} blank rows", skipped);
    }
    Ok(data)
}

// Only a line with nothing but whitespace; `,,` still has three fields
// and must go through parse_row.
fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].trim().is_empty()
}

fn parse_row(row: &StringRecord) -> Result<WeatherRecord> {
    let line = row.position().map_or(0, |position| position.line());
    if row.len() < 3 {
        return Err(ReportError::Parse(format!(
            "line {}: expected 3 fields (date,min,max), found {}",
            line,
            row.len()
        )));
    }

    Ok(WeatherRecord {
        date: row[0].to_string(),
        min_temp_f: parse_temp(&row[1], line)?,
        max_temp_f: parse_temp(&row[2], line)?,
    })
}

fn parse_temp(field: &str, line: u64) -> Result<i64> {
    field.trim().parse::<i64>().map_err(|e| {
        ReportError::Parse(format!(
            "line {}: temperature '{}' is not an integer: {}",
            line, field, e
        ))
    })
}

/// Writes a rendered report to a file, replacing any existing content.
///
/// # Errors
/// Returns error if the file cannot be created or written to.
pub fn write_report(report: &str, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, report)?;
    debug!("Wrote report to {}", output_path.display());
    Ok(())
}
