use crate::error::{ReportError, Result};
use crate::structs::{
    ConvertedRecord, OutputFormat, Overview, ReportConfig, ReportKind, WeatherRecord,
};
use crate::transform::{
    calculate_mean, convert_records, find_max, find_min, format_temperature, round_1dp,
};
use log::debug;
use serde::Serialize;

/// Computes extremes and averages across a dataset.
///
/// Ties for the lowest or highest temperature resolve to the last record
/// holding that value, independently for each side.
///
/// # Errors
///
/// Returns `ReportError::Precondition` for an empty dataset and
/// `ReportError::Parse` if a record date is malformed.
pub fn build_overview(weather_data: &[WeatherRecord]) -> Result<Overview> {
    let converted = convert_records(weather_data)?;
    overview_from_converted(&converted)
}

fn overview_from_converted(converted: &[ConvertedRecord]) -> Result<Overview> {
    let lows: Vec<f64> = converted.iter().map(|day| day.min_temp_c).collect();
    let highs: Vec<f64> = converted.iter().map(|day| day.max_temp_c).collect();

    let (lowest, lowest_index) = find_min(&lows)?.ok_or_else(empty_dataset)?;
    let (highest, highest_index) = find_max(&highs)?.ok_or_else(empty_dataset)?;

    let overview = Overview {
        days: converted.len(),
        lowest,
        lowest_date: converted[lowest_index].date.clone(),
        highest,
        highest_date: converted[highest_index].date.clone(),
        average_low: round_1dp(calculate_mean(&lows)?),
        average_high: round_1dp(calculate_mean(&highs)?),
    };
    debug!("Computed overview: {:?}", overview);
    Ok(overview)
}

fn empty_dataset() -> ReportError {
    ReportError::Precondition("cannot summarise an empty dataset".to_string())
}

/// Renders the multi-day overview of a dataset.
///
/// # Errors
///
/// Same as [`build_overview`].
pub fn generate_summary(weather_data: &[WeatherRecord]) -> Result<String> {
    Ok(render_overview(&build_overview(weather_data)?))
}

fn render_overview(overview: &Overview) -> String {
    format!(
        "{} Day Overview\n  \
         The lowest temperature will be {}, and will occur on {}.\n  \
         The highest temperature will be {}, and will occur on {}.\n  \
         The average low this week is {}.\n  \
         The average high this week is {}.\n",
        overview.days,
        format_temperature(overview.lowest),
        overview.lowest_date,
        format_temperature(overview.highest),
        overview.highest_date,
        format_temperature(overview.average_low),
        format_temperature(overview.average_high),
    )
}

/// Renders one block per record, in input order.
///
/// An empty dataset yields an empty string.
pub fn generate_daily_summary(weather_data: &[WeatherRecord]) -> Result<String> {
    Ok(render_daily(&convert_records(weather_data)?))
}

fn render_daily(converted: &[ConvertedRecord]) -> String {
    let mut summary = String::new();
    for day in converted {
        summary.push_str(&format!(
            "---- {} ----\n  Minimum Temperature: {}\n  Maximum Temperature: {}\n\n",
            day.date,
            format_temperature(day.min_temp_c),
            format_temperature(day.max_temp_c),
        ));
    }
    summary
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<Overview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days: Option<&'a [ConvertedRecord]>,
}

/// Renders the sections selected by `config` in the requested format.
///
/// With [`ReportKind::All`] an empty dataset renders only the (empty) daily
/// part; [`ReportKind::Overview`] on an empty dataset is an error.
///
/// # Errors
///
/// Returns `ReportError::Precondition` when an overview is requested for an
/// empty dataset, `ReportError::Parse` for malformed dates and
/// `ReportError::Json` if serialisation fails.
pub fn render_report(weather_data: &[WeatherRecord], config: &ReportConfig) -> Result<String> {
    let converted = convert_records(weather_data)?;

    let overview = match config.report {
        ReportKind::Overview => Some(overview_from_converted(&converted)?),
        ReportKind::All if !converted.is_empty() => Some(overview_from_converted(&converted)?),
        ReportKind::All | ReportKind::Daily => None,
    };
    let include_days = config.report != ReportKind::Overview;

    debug!(
        "Rendering {:?} report as {:?} for {} records",
        config.report,
        config.format,
        converted.len()
    );

    match config.format {
        OutputFormat::Text => {
            let mut report = String::new();
            if let Some(overview) = &overview {
                report.push_str(&render_overview(overview));
                if include_days {
                    report.push('\n');
                }
            }
            if include_days {
                report.push_str(&render_daily(&converted));
            }
            Ok(report)
        }
        OutputFormat::Json => {
            let report = JsonReport {
                overview,
                days: include_days.then_some(converted.as_slice()),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}
