use crate::error::{ReportError, Result};
use crate::structs::{ConvertedRecord, WeatherRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Unicode degree sign followed by the Celsius unit.
pub const DEGREE_SYMBOL: &str = "\u{00B0}C";

const DATE_FORMAT: &str = "%Y-%m-%d";
const HUMAN_DATE_FORMAT: &str = "%A %d %B %Y";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A value that can be read as a floating-point number.
///
/// Implemented for the primitive numeric types and for strings, so the
/// converters accept raw CSV fields as well as already-parsed values.
pub trait Numeric {
    fn to_f64(&self) -> Result<f64>;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(&self) -> Result<f64> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

impl_numeric!(i32, i64, u32, u64, usize, f32, f64);

impl Numeric for str {
    fn to_f64(&self) -> Result<f64> {
        self.trim()
            .parse::<f64>()
            .map_err(|e| ReportError::Parse(format!("'{}' is not a number: {}", self, e)))
    }
}

impl Numeric for String {
    fn to_f64(&self) -> Result<f64> {
        self.as_str().to_f64()
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_f64(&self) -> Result<f64> {
        (**self).to_f64()
    }
}

/// Renders a Celsius value with one decimal place and the degree symbol.
pub fn format_temperature(temp: f64) -> String {
    format!("{:.1}{}", temp, DEGREE_SYMBOL)
}

/// Converts an ISO-8601 date into a human readable form.
///
/// Accepts a plain calendar date, a naive date-time (`T` or space separated)
/// or an RFC 3339 timestamp. Timestamps keep the calendar date of their own
/// offset.
///
/// # Examples
///
/// ```
/// use weather_report::convert_date;
///
/// assert_eq!(convert_date("2021-07-06").unwrap(), "Tuesday 06 July 2021");
/// ```
///
/// # Errors
///
/// Returns `ReportError::Parse` if the input matches none of the accepted forms.
pub fn convert_date(iso_string: &str) -> Result<String> {
    let date = parse_iso_date(iso_string.trim())?;
    Ok(date.format(HUMAN_DATE_FORMAT).to_string())
}

fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.date_naive());
    }

    if let Some(date_time) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
    {
        return Ok(date_time.date());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| ReportError::Parse(format!("'{}' is not an ISO-8601 date: {}", input, e)))
}

/// Converts a temperature from Fahrenheit to Celsius, rounded to 1dp.
///
/// # Errors
///
/// Returns `ReportError::Parse` if the value cannot be read as a number.
pub fn convert_f_to_c<T: Numeric>(temp_in_fahrenheit: T) -> Result<f64> {
    let fahrenheit = temp_in_fahrenheit.to_f64()?;
    Ok(round_1dp((fahrenheit - 32.0) * (5.0 / 9.0)))
}

/// Rounds to one decimal place, ties to even.
///
/// Float formatting rounds the exact binary value, so `11.65` (stored just
/// above the tie) goes up while an exact tie such as `0.25` goes to `0.2`.
pub(crate) fn round_1dp(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

/// Calculates the arithmetic mean of a list of numbers.
///
/// # Errors
///
/// Returns `ReportError::Precondition` for an empty slice and
/// `ReportError::Parse` if any element is not numeric.
pub fn calculate_mean<T: Numeric>(values: &[T]) -> Result<f64> {
    if values.is_empty() {
        return Err(ReportError::Precondition(
            "cannot calculate the mean of an empty list".to_string(),
        ));
    }

    let total = values
        .iter()
        .map(Numeric::to_f64)
        .sum::<Result<f64>>()?;
    Ok(total / values.len() as f64)
}

/// Finds the minimum value and the index of its last occurrence.
///
/// Returns `Ok(None)` for an empty slice.
///
/// # Errors
///
/// Returns `ReportError::Parse` if any element is not numeric.
pub fn find_min<T: Numeric>(values: &[T]) -> Result<Option<(f64, usize)>> {
    find_last_extreme(values, |candidate, best| candidate < best)
}

/// Finds the maximum value and the index of its last occurrence.
///
/// Returns `Ok(None)` for an empty slice.
///
/// # Errors
///
/// Returns `ReportError::Parse` if any element is not numeric.
pub fn find_max<T: Numeric>(values: &[T]) -> Result<Option<(f64, usize)>> {
    find_last_extreme(values, |candidate, best| candidate > best)
}

// Scans from the end and only replaces on a strict improvement, so ties
// resolve to the highest index.
fn find_last_extreme<T: Numeric>(
    values: &[T],
    better: fn(f64, f64) -> bool,
) -> Result<Option<(f64, usize)>> {
    let mut extreme: Option<(f64, usize)> = None;
    for (index, value) in values.iter().enumerate().rev() {
        let value = value.to_f64()?;
        match extreme {
            Some((best, _)) if !better(value, best) => {}
            _ => extreme = Some((value, index)),
        }
    }
    Ok(extreme)
}

/// Converts a raw record into Celsius with a human readable date.
pub fn convert_record(record: &WeatherRecord) -> Result<ConvertedRecord> {
    Ok(ConvertedRecord {
        date: convert_date(&record.date)?,
        min_temp_c: convert_f_to_c(record.min_temp_f)?,
        max_temp_c: convert_f_to_c(record.max_temp_f)?,
    })
}

/// Converts every record of a dataset, preserving order.
pub fn convert_records(records: &[WeatherRecord]) -> Result<Vec<ConvertedRecord>> {
    records.iter().map(convert_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_f_to_c() {
        assert_eq!(convert_f_to_c(32).unwrap(), 0.0);
        assert_eq!(convert_f_to_c(212).unwrap(), 100.0);
        assert_eq!(convert_f_to_c(90).unwrap(), 32.2);
        assert_eq!(convert_f_to_c(49).unwrap(), 9.4);
        assert_eq!(convert_f_to_c(-40).unwrap(), -40.0);
    }

    #[test]
    fn test_convert_f_to_c_from_strings() {
        assert_eq!(convert_f_to_c("68").unwrap(), 20.0);
        assert_eq!(convert_f_to_c(" 77.5 ".to_string()).unwrap(), 25.3);
        assert!(matches!(
            convert_f_to_c("warm"),
            Err(ReportError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for fahrenheit in -100..=150 {
            let celsius = convert_f_to_c(fahrenheit).unwrap();
            let back = celsius * 9.0 / 5.0 + 32.0;
            assert!(
                (back - fahrenheit as f64).abs() <= 0.1 + 1e-9,
                "{} -> {} -> {}",
                fahrenheit,
                celsius,
                back
            );
        }
    }

    #[test]
    fn test_round_1dp_ties_to_even() {
        assert_eq!(round_1dp(0.25), 0.2);
        assert_eq!(round_1dp(0.75), 0.8);
        assert_eq!(round_1dp(11.65), 11.7);
        assert_eq!(round_1dp(-9.44), -9.4);
    }

    #[test]
    fn test_convert_date() {
        assert_eq!(convert_date("2021-07-06").unwrap(), "Tuesday 06 July 2021");
        assert_eq!(
            convert_date("2021-07-02T07:00:00+08:00").unwrap(),
            "Friday 02 July 2021"
        );
        assert_eq!(
            convert_date("2020-02-29 23:15").unwrap(),
            "Saturday 29 February 2020"
        );
        assert_eq!(
            convert_date("2021-12-31T23:59:59.250").unwrap(),
            "Friday 31 December 2021"
        );
    }

    #[test]
    fn test_convert_date_keeps_offset_date() {
        // 01:00 at +10:00 is still the previous day in UTC
        assert_eq!(
            convert_date("2021-07-07T01:00:00+10:00").unwrap(),
            "Wednesday 07 July 2021"
        );
    }

    #[test]
    fn test_convert_date_rejects_garbage() {
        for input in ["", "06/07/2021", "2021-13-01", "2021-02-30", "yesterday"] {
            assert!(
                matches!(convert_date(input), Err(ReportError::Parse(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_calculate_mean() {
        assert_eq!(calculate_mean(&[1, 2, 3, 4]).unwrap(), 2.5);
        assert_eq!(calculate_mean(&["1", "2", "3", "4"]).unwrap(), 2.5);
        assert_eq!(calculate_mean(&[9.4, 13.9]).unwrap(), 11.65);
    }

    #[test]
    fn test_calculate_mean_empty_is_precondition_error() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            calculate_mean(&empty),
            Err(ReportError::Precondition(_))
        ));
    }

    #[test]
    fn test_find_min_last_occurrence() {
        assert_eq!(find_min(&[1, 2, 3, 1]).unwrap(), Some((1.0, 3)));
        assert_eq!(find_min(&[5.5, -2.0, 7.0]).unwrap(), Some((-2.0, 1)));
        assert_eq!(find_min(&[4]).unwrap(), Some((4.0, 0)));
    }

    #[test]
    fn test_find_max_last_occurrence() {
        assert_eq!(find_max(&[3, 1, 3, 2]).unwrap(), Some((3.0, 2)));
        assert_eq!(find_max(&[20.0, 20.0, 20.0]).unwrap(), Some((20.0, 2)));
    }

    #[test]
    fn test_find_extremes_over_record_fields() {
        let records = [
            WeatherRecord::new("2021-07-05", 49, 67),
            WeatherRecord::new("2021-07-06", 57, 68),
            WeatherRecord::new("2021-07-07", 49, 68),
        ];
        let lows: Vec<i64> = records.iter().map(|r| r.min_temp_f).collect();
        let highs: Vec<i64> = records.iter().map(|r| r.max_temp_f).collect();
        assert_eq!(find_min(&lows).unwrap(), Some((49.0, 2)));
        assert_eq!(find_max(&highs).unwrap(), Some((68.0, 2)));
    }

    #[test]
    fn test_find_extremes_from_strings() {
        assert_eq!(find_min(&["3", "-1", "-1"]).unwrap(), Some((-1.0, 2)));
        assert!(matches!(
            find_max(&["3", "hot"]),
            Err(ReportError::Parse(_))
        ));
    }

    #[test]
    fn test_find_extremes_empty() {
        let empty: [i32; 0] = [];
        assert_eq!(find_min(&empty).unwrap(), None);
        assert_eq!(find_max(&empty).unwrap(), None);
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(20.0), "20.0°C");
        assert_eq!(format_temperature(-3.9), "-3.9°C");
    }

    #[test]
    fn test_convert_record() {
        let record = WeatherRecord::new("2021-07-05", 49, 67);
        let converted = convert_record(&record).unwrap();
        assert_eq!(converted.date, "Monday 05 July 2021");
        assert_eq!(converted.min_temp_c, 9.4);
        assert_eq!(converted.max_temp_c, 19.4);
    }
}
