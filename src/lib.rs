pub mod error;
pub mod load;
pub mod structs;
pub mod summary;
pub mod transform;

// Re-export public API
pub use error::{ReportError, Result};
pub use load::{load_data_from_csv, load_data_from_reader, write_report};
pub use structs::{
    ConvertedRecord, OutputFormat, Overview, ReportConfig, ReportKind, SimpleLogger,
    WeatherRecord,
};
pub use summary::{build_overview, generate_daily_summary, generate_summary, render_report};
pub use transform::{
    DEGREE_SYMBOL, Numeric, calculate_mean, convert_date, convert_f_to_c, convert_record,
    convert_records, find_max, find_min, format_temperature,
};
