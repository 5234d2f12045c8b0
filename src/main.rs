use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;
use weather_report::{
    OutputFormat, ReportConfig, ReportError, ReportKind, SimpleLogger, load_data_from_csv,
    render_report, write_report,
};

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input CSV file with a header row followed by date,min_temp_f,max_temp_f rows
    #[arg(short, long)]
    input_file: PathBuf,

    /// Sections of the report to print
    #[arg(long, default_value = "all")]
    report: ReportKind,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<(), ReportError> {
    let total_start = Instant::now();
    let args = Args::parse();

    if log::set_logger(&LOGGER).is_ok() {
        if args.debug {
            log::set_max_level(log::LevelFilter::Debug);
        } else {
            log::set_max_level(log::LevelFilter::Info);
        }
    }

    debug!(
        "Input file: {} | Report: {:?} | Format: {:?}",
        args.input_file.display(),
        args.report,
        args.format
    );

    let config = ReportConfig {
        report: args.report,
        format: args.format,
    };

    let records = load_data_from_csv(&args.input_file)?;
    let report = render_report(&records, &config)?;

    match &args.output {
        Some(path) => {
            write_report(&report, path)?;
            info!(
                "Wrote {} day report to {}",
                records.len(),
                path.display()
            );
        }
        None => print!("{}", report),
    }

    debug!("Completed in {:.2?}", total_start.elapsed());
    Ok(())
}
