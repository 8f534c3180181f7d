use std::process::ExitCode;

use clap::Parser;
use compound_app::platform::{runner, settings};
use compound_core::Location;
use crawl_logging::{crawl_error, LogDestination};
use log::LevelFilter;

const EXAMPLE: &str = "https://contentdm.lib.nccu.edu.tw/digital/collection/lclma/id/3666/rec/39";

/// Downloads every page image of one compound record.
#[derive(Debug, Parser)]
#[command(name = "compound_single", version, after_help = format!("Example: compound_single {EXAMPLE}"))]
struct Cli {
    /// Viewer location of the record, e.g. .../collection/<c>/id/<n>/rec/<r>
    location: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    crawl_logging::initialize(LogDestination::Both, LevelFilter::Info);
    let config = settings::load_config(&settings::config_path());

    let target = match Location::parse_with_default(&cli.location, &config.default_collection) {
        Ok(location) => location,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Usage: compound_single <URL>");
            eprintln!("Example: compound_single {EXAMPLE}");
            return ExitCode::from(2);
        }
    };

    match runner::run(config, runner::Mode::Single(target)).await {
        Ok(report) => {
            runner::report_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            crawl_error!("Run aborted: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
