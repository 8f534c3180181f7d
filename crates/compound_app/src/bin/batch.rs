use std::process::ExitCode;

use clap::Parser;
use compound_app::platform::{runner, settings};
use crawl_logging::{crawl_error, LogDestination};
use log::LevelFilter;

/// Walks a CONTENTdm collection from its search page and downloads every
/// page image of every compound record.
#[derive(Debug, Parser)]
#[command(name = "compound_batch", version)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    crawl_logging::initialize(LogDestination::Both, LevelFilter::Info);

    let config = settings::load_config(&settings::config_path());
    match runner::run(config, runner::Mode::Batch).await {
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
