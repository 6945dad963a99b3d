use log::{error, info, warn};
use std::process::ExitCode;
use vote_alignment::ingest::{filter_by_period, load_records};
use vote_alignment::{AnalysisConfig, AnalysisReport, Result, VoteMatrix};

fn run(config: &AnalysisConfig) -> Result<String> {
    let mut records = load_records(&config.votes_file, &config.columns)?;

    if config.start_year.is_some() || config.end_year.is_some() {
        let start = config.start_year.unwrap_or(i32::MIN);
        let end = config.end_year.unwrap_or(i32::MAX);
        records = filter_by_period(&records, start, end);
        info!("{} records within {}..={}", records.len(), start, end);
    }

    let matrix = VoteMatrix::from_records(&records)?;
    if matrix.is_empty() {
        warn!("No resolutions to analyse");
    }

    AnalysisReport::build(&matrix, config)?.to_json()
}

fn main() -> ExitCode {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AnalysisConfig::from_env();
    info!("Reading votes from {}", config.votes_file.display());

    match run(&config) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Alignment analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
