#![warn(clippy::pedantic)]

use std::{
    fs::File,
    io::BufReader,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use log::info;
use swoleth_loader::{config::Config, loader::run, log::Stderr, report::Report, row::read_rows};

fn main() -> ExitCode {
    match load() {
        Ok(report) if report.failed() == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn load() -> anyhow::Result<Report> {
    let config = Config::from_env()?;

    swoleth_loader::log::init(
        Arc::new(Mutex::new(Stderr::new(config.log_format))),
        config.log_level,
    )?;

    let caller = config.caller()?;

    let input = File::open(&config.input)
        .with_context(|| format!("failed to open {}", config.input.display()))?;
    let rows = read_rows(BufReader::new(input), config.has_header)
        .with_context(|| format!("failed to read {}", config.input.display()))?;

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let report = runtime.block_on(run(&config, caller, rows))?;

    println!("{}", report.to_json()?);

    info!(
        "{} rows upserted, {} rows failed",
        report.succeeded(),
        report.failed()
    );

    Ok(report)
}
