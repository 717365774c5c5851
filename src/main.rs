//! Fan Hub conformance checker entrypoint.
//!
//! Resolves the backend, runs every check in order, prints the report on
//! stdout and exits non-zero when any check failed.

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Local;
use fanhub_conformance::{
    ApiBase, ConformanceError, ConformanceSuite, FanHubConfig, ReqwestGateway, RunSummary,
    write_json_report,
};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::output::{ProgressWriter, io_error, write_banner, write_summary};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "Test execution failed: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _already_installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunSummary, ConformanceError> {
    let config = load_config()?;

    let api_base = ApiBase::parse(&config.resolve_base_url())?;
    let gateway = ReqwestGateway::new(api_base, config.request_timeout()?)?;

    let mut stdout = io::stdout().lock();
    write_banner(&mut stdout, gateway.api_base(), Local::now().naive_local())?;

    let mut progress = ProgressWriter::new(&mut stdout);
    let summary = ConformanceSuite::new(&gateway).run_all(|result| progress.record(result));
    let report_out = progress.finish()?;

    write_summary(report_out, &summary, Local::now().naive_local())?;
    report_out.flush().map_err(|e| io_error(&e))?;

    if let Some(path) = config.report_path() {
        write_json_report(path, &summary)?;
        tracing::info!("wrote JSON report to {path}");
    }

    Ok(summary)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ConformanceError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<FanHubConfig, ConformanceError> {
    FanHubConfig::load().map_err(|error| ConformanceError::Configuration {
        message: error.to_string(),
    })
}
