//! A small runner for the self-check suites.
//!
//! Suites are registered explicitly in a [`Registry`]; [`run`] reads its options from the
//! process arguments, runs every matching case and reports the outcome.

mod config;
mod failure;
mod registry;
mod report;

use std::{io, panic};

use io_trait::Io;

pub use self::{
    config::RunConfig,
    failure::{CaseResult, Failure},
    registry::{Registry, Suite, TestCase},
    report::Report,
};

/// Runs `registry` with the options in `io.args()`. Writes the summary to the `--report` path
/// if one is given.
pub fn run(io: &impl Io, registry: &Registry) -> io::Result<Report> {
    let config = RunConfig::from_io(io)?;
    let report = run_with(&config, registry);
    if let Some(path) = &config.report {
        io.write(path, report.to_string().as_bytes())?;
        log::debug!("report written to {path}");
    }
    Ok(report)
}

pub fn run_with(config: &RunConfig, registry: &Registry) -> Report {
    let mut report = Report::default();
    for suite in registry.suites() {
        for case in suite.cases() {
            let name = format!("{}::{}", suite.name(), case.name);
            if !config.matches(&name) {
                report.skip();
                continue;
            }
            log::debug!("running {name}");
            match run_case(case) {
                Ok(()) => report.pass(),
                Err(failure) => {
                    log::warn!("{name} failed: {failure}");
                    report.fail(name, failure);
                }
            }
        }
    }
    log::info!(
        "{} passed, {} failed, {} filtered out",
        report.passed(),
        report.failures().len(),
        report.skipped()
    );
    report
}

fn run_case(case: &TestCase) -> CaseResult {
    panic::catch_unwind(case.run).unwrap_or_else(|payload| Err(Failure::from_panic(payload)))
}
