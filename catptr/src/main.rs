use std::process::ExitCode;

use catptr_lib::{harness::run, suites::registry};
use io_impl::RealIo;

fn main() -> ExitCode {
    env_logger::init();
    match run(&RealIo(), &registry()) {
        Ok(report) => {
            print!("{report}");
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
