use std::io;
use std::process::ExitCode;

use env_logger::{Builder, Env};
use log::error;

use housing_eda::pipeline::{run, ExperimentParams};

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let report = match run(&ExperimentParams::default()) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    if let Err(err) = report.write_to(&mut stdout.lock()) {
        eprintln!("error: failed to print the report: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
