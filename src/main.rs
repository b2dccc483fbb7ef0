//! Binary entrypoint for the `bower-away` CLI.

use std::process::ExitCode;

use bower_away::Status;

fn main() -> ExitCode {
    match bower_away::run(std::env::args()) {
        Ok(Status::Done) => ExitCode::SUCCESS,
        Ok(Status::Pending) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
