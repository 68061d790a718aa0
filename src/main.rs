use std::process::ExitCode;

use shortname_aliases::{cli, ui};

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
