use std::process::ExitCode;

use dbc_calc::error::SUCCESS;

fn main() -> ExitCode {
    match dbc_calc::app::run() {
        Ok(()) => ExitCode::from(SUCCESS),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
