//! Entry point for the `landmask` binary.
#![forbid(unsafe_code)]

use env_logger::Env;
use landmask_cli::CliError;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    match landmask_cli::run() {
        Ok(_) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => landmask_cli::report_failure(&err, &mut std::io::stderr()),
    }
}
