use exload_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is not writable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and run.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("exload error: {:#}", err);
        std::process::exit(1);
    }
}
