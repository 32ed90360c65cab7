//! rosterd entry point
//!
//! Minimal dispatcher: parse arguments, run the command, print errors to
//! stderr, exit non-zero on failure. All logic lives in the cli module.

use rosterd::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
