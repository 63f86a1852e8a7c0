//! soulregistry entry point
//!
//! A minimal entrypoint that parses CLI arguments, dispatches to the
//! matching command, prints errors to stderr, and exits non-zero on
//! failure. Configuration loading and boot live in the cli module.

use soulregistry::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
