//! Logging setup for the application.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the logger from the verbosity flag.
///
/// `RUST_LOG` is respected when set; otherwise `-v` maps to debug and `-vv`
/// (or more) to trace, with info as the baseline.
pub fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let env = Env::default().filter_or("RUST_LOG", level.to_string());
    Builder::from_env(env).init();

    log::debug!("logger initialized at {level} (verbosity flag {verbosity})");
}
