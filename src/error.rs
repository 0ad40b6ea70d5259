use thiserror::Error;

use loom_core::SolverError;
use loom_tiles::HintsError;

/// Application-level errors; the library layers stay total, so everything
/// here originates at the boundary (arguments, files, hint records).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Solver Error: {0}")]
    Solver(#[from] SolverError),

    #[error("Hints Error: {0}")]
    Hints(#[from] HintsError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
