pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod visualization;

use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::{AppConfig, VisualizationMode};
use error::AppError;
use loom_core::{GenerationConfig, LayoutSolver, ProgressCallback};
use loom_tiles::stage_layout;
use visualization::TerminalVisualizer;

fn main() -> Result<()> {
    let config = AppConfig::parse();
    logging::init_logger(config.verbose);
    log::info!("tile-loom starting");
    log::debug!("loaded config: {config:?}");

    run(&config)?;

    log::info!("tile-loom finished");
    Ok(())
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let mut solver = LayoutSolver::new(config.width, config.height)?;

    // --- Constraint staging ---
    if config.no_staging {
        log::info!("hint staging disabled");
    } else {
        let hints = config::resolve_hints(config)?;
        log::debug!("effective hints: {hints:?}");
        let mut staging_rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let triples = stage_layout(config.width, config.height, &hints, &mut staging_rng);
        log::info!("staged {} pre-constraints from hints", triples.len());
        for (x, y, kind) in triples {
            // Staging stays in bounds by construction.
            if !solver.set_pre_constraint(x, y, kind) {
                log::warn!("staged constraint ({x}, {y}) rejected as out of bounds");
            }
        }
    }
    for &(x, y, kind) in &config.fix {
        if !solver.set_pre_constraint_index(x, y, kind) {
            return Err(AppError::Config(format!(
                "--fix {x},{y},{kind} is out of bounds for a {}x{} grid",
                config.width, config.height
            )));
        }
    }

    // --- Progress reporting ---
    let progress_callback: Option<ProgressCallback> =
        config.report_progress_interval.map(|interval| {
            let last_report_time = Arc::new(Mutex::new(Instant::now()));
            Box::new(move |info: &loom_core::ProgressInfo| {
                let Ok(mut last_time) = last_report_time.lock() else {
                    return;
                };
                if last_time.elapsed() >= interval {
                    let percentage =
                        (info.collapsed_cells as f32 / info.total_cells as f32) * 100.0;
                    log::info!(
                        "progress: iteration {}, collapsed {}/{} ({percentage:.1}%)",
                        info.iteration,
                        info.collapsed_cells,
                        info.total_cells,
                    );
                    *last_time = Instant::now();
                }
            }) as ProgressCallback
        });

    // --- Generation ---
    let mut generation = GenerationConfig::builder();
    if let Some(seed) = config.seed {
        generation = generation.seed(seed);
    }
    if let Some(callback) = progress_callback {
        generation = generation.progress_callback(callback);
    }
    let started = Instant::now();
    solver.generate(&generation.build());
    log::info!("generation completed in {:?}", started.elapsed());

    // --- Output ---
    output::save_grid_to_file(&solver, &config.output_path)?;
    if config.visualization_mode == VisualizationMode::Terminal {
        TerminalVisualizer.display(&solver);
    }

    Ok(())
}
