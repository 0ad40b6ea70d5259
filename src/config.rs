use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use loom_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use loom_tiles::LayoutHints;

use crate::error::AppError;

/// Represents the different visualization modes available.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualizationMode {
    #[default]
    None,
    /// Colored per-tile glyphs on stdout.
    Terminal,
}

/// Configuration for the tile-loom application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Width of the output grid.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Height of the output grid.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Optional seed for the random number generator; fixed seeds reproduce
    /// the exact same layout.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to save the generated layout.
    #[arg(short, long, value_name = "FILE", default_value = "layout.txt")]
    pub output_path: PathBuf,

    /// Optional TOML file with layout hints (merged under CLI overrides and
    /// TILE_LOOM_* environment variables).
    #[arg(long, value_name = "FILE")]
    pub hints_file: Option<PathBuf>,

    /// Override the grass ratio hint (0..=1).
    #[arg(long)]
    pub grass_ratio: Option<f32>,

    /// Override the building density hint (0..=1).
    #[arg(long)]
    pub building_density: Option<f32>,

    /// Override the clustering hint (0..=1).
    #[arg(long)]
    pub clustering: Option<f32>,

    /// Override the building size hint (cells).
    #[arg(long)]
    pub building_size_hint: Option<u32>,

    /// Skip hint staging entirely; generate from explicit --fix seeds only.
    #[arg(long, default_value_t = false)]
    pub no_staging: bool,

    /// Force a tile before generation, as "x,y,kind" with kind encoded
    /// 0..=10. Repeatable; later entries win on the same cell.
    #[arg(long, value_name = "X,Y,KIND", value_parser = parse_fixed_tile)]
    pub fix: Vec<(usize, usize, i32)>,

    /// Report progress updates every specified interval (e.g. "1s", "500ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub report_progress_interval: Option<Duration>,

    /// Choose the visualization mode.
    #[arg(long, value_enum, default_value_t = VisualizationMode::None)]
    pub visualization_mode: VisualizationMode,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_fixed_tile(raw: &str) -> Result<(usize, usize, i32), String> {
    let mut parts = raw.split(',');
    let mut next = |name: &str| {
        parts
            .next()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("missing {name} in '{raw}' (expected x,y,kind)"))
    };
    let x = next("x")?
        .parse::<usize>()
        .map_err(|e| format!("bad x: {e}"))?;
    let y = next("y")?
        .parse::<usize>()
        .map_err(|e| format!("bad y: {e}"))?;
    let kind = next("kind")?
        .parse::<i32>()
        .map_err(|e| format!("bad kind: {e}"))?;
    if parts.next().is_some() {
        return Err(format!("trailing input in '{raw}' (expected x,y,kind)"));
    }
    Ok((x, y, kind))
}

/// Resolves the effective layout hints: built-in defaults, then the hints
/// file, then `TILE_LOOM_*` environment variables, then CLI overrides.
pub fn resolve_hints(config: &AppConfig) -> Result<LayoutHints, AppError> {
    let mut figment = Figment::from(Serialized::defaults(LayoutHints::default()));
    if let Some(path) = &config.hints_file {
        figment = figment.merge(Toml::file(path));
    }
    let mut hints: LayoutHints = figment
        .merge(Env::prefixed("TILE_LOOM_"))
        .extract()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(v) = config.grass_ratio {
        hints.grass_ratio = v;
    }
    if let Some(v) = config.building_density {
        hints.building_density = v;
    }
    if let Some(v) = config.clustering {
        hints.clustering = v;
    }
    if let Some(v) = config.building_size_hint {
        hints.building_size_hint = v;
    }
    hints.validate()?;
    Ok(hints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_args() {
        let args = vec!["tile-loom", "--width", "20", "--output-path", "out.txt"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, DEFAULT_HEIGHT); // Default
        assert_eq!(config.output_path, PathBuf::from("out.txt"));
        assert_eq!(config.seed, None); // Default
        assert_eq!(config.visualization_mode, VisualizationMode::None); // Default
        assert!(!config.no_staging);
    }

    #[test]
    fn test_fix_triples() {
        let args = vec![
            "tile-loom",
            "--fix",
            "2,3,10",
            "--fix",
            "0,0,1",
        ];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.fix, vec![(2, 3, 10), (0, 0, 1)]);

        let bad = vec!["tile-loom", "--fix", "2,3"];
        assert!(AppConfig::try_parse_from(bad).is_err());
        let bad = vec!["tile-loom", "--fix", "2,3,10,9"];
        assert!(AppConfig::try_parse_from(bad).is_err());
        let bad = vec!["tile-loom", "--fix", "a,3,10"];
        assert!(AppConfig::try_parse_from(bad).is_err());
    }

    #[test]
    fn test_progress_interval() {
        let args = vec!["tile-loom", "--report-progress-interval", "2s"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(
            config.report_progress_interval,
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_visualization_mode() {
        let args = vec!["tile-loom", "--visualization-mode", "terminal"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.visualization_mode, VisualizationMode::Terminal);

        let args_err = vec!["tile-loom", "--visualization-mode", "invalid-mode"];
        assert!(AppConfig::try_parse_from(args_err).is_err());
    }

    #[test]
    fn test_cli_overrides_win_over_defaults() {
        let args = vec!["tile-loom", "--grass-ratio", "0.9", "--clustering", "0.1"];
        let config = AppConfig::try_parse_from(args).unwrap();
        let hints = resolve_hints(&config).unwrap();
        assert_eq!(hints.grass_ratio, 0.9);
        assert_eq!(hints.clustering, 0.1);
        assert_eq!(
            hints.building_density,
            LayoutHints::default().building_density
        );
    }

    #[test]
    fn test_invalid_hints_are_rejected() {
        let args = vec!["tile-loom", "--grass-ratio", "1.5"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert!(resolve_hints(&config).is_err());
    }
}
