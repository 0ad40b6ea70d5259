use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use loom_core::LayoutSolver;

/// Saves the resolved grid to a file in a simple text format.
///
/// Format: space-separated tile encodings (0..=10) along X, one line per
/// row. Generation is total, so an unresolved cell here is an internal bug
/// and is reported as such rather than written out.
pub fn save_grid_to_file(solver: &LayoutSolver, output_path: &Path) -> Result<()> {
    log::info!("saving {}x{} layout to {:?}", solver.width(), solver.height(), output_path);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {output_path:?}"))?;
    let mut writer = io::BufWriter::new(file);

    for y in 0..solver.height() {
        let mut line = String::new();
        for x in 0..solver.width() {
            let index = solver.tile_index_at(x, y);
            if index < 0 {
                bail!("cell ({x}, {y}) is unresolved, cannot save");
            }
            if x > 0 {
                line.push(' ');
            }
            line.push_str(&index.to_string());
        }
        writeln!(writer, "{line}").with_context(|| format!("Failed to write row {y}"))?;
    }

    writer
        .flush()
        .context("Failed to flush writer for output file")?;
    Ok(())
}
