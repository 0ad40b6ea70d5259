use colored::{ColoredString, Colorize};
use loom_core::LayoutSolver;
use loom_tiles::TileKind;

/// Renders the resolved grid as colored glyphs on stdout.
pub struct TerminalVisualizer;

impl TerminalVisualizer {
    const fn glyph_char(kind: TileKind) -> &'static str {
        match kind {
            TileKind::Grass => "\"",
            TileKind::Floor => ".",
            TileKind::Door => "+",
            TileKind::WallNorth | TileKind::WallSouth => "-",
            TileKind::WallEast | TileKind::WallWest => "|",
            TileKind::CornerNe | TileKind::CornerNw | TileKind::CornerSe | TileKind::CornerSw => {
                "#"
            }
        }
    }

    fn glyph(kind: TileKind) -> ColoredString {
        let glyph = Self::glyph_char(kind);
        match kind {
            TileKind::Grass => glyph.green(),
            TileKind::Floor => glyph.white(),
            TileKind::Door => glyph.yellow(),
            _ => glyph.blue(),
        }
    }

    /// Prints one glyph per cell, one row per line. Unresolved cells (which
    /// a completed generation never leaves behind) render as '?'.
    pub fn display(&self, solver: &LayoutSolver) {
        for y in 0..solver.height() {
            let mut line = String::new();
            for x in 0..solver.width() {
                let glyph = solver
                    .tile_at(x, y)
                    .map_or_else(|| "?".red(), Self::glyph);
                line.push_str(&glyph.to_string());
            }
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_distinguish_tile_families() {
        // Walls and corners intentionally share a color; the characters must
        // still distinguish the families.
        let chars: std::collections::HashSet<&str> = [
            TerminalVisualizer::glyph_char(TileKind::Grass),
            TerminalVisualizer::glyph_char(TileKind::Floor),
            TerminalVisualizer::glyph_char(TileKind::Door),
            TerminalVisualizer::glyph_char(TileKind::WallNorth),
            TerminalVisualizer::glyph_char(TileKind::WallEast),
            TerminalVisualizer::glyph_char(TileKind::CornerSw),
        ]
        .into_iter()
        .collect();
        assert_eq!(chars.len(), 6);
    }
}
