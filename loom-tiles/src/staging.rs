//! Turns a layout-hint record into concrete pre-constraints.
//!
//! Two passes: Voronoi-region grass (natural-looking patches instead of
//! uniform quadrants), then floor seeds on a jittered coarse lattice to
//! anchor buildings in the non-grass remainder. The output is a plain list
//! of `(x, y, kind)` triples; feeding them to a solver is the caller's job.

use std::collections::HashSet;

use log::debug;
use rand::{Rng, RngCore};

use crate::hints::LayoutHints;
use crate::tile::TileKind;

/// One Voronoi site; every cell belongs to its nearest site.
struct VoronoiSite {
    x: f64,
    y: f64,
    grass: bool,
}

/// Number of Voronoi sites for a grid, scaled by the clustering hint.
///
/// The reference density is one site per ~250 cells (10 sites at 50x50);
/// stronger clustering thins the sites out, producing fewer, larger regions.
fn site_count(width: usize, height: usize, clustering: f32) -> usize {
    let base = (width * height) as f64 / 250.0;
    let scaled = base * (1.5 - f64::from(clustering));
    scaled.ceil().max(1.0) as usize
}

/// Scatters grass pre-constraints over Voronoi regions.
///
/// Sites are placed uniformly; each is grass with probability
/// `hints.grass_ratio`. Every cell takes the grass-ness of its nearest site
/// (squared distance, no need for the root), and each grass cell yields one
/// `Grass` triple.
pub fn scatter_grass(
    width: usize,
    height: usize,
    hints: &LayoutHints,
    rng: &mut dyn RngCore,
) -> Vec<(usize, usize, TileKind)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let sites: Vec<VoronoiSite> = (0..site_count(width, height, hints.clustering))
        .map(|_| VoronoiSite {
            x: rng.gen_range(0.0..width as f64),
            y: rng.gen_range(0.0..height as f64),
            grass: rng.gen_bool(f64::from(hints.grass_ratio)),
        })
        .collect();

    let mut out = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let mut min_dist = f64::MAX;
            let mut nearest_is_grass = false;
            for site in &sites {
                let dx = x as f64 - site.x;
                let dy = y as f64 - site.y;
                let dist = dx * dx + dy * dy;
                if dist < min_dist {
                    min_dist = dist;
                    nearest_is_grass = site.grass;
                }
            }
            if nearest_is_grass {
                out.push((x, y, TileKind::Grass));
            }
        }
    }
    debug!(
        "voronoi grass staging: {} sites, {}/{} cells grass",
        sites.len(),
        out.len(),
        width * height
    );
    out
}

/// Scatters floor seeds on a jittered coarse lattice, skipping `occupied`
/// cells.
///
/// Lattice pitch is twice the building size hint, so neighboring seeds leave
/// room for walls to grow between them. Each lattice cell receives a seed
/// with probability `hints.building_density`, jittered within the cell.
fn scatter_floor_seeds(
    width: usize,
    height: usize,
    hints: &LayoutHints,
    occupied: &HashSet<(usize, usize)>,
    rng: &mut dyn RngCore,
) -> Vec<(usize, usize, TileKind)> {
    let pitch = (hints.building_size_hint.max(1) as usize) * 2;
    let cols = width.div_ceil(pitch);
    let rows = height.div_ceil(pitch);

    let mut out = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if !rng.gen_bool(f64::from(hints.building_density)) {
                continue;
            }
            let x = col * pitch + rng.gen_range(0..pitch);
            let y = row * pitch + rng.gen_range(0..pitch);
            if x >= width || y >= height || occupied.contains(&(x, y)) {
                continue;
            }
            out.push((x, y, TileKind::Floor));
        }
    }
    debug!(
        "floor seed staging: pitch {pitch}, {} seeds on a {cols}x{rows} lattice",
        out.len()
    );
    out
}

/// Full staging pass: grass regions first, then floor seeds in the gaps.
pub fn stage_layout(
    width: usize,
    height: usize,
    hints: &LayoutHints,
    rng: &mut dyn RngCore,
) -> Vec<(usize, usize, TileKind)> {
    let mut out = scatter_grass(width, height, hints, rng);
    let occupied: HashSet<(usize, usize)> = out.iter().map(|&(x, y, _)| (x, y)).collect();
    out.extend(scatter_floor_seeds(width, height, hints, &occupied, rng));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hints(grass_ratio: f32, building_density: f32) -> LayoutHints {
        LayoutHints {
            grass_ratio,
            building_density,
            ..LayoutHints::default()
        }
    }

    #[test]
    fn triples_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(w, h) in &[(1, 1), (5, 9), (50, 50)] {
            for (x, y, _) in stage_layout(w, h, &LayoutHints::default(), &mut rng) {
                assert!(x < w && y < h, "({x}, {y}) outside {w}x{h}");
            }
        }
    }

    #[test]
    fn grass_ratio_zero_yields_no_grass() {
        let mut rng = StdRng::seed_from_u64(11);
        let triples = scatter_grass(50, 50, &hints(0.0, 0.5), &mut rng);
        assert!(triples.is_empty());
    }

    #[test]
    fn grass_ratio_one_covers_everything() {
        let mut rng = StdRng::seed_from_u64(11);
        let triples = scatter_grass(20, 30, &hints(1.0, 0.5), &mut rng);
        assert_eq!(triples.len(), 20 * 30);
        assert!(triples.iter().all(|&(_, _, k)| k == TileKind::Grass));
    }

    #[test]
    fn floor_seeds_avoid_grass_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let triples = stage_layout(50, 50, &hints(0.6, 1.0), &mut rng);
        let grass: HashSet<(usize, usize)> = triples
            .iter()
            .filter(|&&(_, _, k)| k == TileKind::Grass)
            .map(|&(x, y, _)| (x, y))
            .collect();
        for &(x, y, kind) in &triples {
            if kind == TileKind::Floor {
                assert!(!grass.contains(&(x, y)));
            }
        }
    }

    #[test]
    fn same_seed_same_staging() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(99);
            stage_layout(50, 50, &LayoutHints::default(), &mut rng)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn clustering_thins_the_sites() {
        assert!(site_count(50, 50, 1.0) < site_count(50, 50, 0.0));
        assert!(site_count(1, 1, 1.0) >= 1);
    }
}
