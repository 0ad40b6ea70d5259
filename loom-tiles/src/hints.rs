use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised while validating a layout-hint record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HintsError {
    /// A ratio field fell outside the unit interval.
    #[error("{field} must lie in [0, 1], got {value}")]
    UnitRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// `building_size_hint` must be at least one cell.
    #[error("building_size_hint must be at least 1")]
    ZeroSizeHint,
}

/// High-level layout hints produced by an external collaborator.
///
/// The solver never sees this record; constraint staging turns it into plain
/// `(x, y, kind)` pre-constraints. How the record was produced (UI sliders,
/// a language model, hand-written TOML) is none of this crate's business.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutHints {
    /// Fraction of the coarse building lattice that receives a floor seed,
    /// in `[0, 1]`.
    pub building_density: f32,
    /// How strongly grass clumps together, in `[0, 1]`. Higher values mean
    /// fewer, larger Voronoi regions.
    pub clustering: f32,
    /// Probability that a Voronoi region is grass, in `[0, 1]`.
    pub grass_ratio: f32,
    /// Rough building footprint in cells; spaces the floor-seed lattice.
    pub building_size_hint: u32,
}

impl Default for LayoutHints {
    fn default() -> Self {
        // The reference layout: roughly 40% grass, mid density.
        Self {
            building_density: 0.5,
            clustering: 0.5,
            grass_ratio: 0.4,
            building_size_hint: 4,
        }
    }
}

impl LayoutHints {
    /// Checks all fields against their documented ranges.
    ///
    /// # Errors
    ///
    /// Returns `HintsError::UnitRange` for any ratio outside `[0, 1]` and
    /// `HintsError::ZeroSizeHint` for a zero footprint.
    pub fn validate(&self) -> Result<(), HintsError> {
        for (field, value) in [
            ("building_density", self.building_density),
            ("clustering", self.clustering),
            ("grass_ratio", self.grass_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HintsError::UnitRange { field, value });
            }
        }
        if self.building_size_hint == 0 {
            return Err(HintsError::ZeroSizeHint);
        }
        Ok(())
    }
}
