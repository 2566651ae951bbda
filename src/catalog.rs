//! The stage catalog
//!
//! An ordered, immutable list of real-world quantities, from the number of
//! humans on Earth (8e9) up to the number of unique shuffles of a 52-card
//! deck (8e67), followed by a terminal reference stage (the Sun) whose size
//! and position are fixed rather than ratio-derived.
//!
//! Loaded once at startup and never mutated. The layout engine assumes
//! numeric magnitudes are strictly positive and strictly increasing with
//! index; `validate` checks that contract up front.

use glam::Vec3;
use serde::Serialize;

/// Fixed geometry for the terminal reference stage, outside the ratio
/// recursion entirely
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceGeometry {
    /// Absolute radius (world units)
    pub radius: f32,
    /// Absolute position
    pub position: Vec3,
}

/// One entry in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct Stage {
    /// Unique key, stable for the process lifetime
    pub id: &'static str,
    /// Display name
    pub label: &'static str,
    /// Scientific notation display string, e.g. "8 x 10^9"
    pub scientific: &'static str,
    /// Full decimal display string
    pub value_label: &'static str,
    /// The quantity itself. Strictly positive for numeric stages; 0.0 on the
    /// reference stage, which carries no magnitude.
    pub magnitude: f64,
    /// Axis the rendered sphere spins around
    pub rotation_axis: Vec3,
    /// Display colors (hex), consumed verbatim by renderers
    pub color: &'static str,
    pub emissive: &'static str,
    /// Particle budget hint for renderers
    pub particle_count: u32,
    /// Present only on the terminal reference stage
    pub reference: Option<ReferenceGeometry>,
}

impl Stage {
    /// True for the terminal reference stage (fixed size, no magnitude)
    #[inline]
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// Catalog contract violations caught by [`StageCatalog::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Empty,
    /// Numeric stage with a zero, negative, or non-finite magnitude
    InvalidMagnitude { index: usize },
    /// Numeric magnitudes must be strictly increasing with index
    NotAscending { index: usize },
    /// A reference stage may only sit at the terminal position
    MisplacedReference { index: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "catalog is empty"),
            CatalogError::InvalidMagnitude { index } => {
                write!(f, "stage {index} has a non-positive or non-finite magnitude")
            }
            CatalogError::NotAscending { index } => {
                write!(f, "stage {index} magnitude is not greater than its predecessor")
            }
            CatalogError::MisplacedReference { index } => {
                write!(f, "reference stage at index {index} is not terminal")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// The ordered stage list
#[derive(Debug, Clone, Serialize)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog from an already-ordered stage list
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// Number of stages, including the terminal reference stage if present
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    /// Index of the last numeric (ratio-scaled) stage
    pub fn last_numeric_index(&self) -> usize {
        self.stages
            .iter()
            .rposition(|s| !s.is_reference())
            .unwrap_or(0)
    }

    /// True if `index` denotes the terminal reference stage
    pub fn is_reference(&self, index: usize) -> bool {
        self.get(index).is_some_and(Stage::is_reference)
    }

    /// Check the data contract: non-empty, numeric magnitudes strictly
    /// positive and strictly ascending, reference stage terminal-only
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.stages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut prev: Option<f64> = None;
        for (index, stage) in self.stages.iter().enumerate() {
            if stage.is_reference() {
                if index != self.stages.len() - 1 {
                    return Err(CatalogError::MisplacedReference { index });
                }
                continue;
            }
            if !(stage.magnitude.is_finite() && stage.magnitude > 0.0) {
                return Err(CatalogError::InvalidMagnitude { index });
            }
            if let Some(p) = prev
                && stage.magnitude <= p
            {
                return Err(CatalogError::NotAscending { index });
            }
            prev = Some(stage.magnitude);
        }
        Ok(())
    }

    /// The canonical catalog: ten counting stages plus the Sun as a terminal
    /// size reference
    pub fn builtin() -> Self {
        let catalog = Self::new(vec![
            Stage {
                id: "humans",
                label: "Humans on Earth",
                scientific: "8 x 10^9",
                value_label: "8,000,000,000",
                magnitude: 8e9,
                rotation_axis: Vec3::new(0.0, 1.0, 0.0),
                color: "#00ff44",
                emissive: "#004400",
                particle_count: 400,
                reference: None,
            },
            Stage {
                id: "trees",
                label: "Trees on Earth",
                scientific: "3 x 10^12",
                value_label: "3,040,000,000,000",
                magnitude: 3.04e12,
                rotation_axis: Vec3::new(0.0, 1.0, 0.5),
                color: "#228B22",
                emissive: "#004400",
                particle_count: 400,
                reference: None,
            },
            Stage {
                id: "cells",
                label: "Cells in Human Body",
                scientific: "3.7 x 10^13",
                value_label: "37,200,000,000,000",
                magnitude: 3.72e13,
                rotation_axis: Vec3::new(1.0, 1.0, 1.0),
                color: "#FF6347",
                emissive: "#550000",
                particle_count: 400,
                reference: None,
            },
            Stage {
                id: "ants",
                label: "Ants on Earth",
                scientific: "2 x 10^16",
                value_label: "20,000,000,000,000,000",
                magnitude: 2e16,
                rotation_axis: Vec3::new(1.0, 0.0, 0.0),
                color: "#a0522d",
                emissive: "#5a2d0c",
                particle_count: 400,
                reference: None,
            },
            Stage {
                id: "seconds",
                label: "Seconds since Big Bang",
                scientific: "4 x 10^17",
                value_label: "430,000,000,000,000,000",
                magnitude: 4e17,
                rotation_axis: Vec3::new(0.0, 0.0, 1.0),
                color: "#888888",
                emissive: "#444444",
                particle_count: 600,
                reference: None,
            },
            Stage {
                id: "sand",
                label: "Grains of Sand",
                scientific: "7.5 x 10^18",
                value_label: "7,500,000,000,000,000,000",
                magnitude: 7.5e18,
                rotation_axis: Vec3::new(0.5, 1.0, 0.0),
                color: "#ffcc00",
                emissive: "#664400",
                particle_count: 800,
                reference: None,
            },
            Stage {
                id: "water",
                label: "Drops of Water in Oceans",
                scientific: "2.6 x 10^25",
                value_label: "26,000,000,000,000,000,000,000,000",
                magnitude: 2.6e25,
                rotation_axis: Vec3::new(1.0, 1.0, 0.0),
                color: "#00aaff",
                emissive: "#004488",
                particle_count: 1600,
                reference: None,
            },
            Stage {
                id: "atoms",
                label: "Atoms on Earth",
                scientific: "10^50",
                value_label: "100,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000",
                magnitude: 1e50,
                rotation_axis: Vec3::new(0.0, 1.0, 1.0),
                color: "#0066ff",
                emissive: "#001133",
                particle_count: 5000,
                reference: None,
            },
            Stage {
                id: "milkyway",
                label: "Atoms in Milky Way",
                scientific: "10^67",
                value_label: "10,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000",
                magnitude: 1e67,
                rotation_axis: Vec3::new(1.0, 0.0, 1.0),
                color: "#aa88ff",
                emissive: "#220044",
                particle_count: 10000,
                reference: None,
            },
            Stage {
                id: "cards",
                label: "# of Shuffles in 52-cards deck",
                scientific: "8 x 10^67",
                value_label: "80,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000,000",
                magnitude: 8e67,
                rotation_axis: Vec3::new(1.0, 0.0, 0.0),
                color: "#00ffff",
                emissive: "#004444",
                particle_count: 15000,
                reference: None,
            },
            Stage {
                id: "sun",
                label: "The Sun",
                scientific: "Reference",
                value_label: "",
                magnitude: 0.0,
                rotation_axis: Vec3::new(0.0, 1.0, 0.0),
                color: "#ffaa00",
                emissive: "#ff4400",
                particle_count: 0,
                reference: Some(ReferenceGeometry {
                    radius: 400.0,
                    position: Vec3::new(0.0, 0.0, -400.0),
                }),
            },
        ]);
        debug_assert!(catalog.validate().is_ok());
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(id: &'static str, magnitude: f64) -> Stage {
        Stage {
            id,
            label: id,
            scientific: "",
            value_label: "",
            magnitude,
            rotation_axis: Vec3::Y,
            color: "#ffffff",
            emissive: "#000000",
            particle_count: 0,
            reference: None,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = StageCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.last_numeric_index(), 9);
        assert!(catalog.is_reference(10));
        assert!(!catalog.is_reference(0));
    }

    #[test]
    fn test_builtin_magnitudes_ascend() {
        let catalog = StageCatalog::builtin();
        let mags: Vec<f64> = catalog
            .iter()
            .filter(|s| !s.is_reference())
            .map(|s| s.magnitude)
            .collect();
        assert!(mags.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let catalog = StageCatalog::new(vec![]);
        assert_eq!(catalog.validate(), Err(CatalogError::Empty));
    }

    #[test]
    fn test_validate_rejects_non_positive_magnitude() {
        let catalog = StageCatalog::new(vec![numeric("a", 10.0), numeric("b", 0.0)]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::InvalidMagnitude { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_non_ascending() {
        let catalog = StageCatalog::new(vec![numeric("a", 100.0), numeric("b", 50.0)]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::NotAscending { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_misplaced_reference() {
        let mut reference = numeric("sun", 0.0);
        reference.reference = Some(ReferenceGeometry {
            radius: 400.0,
            position: Vec3::ZERO,
        });
        let catalog = StageCatalog::new(vec![reference, numeric("a", 10.0)]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::MisplacedReference { index: 0 })
        );
    }

    #[test]
    fn test_last_numeric_index_without_reference() {
        let catalog = StageCatalog::new(vec![numeric("a", 1.0), numeric("b", 2.0)]);
        assert_eq!(catalog.last_numeric_index(), 1);
    }
}
