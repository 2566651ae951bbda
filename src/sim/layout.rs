//! Stage layout computation
//!
//! Given the active stage index, produce a size and horizontal position for
//! every visible stage. The active stage sits at the origin with a fixed
//! reference radius; each earlier stage is placed immediately to its left,
//! scaled by the magnitude ratio to its neighbor. Ratios between adjacent
//! catalog entries span many orders of magnitude, so radii are clamped to a
//! visual floor rather than allowed to vanish below pixel size.

use serde::Serialize;

use crate::catalog::StageCatalog;
use crate::consts::{BASE_RADIUS, MIN_RADIUS, STAGE_GAP};

/// Derived size and position for one visible stage.
///
/// `center_offset` is the horizontal position of the sphere center relative
/// to the active stage (which is always at 0).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutEntry {
    pub stage_index: usize,
    pub radius: f32,
    pub center_offset: f32,
}

/// Compute layout entries for stages `0..=effective_index`, where
/// `effective_index` is `active_index` clamped to the last numeric stage.
///
/// Pure function: no side effects, safe to call on every index change. The
/// result wholesale replaces any prior layout; the animation controller owns
/// making the visual transition smooth.
///
/// The terminal reference stage never receives an entry; its fixed geometry
/// lives on the catalog and bypasses the ratio recursion. When it is active,
/// the numeric stages keep their final layout behind it.
pub fn compute_layout(catalog: &StageCatalog, active_index: usize) -> Vec<LayoutEntry> {
    let effective_index = active_index.min(catalog.last_numeric_index());

    let mut entries = vec![
        LayoutEntry {
            stage_index: 0,
            radius: BASE_RADIUS,
            center_offset: 0.0,
        };
        effective_index + 1
    ];
    entries[effective_index].stage_index = effective_index;

    // Walk right to left, scaling each stage by its magnitude ratio to the
    // neighbor just computed. Ratios are taken in f64: magnitudes reach
    // 8e67, far past f32 range. The clamped radius is comfortably f32.
    for i in (0..effective_index).rev() {
        let right = entries[i + 1];
        let ratio = magnitude(catalog, i) / magnitude(catalog, i + 1);
        let candidate = right.radius as f64 * ratio;
        let radius = if candidate < MIN_RADIUS as f64 {
            MIN_RADIUS
        } else {
            candidate as f32
        };

        entries[i] = LayoutEntry {
            stage_index: i,
            radius,
            center_offset: right.center_offset - (right.radius + radius + STAGE_GAP),
        };
    }

    entries
}

/// Magnitude lookup for numeric indices. The catalog contract guarantees
/// these are strictly positive; a defensive floor keeps a violated contract
/// from injecting infinities into the recursion.
fn magnitude(catalog: &StageCatalog, index: usize) -> f64 {
    catalog
        .get(index)
        .map(|s| s.magnitude)
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(f64::MIN_POSITIVE)
}
