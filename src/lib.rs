//! Scale Voyage - a journey through quantities spanning 67 orders of magnitude
//!
//! Core modules:
//! - `catalog`: The ordered stage catalog (humans on Earth up to card-deck shuffles)
//! - `sim`: Deterministic core (layout, animation smoothing, camera framing, puzzle)
//! - `journey`: Composition root driving navigation, the tick loop, and render frames
//!
//! Rendering, DOM presentation, and asset loading are external collaborators;
//! this crate only produces the per-tick visual state they consume.

pub mod catalog;
pub mod journey;
pub mod sim;

pub use catalog::{Stage, StageCatalog};
pub use journey::{Journey, RenderFrame};

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Radius of the active stage sphere
    pub const BASE_RADIUS: f32 = 4.0;
    /// Horizontal gap between adjacent stage spheres
    pub const STAGE_GAP: f32 = 1.0;
    /// Visual floor: ratio-derived radii never render smaller than this
    pub const MIN_RADIUS: f32 = 0.02;
    /// Seed radius for a stage first appearing as the active one
    /// (it shrinks into place from here)
    pub const ENTRY_RADIUS: f32 = 60.0;

    /// Exponential smoothing rate for entity radius/position (per second)
    pub const SMOOTH_RATE: f32 = 2.0;
    /// Exponential smoothing rate for the camera (per second)
    pub const CAMERA_SMOOTH_RATE: f32 = 1.5;

    /// Vertical camera field of view (radians)
    pub const CAMERA_FOV: f32 = 60.0 * std::f32::consts::PI / 180.0;
    /// The active stage fills this many radii of vertical frame height
    pub const FRAME_HEIGHT_FACTOR: f32 = 4.0;
    /// Camera eye lift above the look-at point, as a fraction of the active radius
    pub const CAMERA_LIFT: f32 = 0.5;

    /// Square span (world units) the reference stage view must fit
    pub const REFERENCE_SPAN: f32 = 1000.0;
    /// Margin multiplier applied to the reference fit distance
    pub const REFERENCE_MARGIN: f32 = 1.2;
    /// Horizontal offset of the reference stage framing
    pub const REFERENCE_VIEW_X: f32 = 355.0;

    /// Number of catalog stages in the ordering puzzle (the terminal
    /// reference stage is excluded)
    pub const TOTAL_GAME_ITEMS: usize = 10;
}

/// Pinhole-camera distance at which an object of the given size spans the
/// full frame for a vertical field of view `fov`
#[inline]
pub fn fit_distance(size: f32, fov: f32) -> f32 {
    size / (2.0 * (fov / 2.0).tan())
}

/// One exponential-decay smoothing step: move `current` toward `target` by
/// the fraction `rate * dt`, clamped so the value never overshoots
#[inline]
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_distance_unit_fov() {
        // 90 degree fov: tan(fov/2) = 1, so distance = size / 2
        let d = fit_distance(10.0, std::f32::consts::FRAC_PI_2);
        assert!((d - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_approach_never_overshoots() {
        // Huge dt clamps the blend factor at 1 and lands exactly on target
        let v = approach(0.0, 10.0, 2.0, 100.0);
        assert_eq!(v, 10.0);

        // Normal step moves strictly toward target
        let v = approach(0.0, 10.0, 2.0, 0.1);
        assert!(v > 0.0 && v < 10.0);
    }

    #[test]
    fn test_approach_zero_dt_is_identity() {
        assert_eq!(approach(3.0, 10.0, 2.0, 0.0), 3.0);
    }
}
