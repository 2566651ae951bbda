//! Camera targeting and smoothing
//!
//! The view target is a pure function of the active stage and the current
//! layout: frame the active sphere with a pinhole-camera distance derived
//! from a desired on-screen height, or fit the fixed-size reference stage to
//! the viewport. The camera itself glides toward the target under the same
//! exponential-decay law the entities use, so switching stages never causes
//! a jump cut even when the target does.

use glam::Vec3;
use serde::Serialize;

use crate::catalog::StageCatalog;
use crate::consts::{
    CAMERA_FOV, CAMERA_LIFT, CAMERA_SMOOTH_RATE, FRAME_HEIGHT_FACTOR, REFERENCE_MARGIN,
    REFERENCE_SPAN, REFERENCE_VIEW_X,
};
use crate::fit_distance;
use crate::sim::layout::LayoutEntry;

/// Render surface dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Where the camera wants to be and what it wants to look at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Fixed pose shown before the journey starts
const INTRO_POSE: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 0.0, 15.0),
    look_at: Vec3::ZERO,
};

/// Derive the camera target for the given active stage.
///
/// `active` is `None` in the intro state. For numeric stages, `layout` must
/// be the current layout for that active index; the entry for the effective
/// (clamped) index is the one framed.
pub fn compute_view(
    catalog: &StageCatalog,
    active: Option<usize>,
    layout: &[LayoutEntry],
    viewport: Viewport,
) -> CameraTarget {
    let Some(index) = active else {
        return INTRO_POSE;
    };

    if catalog.is_reference(index) {
        // Fit a fixed square span both ways and keep whichever distance is
        // larger, plus a little margin
        let z_width = fit_distance(REFERENCE_SPAN / viewport.aspect(), CAMERA_FOV);
        let z_height = fit_distance(REFERENCE_SPAN, CAMERA_FOV);
        let z = z_width.max(z_height) * REFERENCE_MARGIN;
        return CameraTarget {
            position: Vec3::new(REFERENCE_VIEW_X, 0.0, z),
            look_at: Vec3::new(REFERENCE_VIEW_X, 0.0, 0.0),
        };
    }

    let Some(entry) = layout.last() else {
        return INTRO_POSE;
    };

    // Three-quarter framing of the active sphere: distance from the desired
    // on-screen height, eye lifted slightly above the look-at point
    let z = fit_distance(entry.radius * FRAME_HEIGHT_FACTOR, CAMERA_FOV);
    CameraTarget {
        position: Vec3::new(entry.center_offset, entry.radius * CAMERA_LIFT, z),
        look_at: Vec3::new(entry.center_offset, 0.0, 0.0),
    }
}

/// Persistent smoothed camera pose
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: INTRO_POSE.position,
            look_at: INTRO_POSE.look_at,
        }
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glide toward `target` by one timestep, each axis independent
    pub fn tick(&mut self, target: CameraTarget, dt: f32) {
        let blend = (CAMERA_SMOOTH_RATE * dt).min(1.0);
        self.position = self.position.lerp(target.position, blend);
        self.look_at = self.look_at.lerp(target.look_at, blend);
    }
}
