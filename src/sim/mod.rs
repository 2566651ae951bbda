//! Deterministic core module
//!
//! All layout, animation, camera, and puzzle logic lives here. This module
//! must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by stage index)
//! - No rendering or platform dependencies

pub mod animation;
pub mod layout;
pub mod puzzle;
pub mod view;

pub use animation::{AnimatedEntity, AnimationController};
pub use layout::{LayoutEntry, compute_layout};
pub use puzzle::{ListSide, OrderingPuzzle, PuzzleItem, PuzzlePhase};
pub use view::{CameraState, CameraTarget, Viewport, compute_view};
